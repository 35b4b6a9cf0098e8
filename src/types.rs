//! Small strongly-typed primitives shared by the model and the renderer.

use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::render::defaults;

/// Angle in degrees, counter-clockwise from the positive x-axis (y-up frame)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Unit direction in the y-down frame used by SVG output
    #[inline]
    pub fn screen_direction(self) -> DVec2 {
        let rad = self.radians();
        dvec2(rad.cos(), -rad.sin())
    }

    /// Whether the angle points along one of the axes
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.0 % 90.0 == 0.0
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Degrees {
    fn from(value: f64) -> Self {
        Degrees(value)
    }
}

/// How a force magnitude turns into an arrow length in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeUnits {
    /// Magnitudes below the threshold are scaled up, larger ones are pixels.
    #[default]
    Auto,
    /// The magnitude is the arrow length.
    Pixels,
}

impl MagnitudeUnits {
    /// Arrow length in pixels for a magnitude
    pub fn display_length(self, magnitude: f64) -> f64 {
        match self {
            MagnitudeUnits::Auto if magnitude < defaults::MAGNITUDE_THRESHOLD => {
                magnitude * defaults::MAGNITUDE_FACTOR
            }
            _ => magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_magnitudes_are_scaled_in_auto_mode() {
        assert_eq!(MagnitudeUnits::Auto.display_length(5.0), 50.0);
        assert_eq!(MagnitudeUnits::Auto.display_length(15.0), 150.0);
    }

    #[test]
    fn threshold_and_above_are_pixels() {
        assert_eq!(MagnitudeUnits::Auto.display_length(20.0), 20.0);
        assert_eq!(MagnitudeUnits::Auto.display_length(80.0), 80.0);
    }

    #[test]
    fn pixel_mode_never_scales() {
        assert_eq!(MagnitudeUnits::Pixels.display_length(5.0), 5.0);
    }

    #[test]
    fn screen_direction_flips_y() {
        let up = Degrees(90.0).screen_direction();
        assert!(up.x.abs() < 1e-12);
        assert!((up.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn axis_alignment() {
        assert!(Degrees(270.0).is_axis_aligned());
        assert!(Degrees(-90.0).is_axis_aligned());
        assert!(!Degrees(30.0).is_axis_aligned());
    }
}
