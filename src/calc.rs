//! Helpers for interactive editors: snapping, measuring, labelling
//!
//! Positions are screen coordinates (y down); angles are degrees
//! counter-clockwise from +x with y up, as in the model.

use glam::{DVec2, dvec2};

use crate::render::defaults;
use crate::render::geometry;

/// Angles an editor offers as snap targets
pub const SNAP_ANGLES: &[f64] = &[
    0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0, 210.0, 225.0, 240.0, 270.0, 300.0, 315.0, 330.0,
];

/// The candidate closest to `angle`; the first one wins a tie.
/// Returns `angle` unchanged when there are no candidates.
pub fn snap_angle(angle: f64, candidates: &[f64]) -> f64 {
    let mut best = match candidates.first() {
        Some(first) => *first,
        None => return angle,
    };
    for &candidate in candidates {
        if (angle - candidate).abs() < (angle - best).abs() {
            best = candidate;
        }
    }
    best
}

/// Direction from `from` to `to` in model degrees, normalised to `0..360`
pub fn angle_between(from: DVec2, to: DVec2) -> f64 {
    let degrees = (from.y - to.y).atan2(to.x - from.x).to_degrees();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

pub fn snap_to_grid(position: DVec2, grid: f64) -> DVec2 {
    if grid <= 0.0 {
        return position;
    }
    dvec2((position.x / grid).round() * grid, (position.y / grid).round() * grid)
}

/// Where a force drawn at its raw magnitude would end
pub fn force_end(start: DVec2, magnitude: f64, angle: f64) -> DVec2 {
    start + crate::types::Degrees(angle).screen_direction() * magnitude
}

/// `[left, right]` barbs of an arrow from `start` to `end`
pub fn arrow_head(start: DVec2, end: DVec2, size: f64) -> [DVec2; 2] {
    let [_, left, right] = geometry::arrow_head(end, end - start, size);
    [left, right]
}

/// `1.2k` from 1000 upwards, one decimal below
pub fn format_magnitude(magnitude: f64) -> String {
    if magnitude >= 1000.0 {
        format!("{:.1}k", magnitude / 1000.0)
    } else {
        format!("{magnitude:.1}")
    }
}

/// Barbs at the renderer's default arrowhead size
pub fn preview_arrow_head(start: DVec2, end: DVec2) -> [DVec2; 2] {
    arrow_head(start, end, defaults::ARROW_HEAD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn snapping_angles() {
        assert_eq!(snap_angle(40.0, SNAP_ANGLES), 45.0);
        assert_eq!(snap_angle(359.0, SNAP_ANGLES), 330.0);
        // equidistant from 30 and 45: first listed wins
        assert_eq!(snap_angle(37.5, SNAP_ANGLES), 30.0);
        assert_eq!(snap_angle(12.0, &[]), 12.0);
    }

    #[test]
    fn angles_are_y_up() {
        let o = dvec2(100.0, 100.0);
        assert_eq!(angle_between(o, dvec2(200.0, 100.0)), 0.0);
        assert!((angle_between(o, dvec2(100.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((angle_between(o, dvec2(100.0, 200.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn grid_and_distance() {
        assert_eq!(snap_to_grid(dvec2(29.0, 31.0), 20.0), dvec2(20.0, 40.0));
        assert_eq!(snap_to_grid(dvec2(3.0, 4.0), 0.0), dvec2(3.0, 4.0));
        assert_eq!(distance(dvec2(0.0, 0.0), dvec2(3.0, 4.0)), 5.0);
    }

    #[test]
    fn force_end_flips_y() {
        assert!(close(force_end(dvec2(10.0, 10.0), 5.0, 90.0), dvec2(10.0, 5.0)));
    }

    #[test]
    fn barbs_trail_the_tip() {
        let [left, right] = arrow_head(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 10.0);
        assert!(left.x < 100.0 && right.x < 100.0);
        assert!(close(left, dvec2(100.0 - 10.0 * (std::f64::consts::PI / 6.0).cos(), 5.0)));
        assert_eq!(preview_arrow_head(dvec2(0.0, 0.0), dvec2(100.0, 0.0)), [left, right]);
    }

    #[test]
    fn magnitude_labels() {
        assert_eq!(format_magnitude(1500.0), "1.5k");
        assert_eq!(format_magnitude(12.34), "12.3");
        assert_eq!(format_magnitude(999.0), "999.0");
    }
}
