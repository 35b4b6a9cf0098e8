//! Geometry helpers: force endpoints, arrowheads, moment arcs, body outlines
//!
//! Everything here works in screen coordinates (y down). Angles coming from
//! the model are degrees counter-clockwise in a y-up frame and are flipped
//! through [`Degrees::screen_direction`].

use glam::{DVec2, dvec2};

use super::defaults;
use crate::model::{Body, MomentDirection};
use crate::types::{Degrees, MagnitudeUnits};

/// Where a force arrow ends, relative to its anchor
pub fn force_displacement(magnitude: f64, angle: Degrees, units: MagnitudeUnits) -> DVec2 {
    angle.screen_direction() * units.display_length(magnitude)
}

/// Triangle `[tip, left, right]` of an arrowhead pointing along `direction`
pub fn arrow_head(tip: DVec2, direction: DVec2, size: f64) -> [DVec2; 3] {
    let heading = direction.y.atan2(direction.x);
    let spread = defaults::ARROW_HEAD_SPREAD;
    let back = |a: f64| tip - size * dvec2(a.cos(), a.sin());
    [tip, back(heading - spread), back(heading + spread)]
}

/// A moment drawn as a 300° arc with an arrowhead at its end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentArc {
    pub start: DVec2,
    pub end: DVec2,
    pub radius: f64,
    /// SVG sweep flag: 1 draws clockwise on screen
    pub sweep: u8,
    /// Unit tangent at `end` in the direction of travel
    pub heading: DVec2,
}

impl MomentArc {
    pub fn new(center: DVec2, radius: f64, direction: MomentDirection) -> Self {
        let (start_deg, end_deg, sweep) = match direction {
            MomentDirection::Cw => (-30.0, -330.0, 1),
            MomentDirection::Ccw => (30.0, 330.0, 0),
        };
        let at = |deg: f64| center + radius * Degrees(deg).screen_direction();
        let end_rad = Degrees(end_deg).radians();
        let heading = match direction {
            MomentDirection::Cw => dvec2(end_rad.sin(), end_rad.cos()),
            MomentDirection::Ccw => dvec2(-end_rad.sin(), -end_rad.cos()),
        };
        Self {
            start: at(start_deg),
            end: at(end_deg),
            radius,
            sweep,
            heading,
        }
    }

    /// The `d` attribute of the arc path
    pub fn path_data(&self) -> String {
        use super::svg::fmt_num;
        format!(
            "M {} {} A {r} {r} 0 1 {} {} {}",
            fmt_num(self.start.x),
            fmt_num(self.start.y),
            self.sweep,
            fmt_num(self.end.x),
            fmt_num(self.end.y),
            r = fmt_num(self.radius),
        )
    }
}

/// The ground line and diagonal hatching drawn under a fixed support
pub fn hatch_path(anchor: DVec2) -> String {
    use super::svg::fmt_num;
    let y = anchor.y + defaults::HATCH_DROP;
    let half = defaults::HATCH_HALF_WIDTH;
    let mut d = format!(
        "M {} {} L {} {}",
        fmt_num(anchor.x - half),
        fmt_num(y),
        fmt_num(anchor.x + half),
        fmt_num(y)
    );
    for i in 0..4 {
        let x = anchor.x - half + 6.0 * i as f64 + 3.0;
        d.push_str(&format!(" M {} {} L {} {}", fmt_num(x), fmt_num(y), fmt_num(x - 5.0), fmt_num(y + 6.0)));
    }
    d
}

/// Triangle vertices in screen space.
///
/// Explicit vertices win when there are at least three of them; otherwise an
/// equilateral triangle is inscribed in the circle of `radius` (or half the
/// `width`, or the default size).
pub fn triangle_vertices(body: &Body) -> Vec<DVec2> {
    if let Some(points) = body.points.as_ref().filter(|p| p.len() >= 3) {
        return points.iter().map(|p| dvec2(p.x, p.y)).collect();
    }
    let r = body
        .radius
        .or(body.width.map(|w| w / 2.0))
        .unwrap_or(defaults::TRIANGLE_SIZE / 2.0);
    let h = r * 3f64.sqrt();
    let (cx, cy) = (body.center_x, body.center_y);
    vec![
        dvec2(cx, cy - r),
        dvec2(cx - h / 2.0, cy + r / 2.0),
        dvec2(cx + h / 2.0, cy + r / 2.0),
    ]
}
