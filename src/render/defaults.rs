//! Default sizes and settings (all in diagram pixels)

/// Width of a diagram built without an explicit size
pub const DIAGRAM_WIDTH: f64 = 600.0;
pub const DIAGRAM_HEIGHT: f64 = 400.0;

/// Spacing of background grid lines
pub const GRID_SPACING: f64 = 20.0;
pub const GRID_OPACITY: f64 = 0.5;

/// Inset of the coordinate axes from the canvas edges
pub const AXIS_PADDING: f64 = 30.0;

pub const FORCE_STROKE_WIDTH: f64 = 2.5;
pub const ARROW_HEAD_SIZE: f64 = 10.0;
/// Half-angle of an arrowhead, in radians (30°)
pub const ARROW_HEAD_SPREAD: f64 = std::f64::consts::FRAC_PI_6;
/// Distance from a force tip to its label
pub const LABEL_OFFSET: f64 = 15.0;

/// Magnitudes below this are scaled by [`MAGNITUDE_FACTOR`]
pub const MAGNITUDE_THRESHOLD: f64 = 20.0;
pub const MAGNITUDE_FACTOR: f64 = 10.0;

pub const POINT_RADIUS: f64 = 4.0;
pub const PIVOT_RADIUS: f64 = 7.0;
/// Offset of a point label above its marker
pub const POINT_LABEL_RISE: f64 = 10.0;
/// Half-width of the hatched ground line under fixed points
pub const HATCH_HALF_WIDTH: f64 = 12.0;
pub const HATCH_DROP: f64 = 6.0;

pub const MOMENT_RADIUS: f64 = 30.0;
pub const MOMENT_STROKE_WIDTH: f64 = 2.0;
pub const MOMENT_HEAD_SIZE: f64 = 8.0;

pub const FORCE_FONT_SIZE: f64 = 14.0;
pub const POINT_FONT_SIZE: f64 = 12.0;
pub const ANGLE_FONT_SIZE: f64 = 11.0;

pub const RECT_WIDTH: f64 = 60.0;
pub const RECT_HEIGHT: f64 = 40.0;
pub const CIRCLE_RADIUS: f64 = 30.0;
pub const POINT_BODY_RADIUS: f64 = 5.0;
pub const TRIANGLE_SIZE: f64 = 40.0;
pub const BODY_STROKE_WIDTH: f64 = 2.0;

pub const FONT_FAMILY: &str = "'Times New Roman', Times, serif";
