//! Diagram data model
//!
//! A [`Diagram`] owns its points, forces, moments and bodies by value. Forces
//! and moments refer to points by id; that reference is not checked on
//! construction, only by [`validate`].

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ElementKind, ValidationIssue};
use crate::types::MagnitudeUnits;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownKeyword(s.to_string())),
                }
            }
        }
    };
}

/// A keyword that does not name any variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown keyword: {0}")]
pub struct UnknownKeyword(pub String);

keyword_enum! {
    /// How a point is supported
    #[derive(Default)]
    PointKind { Fixed => "fixed", Pivot => "pivot", #[default] Free => "free" }
}

keyword_enum! {
    /// What a force represents; drives its default color
    ForceKind {
        Normal => "normal",
        Friction => "friction",
        Tension => "tension",
        Weight => "weight",
        Applied => "applied",
        Custom => "custom",
        Component => "component",
    }
}

keyword_enum! {
    /// Sense of rotation of a moment
    MomentDirection { Cw => "cw", Ccw => "ccw" }
}

keyword_enum! {
    /// Shape of a rigid body
    BodyKind {
        Point => "point",
        Rectangle => "rectangle",
        Circle => "circle",
        Triangle => "triangle",
        Custom => "custom",
    }
}


/// An anchor in diagram-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: PointKind,
}

impl Point {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            label: None,
            kind: PointKind::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: PointKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A vector anchored at a point
///
/// `angle` is in degrees, counter-clockwise from +x in a y-up frame.
/// `magnitude` is a display length, see [`MagnitudeUnits`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Force {
    pub id: String,
    pub point_id: String,
    pub magnitude: f64,
    pub angle: f64,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ForceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<MagnitudeUnits>,
}

impl Force {
    pub fn new(
        id: impl Into<String>,
        point_id: impl Into<String>,
        magnitude: f64,
        angle: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            point_id: point_id.into(),
            magnitude,
            angle,
            label: label.into(),
            kind: None,
            color: None,
            units: None,
        }
    }

    pub fn with_kind(mut self, kind: ForceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A rotational indicator anchored at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    pub id: String,
    pub point_id: String,
    pub magnitude: f64,
    pub direction: MomentDirection,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Vertex of a triangle or custom body outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

/// The rigid object forces act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(rename = "type")]
    pub kind: BodyKind,
    pub center_x: f64,
    pub center_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vertex>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Rotation in degrees about the center, counter-clockwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Body {
    fn new(kind: BodyKind, center_x: f64, center_y: f64) -> Self {
        Self {
            kind,
            center_x,
            center_y,
            width: None,
            height: None,
            radius: None,
            points: None,
            fill: None,
            stroke: None,
            angle: None,
        }
    }

    pub fn point(center_x: f64, center_y: f64) -> Self {
        Self::new(BodyKind::Point, center_x, center_y)
    }

    pub fn rectangle(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::new(BodyKind::Rectangle, center_x, center_y)
        }
    }

    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            radius: Some(radius),
            ..Self::new(BodyKind::Circle, center_x, center_y)
        }
    }

    pub fn triangle(center_x: f64, center_y: f64) -> Self {
        Self::new(BodyKind::Triangle, center_x, center_y)
    }

    pub fn polygon(center_x: f64, center_y: f64, points: Vec<Vertex>) -> Self {
        Self {
            points: Some(points),
            ..Self::new(BodyKind::Custom, center_x, center_y)
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.angle = Some(degrees);
        self
    }
}

/// One renderable figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub forces: Vec<Force>,
    #[serde(default)]
    pub moments: Vec<Moment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bodies: Vec<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_axes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_angles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Static art spliced beneath the generic primitives
    #[serde(rename = "backgroundSVG", default, skip_serializing_if = "Option::is_none")]
    pub background_markup: Option<String>,
    /// Final SVG, set once the diagram has been rendered
    #[serde(rename = "customSVG", default, skip_serializing_if = "Option::is_none")]
    pub rendered_markup: Option<String>,
}

impl Diagram {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            points: Vec::new(),
            forces: Vec::new(),
            moments: Vec::new(),
            body: None,
            bodies: Vec::new(),
            show_axes: None,
            show_grid: None,
            show_angles: None,
            background_color: None,
            background_markup: None,
            rendered_markup: None,
        }
    }

    /// Look up a point by id
    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.iter().find(|p| p.id == id)
    }

    /// The single `body` followed by everything in `bodies`
    pub fn all_bodies(&self) -> impl Iterator<Item = &Body> {
        self.body.iter().chain(self.bodies.iter())
    }

    /// The rendered SVG, rendering now if it was never rendered
    pub fn markup(&self) -> String {
        match &self.rendered_markup {
            Some(markup) => markup.clone(),
            None => crate::render::render(self),
        }
    }

    /// Problems with this diagram's structure; empty when valid
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Check a diagram's referential invariants.
///
/// Returns one issue per problem: missing id, non-positive dimensions,
/// duplicate element ids, and forces or moments whose point does not exist.
pub fn validate(diagram: &Diagram) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if diagram.id.trim().is_empty() {
        issues.push(ValidationIssue::MissingId);
    }
    if !(diagram.width.is_finite() && diagram.width > 0.0) {
        issues.push(ValidationIssue::InvalidWidth(diagram.width));
    }
    if !(diagram.height.is_finite() && diagram.height > 0.0) {
        issues.push(ValidationIssue::InvalidHeight(diagram.height));
    }

    check_unique(ElementKind::Point, diagram.points.iter().map(|p| p.id.as_str()), &mut issues);
    check_unique(ElementKind::Force, diagram.forces.iter().map(|f| f.id.as_str()), &mut issues);
    check_unique(ElementKind::Moment, diagram.moments.iter().map(|m| m.id.as_str()), &mut issues);

    let point_ids: HashSet<&str> = diagram.points.iter().map(|p| p.id.as_str()).collect();
    for (index, force) in diagram.forces.iter().enumerate() {
        if !point_ids.contains(force.point_id.as_str()) {
            issues.push(ValidationIssue::DanglingForce {
                index,
                point_id: force.point_id.clone(),
            });
        }
    }
    for (index, moment) in diagram.moments.iter().enumerate() {
        if !point_ids.contains(moment.point_id.as_str()) {
            issues.push(ValidationIssue::DanglingMoment {
                index,
                point_id: moment.point_id.clone(),
            });
        }
    }

    issues
}

fn check_unique<'a>(
    kind: ElementKind,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ValidationIssue::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_point_diagram() -> Diagram {
        let mut d = Diagram::new("d", 600.0, 400.0);
        d.points.push(Point::new("A", 100.0, 200.0));
        d.points.push(Point::new("B", 500.0, 200.0));
        d
    }

    #[test]
    fn valid_references_produce_no_issues() {
        let mut d = two_point_diagram();
        d.forces.push(Force::new("F1", "A", 80.0, 90.0, "N"));
        d.moments.push(Moment {
            id: "M1".into(),
            point_id: "B".into(),
            magnitude: 10.0,
            direction: MomentDirection::Cw,
            label: "τ".into(),
            radius: None,
        });
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn dangling_force_is_reported() {
        let mut d = two_point_diagram();
        d.forces.push(Force::new("F1", "Z", 80.0, 90.0, "N"));
        let issues = validate(&d);
        assert_eq!(
            issues,
            vec![ValidationIssue::DanglingForce {
                index: 0,
                point_id: "Z".into()
            }]
        );
        assert_eq!(issues[0].to_string(), "force 0 references non-existent point: Z");
    }

    #[test]
    fn dangling_moment_is_reported() {
        let mut d = two_point_diagram();
        d.moments.push(Moment {
            id: "M1".into(),
            point_id: "nowhere".into(),
            magnitude: 1.0,
            direction: MomentDirection::Ccw,
            label: "M".into(),
            radius: Some(20.0),
        });
        assert!(matches!(
            validate(&d).as_slice(),
            [ValidationIssue::DanglingMoment { index: 0, .. }]
        ));
    }

    #[test]
    fn bad_dimensions_and_id() {
        let d = Diagram::new("", 0.0, -5.0);
        let issues = validate(&d);
        assert!(issues.contains(&ValidationIssue::MissingId));
        assert!(issues.contains(&ValidationIssue::InvalidWidth(0.0)));
        assert!(issues.contains(&ValidationIssue::InvalidHeight(-5.0)));
    }

    #[test]
    fn duplicate_point_ids() {
        let mut d = two_point_diagram();
        d.points.push(Point::new("A", 0.0, 0.0));
        assert_eq!(
            validate(&d),
            vec![ValidationIssue::DuplicateId {
                kind: ElementKind::Point,
                id: "A".into()
            }]
        );
    }

    #[test]
    fn keyword_enums_parse_case_insensitively() {
        assert_eq!("Weight".parse::<ForceKind>(), Ok(ForceKind::Weight));
        assert_eq!("CCW".parse::<MomentDirection>(), Ok(MomentDirection::Ccw));
        assert!("gravity".parse::<ForceKind>().is_err());
        assert_eq!(BodyKind::Rectangle.to_string(), "rectangle");
    }

    #[test]
    fn point_without_type_is_free() {
        let p: Point = serde_json::from_str(r#"{"id":"P","x":1,"y":2}"#).unwrap();
        assert_eq!(p.kind, PointKind::Free);
        assert_eq!(Point::new("Q", 0.0, 0.0).kind, PointKind::default());
    }

    #[test]
    fn json_uses_stored_field_names() {
        let mut d = two_point_diagram();
        d.forces.push(Force::new("F1", "A", 80.0, 0.0, "F").with_kind(ForceKind::Applied));
        d.background_markup = Some("<g/>".into());
        let json = d.to_json().unwrap();
        assert!(json.contains("\"pointId\": \"A\""));
        assert!(json.contains("\"type\": \"applied\""));
        assert!(json.contains("\"backgroundSVG\""));
        let back = Diagram::from_json(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn all_bodies_lists_single_body_first() {
        let mut d = two_point_diagram();
        d.bodies.push(Body::circle(1.0, 1.0, 5.0));
        d.body = Some(Body::rectangle(0.0, 0.0, 10.0, 10.0));
        let kinds: Vec<BodyKind> = d.all_bodies().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BodyKind::Rectangle, BodyKind::Circle]);
    }
}
