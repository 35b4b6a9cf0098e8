//! Fluent construction of [`Diagram`]s
//!
//! Mutators consume and return the builder so calls chain. Nothing here checks
//! that forces and moments point at existing points; use [`crate::validate`].

use crate::model::{Body, Diagram, Force, ForceKind, Moment, MomentDirection, Point, PointKind};
use crate::render::{self, RenderConfig, defaults};

#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    diagram: Diagram,
}

impl DiagramBuilder {
    /// A 600x400 canvas with axes on and grid off
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_size(id, defaults::DIAGRAM_WIDTH, defaults::DIAGRAM_HEIGHT)
    }

    pub fn with_size(id: impl Into<String>, width: f64, height: f64) -> Self {
        let mut diagram = Diagram::new(id, width, height);
        diagram.show_axes = Some(true);
        diagram.show_grid = Some(false);
        Self { diagram }
    }

    pub fn add_point(self, id: impl Into<String>, x: f64, y: f64, label: Option<&str>) -> Self {
        self.add_support(id, x, y, label, PointKind::Free)
    }

    /// Add a point with an explicit support kind
    pub fn add_support(
        mut self,
        id: impl Into<String>,
        x: f64,
        y: f64,
        label: Option<&str>,
        kind: PointKind,
    ) -> Self {
        self.diagram.points.push(Point {
            id: id.into(),
            x,
            y,
            label: label.map(str::to_string),
            kind,
        });
        self
    }

    pub fn add_force(
        self,
        id: impl Into<String>,
        point_id: impl Into<String>,
        magnitude: f64,
        angle: f64,
        label: impl Into<String>,
        kind: Option<ForceKind>,
    ) -> Self {
        let mut force = Force::new(id, point_id, magnitude, angle, label);
        force.kind = kind;
        self.push_force(force)
    }

    /// Add a fully specified force (color, units)
    pub fn push_force(mut self, force: Force) -> Self {
        self.diagram.forces.push(force);
        self
    }

    pub fn add_moment(
        mut self,
        id: impl Into<String>,
        point_id: impl Into<String>,
        magnitude: f64,
        direction: MomentDirection,
        label: impl Into<String>,
    ) -> Self {
        self.diagram.moments.push(Moment {
            id: id.into(),
            point_id: point_id.into(),
            magnitude,
            direction,
            label: label.into(),
            radius: None,
        });
        self
    }

    pub fn set_body(mut self, body: Body) -> Self {
        self.diagram.body = Some(body);
        self
    }

    pub fn add_body(mut self, body: Body) -> Self {
        self.diagram.bodies.push(body);
        self
    }

    pub fn show_axes(mut self, show: bool) -> Self {
        self.diagram.show_axes = Some(show);
        self
    }

    pub fn show_grid(mut self, show: bool) -> Self {
        self.diagram.show_grid = Some(show);
        self
    }

    pub fn show_angles(mut self, show: bool) -> Self {
        self.diagram.show_angles = Some(show);
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.diagram.background_color = Some(color.into());
        self
    }

    /// Static art drawn beneath bodies, points and forces
    pub fn background_markup(mut self, markup: impl Into<String>) -> Self {
        self.diagram.background_markup = Some(markup.into());
        self
    }

    /// Supply finished markup; `build` will not render over it
    pub fn rendered_markup(mut self, markup: impl Into<String>) -> Self {
        self.diagram.rendered_markup = Some(markup.into());
        self
    }

    /// The diagram as built so far, unrendered
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Finish the diagram, rendering it unless markup was supplied
    pub fn build(&self) -> Diagram {
        self.build_with(&RenderConfig::default())
    }

    pub fn build_with(&self, config: &RenderConfig) -> Diagram {
        let mut diagram = self.diagram.clone();
        if diagram.rendered_markup.is_none() {
            diagram.rendered_markup = Some(render::render_with(&diagram, config));
        }
        diagram
    }
}

/// One force of a [`simple_diagram`]
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSpec {
    pub magnitude: f64,
    pub angle: f64,
    pub label: String,
    pub kind: Option<ForceKind>,
}

impl ForceSpec {
    pub fn new(magnitude: f64, angle: f64, label: impl Into<String>) -> Self {
        Self {
            magnitude,
            angle,
            label: label.into(),
            kind: None,
        }
    }

    pub fn kind(mut self, kind: ForceKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// A single point `center` labelled `O` at `(cx, cy)` with forces `f1..fn`
pub fn simple_diagram(id: impl Into<String>, cx: f64, cy: f64, forces: &[ForceSpec]) -> Diagram {
    let builder = DiagramBuilder::new(id).add_point("center", cx, cy, Some("O"));
    forces
        .iter()
        .enumerate()
        .fold(builder, |b, (i, f)| {
            b.add_force(format!("f{}", i + 1), "center", f.magnitude, f.angle, f.label.clone(), f.kind)
        })
        .build()
}
