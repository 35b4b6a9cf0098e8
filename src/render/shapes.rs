//! Body shapes
//!
//! Each body kind is its own type that knows how to draw itself; a
//! [`BodyShape`] dispatches to them.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::context::RenderContext;
use super::defaults;
use super::geometry::triangle_vertices;
use super::svg::Element;
use crate::model::{Body, BodyKind};

/// Common behavior for all body shapes
#[enum_dispatch]
pub(crate) trait Shape {
    /// Center of rotation
    fn center(&self) -> DVec2;

    /// Emit the shape's element(s), unrotated
    fn draw(&self, ctx: &mut RenderContext<'_>);

    /// Rotation in degrees, counter-clockwise
    fn angle(&self) -> Option<f64> {
        None
    }

    fn render(&self, ctx: &mut RenderContext<'_>) {
        match self.angle().filter(|a| *a != 0.0) {
            Some(angle) => {
                let c = self.center();
                let transform = format!(
                    "rotate({} {} {})",
                    super::svg::fmt_num(-angle),
                    super::svg::fmt_num(c.x),
                    super::svg::fmt_num(c.y)
                );
                ctx.out.open(&Element::new("g").attr("transform", transform));
                self.draw(ctx);
                ctx.out.close();
            }
            None => self.draw(ctx),
        }
    }
}

#[enum_dispatch(Shape)]
#[derive(Debug, Clone)]
pub(crate) enum BodyShape {
    Rect(RectShape),
    Circle(CircleShape),
    Dot(DotShape),
    Polygon(PolygonShape),
}

impl BodyShape {
    /// The shape for a body, or `None` for a custom body with no vertices
    pub fn from_body(body: &Body) -> Option<Self> {
        let center = dvec2(body.center_x, body.center_y);
        let style = ShapeStyle::from_body(body);
        let shape = match body.kind {
            BodyKind::Rectangle => BodyShape::Rect(RectShape {
                center,
                size: dvec2(
                    body.width.unwrap_or(defaults::RECT_WIDTH),
                    body.height.unwrap_or(defaults::RECT_HEIGHT),
                ),
                style,
            }),
            BodyKind::Circle => BodyShape::Circle(CircleShape {
                center,
                radius: body.radius.unwrap_or(defaults::CIRCLE_RADIUS),
                style,
            }),
            BodyKind::Point => BodyShape::Dot(DotShape { center, style }),
            BodyKind::Triangle => BodyShape::Polygon(PolygonShape {
                center,
                vertices: triangle_vertices(body),
                class: "fbd-body fbd-body-triangle",
                style,
            }),
            BodyKind::Custom => {
                let vertices: Vec<DVec2> = body.points.iter().flatten().map(|p| dvec2(p.x, p.y)).collect();
                if vertices.is_empty() {
                    return None;
                }
                BodyShape::Polygon(PolygonShape {
                    center,
                    vertices,
                    class: "fbd-body fbd-body-custom",
                    style,
                })
            }
        };
        Some(shape)
    }
}

/// Fill, stroke and rotation taken from the body; missing colors come from
/// the render config
#[derive(Debug, Clone, Default)]
pub(crate) struct ShapeStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub angle: Option<f64>,
}

impl ShapeStyle {
    fn from_body(body: &Body) -> Self {
        Self {
            fill: body.fill.clone(),
            stroke: body.stroke.clone(),
            angle: body.angle,
        }
    }

    fn fill(&self, ctx: &RenderContext<'_>) -> String {
        self.fill.clone().unwrap_or_else(|| ctx.body_fill())
    }

    fn stroke(&self, ctx: &RenderContext<'_>) -> String {
        self.stroke.clone().unwrap_or_else(|| ctx.config.body_stroke.clone())
    }

    fn apply(&self, element: Element, ctx: &RenderContext<'_>) -> Element {
        element
            .attr("fill", self.fill(ctx))
            .attr("stroke", self.stroke(ctx))
            .attr("stroke-width", defaults::BODY_STROKE_WIDTH)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RectShape {
    pub center: DVec2,
    pub size: DVec2,
    pub style: ShapeStyle,
}

impl Shape for RectShape {
    fn center(&self) -> DVec2 {
        self.center
    }

    fn angle(&self) -> Option<f64> {
        self.style.angle
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let corner = self.center - self.size / 2.0;
        let el = Element::new("rect")
            .attr("class", "fbd-body fbd-body-rectangle")
            .attr("x", corner.x)
            .attr("y", corner.y)
            .attr("width", self.size.x)
            .attr("height", self.size.y);
        let el = self.style.apply(el, ctx);
        ctx.out.leaf(&el);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CircleShape {
    pub center: DVec2,
    pub radius: f64,
    pub style: ShapeStyle,
}

impl Shape for CircleShape {
    fn center(&self) -> DVec2 {
        self.center
    }

    fn angle(&self) -> Option<f64> {
        self.style.angle
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let el = Element::new("circle")
            .attr("class", "fbd-body fbd-body-circle")
            .attr("cx", self.center.x)
            .attr("cy", self.center.y)
            .attr("r", self.radius);
        let el = self.style.apply(el, ctx);
        ctx.out.leaf(&el);
    }
}

/// A point body: a small dot filled with the stroke color
#[derive(Debug, Clone)]
pub(crate) struct DotShape {
    pub center: DVec2,
    pub style: ShapeStyle,
}

impl Shape for DotShape {
    fn center(&self) -> DVec2 {
        self.center
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let el = Element::new("circle")
            .attr("class", "fbd-body fbd-body-point")
            .attr("cx", self.center.x)
            .attr("cy", self.center.y)
            .attr("r", defaults::POINT_BODY_RADIUS)
            .attr("fill", self.style.stroke(ctx));
        ctx.out.leaf(&el);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PolygonShape {
    pub center: DVec2,
    pub vertices: Vec<DVec2>,
    pub class: &'static str,
    pub style: ShapeStyle,
}

impl Shape for PolygonShape {
    fn center(&self) -> DVec2 {
        self.center
    }

    fn angle(&self) -> Option<f64> {
        self.style.angle
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let el = Element::new("polygon").attr("class", self.class).points(&self.vertices);
        let el = self.style.apply(el, ctx);
        ctx.out.leaf(&el);
    }
}
