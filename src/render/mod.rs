//! SVG rendering for diagrams
//!
//! [`render`] is a pure function of the diagram: the same diagram always
//! yields the same markup. Layers are drawn bottom to top:
//!
//! 1. definitions (arrow marker, body gradient) and a style block scoped to
//!    the diagram id
//! 2. background color, grid, axes
//! 3. caller-supplied background art
//! 4. bodies, points, forces, moments

pub(crate) mod context;
pub mod defaults;
pub mod geometry;
pub mod label;
mod shapes;
pub mod svg;

use glam::{DVec2, dvec2};

pub use context::{ForcePalette, RenderConfig};
use context::RenderContext;
use geometry::{MomentArc, arrow_head, force_displacement, hatch_path};
use shapes::{BodyShape, Shape};
pub use svg::strip_root;
use svg::{Element, css_ident, fmt_num};

use crate::log;
use crate::model::{Diagram, Force, Moment, Point, PointKind};
use crate::types::Degrees;

/// Render with the default configuration
pub fn render(diagram: &Diagram) -> String {
    render_with(diagram, &RenderConfig::default())
}

pub fn render_with(diagram: &Diagram, config: &RenderConfig) -> String {
    let mut ctx = RenderContext::new(&diagram.id, config);
    let (w, h) = (diagram.width, diagram.height);

    ctx.out.open(
        &Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("id", diagram.id.as_str())
            .attr("class", "fbd-diagram")
            .attr("width", w)
            .attr("height", h)
            .attr("viewBox", format!("0 0 {} {}", fmt_num(w), fmt_num(h))),
    );

    render_defs(&mut ctx);
    render_style(&mut ctx);

    ctx.out.leaf(
        &Element::new("rect")
            .attr("class", "fbd-background")
            .attr("width", w)
            .attr("height", h)
            .attr("fill", diagram.background_color.as_deref().unwrap_or("transparent")),
    );

    if diagram.show_grid == Some(true) {
        render_grid(&mut ctx, w, h);
    }
    if diagram.show_axes == Some(true) {
        render_axes(&mut ctx, w, h);
    }

    if let Some(art) = diagram.background_markup.as_deref() {
        let inner = strip_root(art);
        if !inner.is_empty() {
            ctx.out.open(&Element::new("g").attr("class", "fbd-background-art"));
            ctx.out.raw(inner);
            ctx.out.close();
        }
    }

    for body in diagram.all_bodies() {
        if let Some(shape) = BodyShape::from_body(body) {
            shape.render(&mut ctx);
        }
    }

    for point in &diagram.points {
        render_point(&mut ctx, point);
    }

    let show_angles = diagram.show_angles == Some(true);
    for force in &diagram.forces {
        match diagram.point(&force.point_id) {
            Some(point) => render_force(&mut ctx, force, point, show_angles),
            None => log::debug!(force = %force.id, point = %force.point_id, "force anchor missing, not drawn"),
        }
    }

    for moment in &diagram.moments {
        match diagram.point(&moment.point_id) {
            Some(point) => render_moment(&mut ctx, moment, point),
            None => log::debug!(moment = %moment.id, point = %moment.point_id, "moment anchor missing, not drawn"),
        }
    }

    ctx.out.finish()
}

fn anchor(point: &Point) -> DVec2 {
    dvec2(point.x, point.y)
}

fn render_defs(ctx: &mut RenderContext<'_>) {
    let size = ctx.config.arrow_head_size;
    ctx.out.open(&Element::new("defs"));

    ctx.out.open(
        &Element::new("marker")
            .attr("id", ctx.marker_id())
            .attr("markerWidth", size)
            .attr("markerHeight", size)
            .attr("refX", size)
            .attr("refY", size / 2.0)
            .attr("orient", "auto")
            .attr("markerUnits", "userSpaceOnUse"),
    );
    ctx.out.leaf(
        &Element::new("polygon")
            .points(&[dvec2(0.0, 0.0), dvec2(size, size / 2.0), dvec2(0.0, size)])
            .attr("fill", "context-stroke"),
    );
    ctx.out.close();

    ctx.out.open(
        &Element::new("linearGradient")
            .attr("id", ctx.gradient_id())
            .attr("x1", "0")
            .attr("y1", "0")
            .attr("x2", "0")
            .attr("y2", "1"),
    );
    ctx.out.leaf(&Element::new("stop").attr("offset", "0").attr("stop-color", "#F3F4F6"));
    ctx.out.leaf(&Element::new("stop").attr("offset", "1").attr("stop-color", "#D1D5DB"));
    ctx.out.close();

    ctx.out.close();
}

fn render_style(ctx: &mut RenderContext<'_>) {
    let scope = format!("#{}", css_ident(ctx.id));
    let css = format!(
        "{scope} .fbd-label {{ font-family: {font}; font-style: italic; font-size: {force}px; }} \
         {scope} .fbd-point-label {{ font-family: {font}; font-size: {point}px; }} \
         {scope} .fbd-caption {{ font-family: sans-serif; font-weight: bold; }}",
        font = defaults::FONT_FAMILY,
        force = fmt_num(defaults::FORCE_FONT_SIZE),
        point = fmt_num(defaults::POINT_FONT_SIZE),
    );
    ctx.out.text(&Element::new("style"), &css);
}

fn render_grid(ctx: &mut RenderContext<'_>, w: f64, h: f64) {
    let step = ctx.config.grid_spacing;
    if step <= 0.0 {
        return;
    }
    let mut d = Vec::new();
    let mut x = step;
    while x < w {
        d.push(format!("M{},0 L{},{}", fmt_num(x), fmt_num(x), fmt_num(h)));
        x += step;
    }
    let mut y = step;
    while y < h {
        d.push(format!("M0,{} L{},{}", fmt_num(y), fmt_num(w), fmt_num(y)));
        y += step;
    }
    ctx.out.leaf(
        &Element::new("path")
            .attr("class", "fbd-grid")
            .attr("d", d.join(" "))
            .attr("stroke", ctx.config.grid_color.as_str())
            .attr("stroke-width", 1.0)
            .attr("fill", "none")
            .attr("opacity", defaults::GRID_OPACITY),
    );
}

fn render_axes(ctx: &mut RenderContext<'_>, w: f64, h: f64) {
    let pad = defaults::AXIS_PADDING;
    let color = ctx.config.axes_color.clone();
    let marker = format!("url(#{})", ctx.marker_id());
    let (cx, cy) = (w / 2.0, h / 2.0);

    ctx.out.open(&Element::new("g").attr("class", "fbd-axes").attr("opacity", 0.6));
    ctx.out.leaf(
        &Element::new("line")
            .attr("x1", pad)
            .attr("y1", cy)
            .attr("x2", w - pad)
            .attr("y2", cy)
            .attr("stroke", color.as_str())
            .attr("stroke-width", 1.5)
            .attr("marker-end", marker.as_str()),
    );
    ctx.out.leaf(
        &Element::new("line")
            .attr("x1", cx)
            .attr("y1", h - pad)
            .attr("x2", cx)
            .attr("y2", pad)
            .attr("stroke", color.as_str())
            .attr("stroke-width", 1.5)
            .attr("marker-end", marker.as_str()),
    );
    ctx.out.text(
        &Element::new("text")
            .attr("class", "fbd-label")
            .attr("x", w - pad + 5.0)
            .attr("y", cy + 15.0)
            .attr("fill", color.as_str()),
        "x",
    );
    ctx.out.text(
        &Element::new("text")
            .attr("class", "fbd-label")
            .attr("x", cx + 10.0)
            .attr("y", pad - 5.0)
            .attr("fill", color.as_str()),
        "y",
    );
    ctx.out.close();
}

fn render_point(ctx: &mut RenderContext<'_>, point: &Point) {
    let at = anchor(point);
    let color = ctx.config.point_color.clone();

    ctx.out.open(
        &Element::new("g")
            .attr("class", format!("fbd-point fbd-point-{}", point.kind))
            .attr("data-point-id", point.id.as_str()),
    );
    match point.kind {
        PointKind::Fixed => ctx.out.leaf(
            &Element::new("path")
                .attr("d", hatch_path(at))
                .attr("stroke", color.as_str())
                .attr("stroke-width", 1.5)
                .attr("fill", "none"),
        ),
        PointKind::Pivot => ctx.out.leaf(
            &Element::new("circle")
                .attr("cx", at.x)
                .attr("cy", at.y)
                .attr("r", defaults::PIVOT_RADIUS)
                .attr("fill", "none")
                .attr("stroke", color.as_str())
                .attr("stroke-width", 1.5),
        ),
        PointKind::Free => {}
    }
    ctx.out.leaf(
        &Element::new("circle")
            .attr("cx", at.x)
            .attr("cy", at.y)
            .attr("r", defaults::POINT_RADIUS)
            .attr("fill", color.as_str()),
    );
    if let Some(text) = point.label.as_deref().filter(|l| !l.is_empty()) {
        ctx.out.markup(
            &Element::new("text")
                .attr("class", "fbd-point-label")
                .attr("x", at.x)
                .attr("y", at.y - defaults::POINT_LABEL_RISE)
                .attr("text-anchor", "middle")
                .attr("fill", color.as_str()),
            &label::typeset(text),
        );
    }
    ctx.out.close();
}

fn render_force(ctx: &mut RenderContext<'_>, force: &Force, point: &Point, show_angles: bool) {
    let start = anchor(point);
    let angle = Degrees(force.angle);
    let displacement = force_displacement(force.magnitude, angle, ctx.force_units(force));
    if displacement.length_squared() == 0.0 {
        log::debug!(force = %force.id, "zero-length force, not drawn");
        return;
    }
    let tip = start + displacement;
    let color = ctx.force_color(force).to_string();
    let head = arrow_head(tip, displacement, ctx.config.arrow_head_size);

    ctx.out.open(
        &Element::new("g")
            .attr("class", "fbd-force")
            .attr("data-force-id", force.id.as_str()),
    );
    ctx.out.leaf(
        &Element::new("line")
            .attr("class", "fbd-force-line")
            .attr("x1", start.x)
            .attr("y1", start.y)
            .attr("x2", tip.x)
            .attr("y2", tip.y)
            .attr("stroke", color.as_str())
            .attr("stroke-width", ctx.config.arrow_width)
            .attr("stroke-linecap", "round"),
    );
    ctx.out.leaf(&Element::new("polygon").points(&head).attr("fill", color.as_str()));

    if !force.label.is_empty() {
        let at = tip + angle.screen_direction() * defaults::LABEL_OFFSET;
        ctx.out.markup(
            &Element::new("text")
                .attr("class", "fbd-label")
                .attr("x", at.x)
                .attr("y", at.y)
                .attr("fill", color.as_str())
                .attr("text-anchor", "middle")
                .attr("dominant-baseline", "middle"),
            &label::typeset(&force.label),
        );
    }

    if show_angles && !angle.is_axis_aligned() {
        ctx.out.text(
            &Element::new("text")
                .attr("class", "fbd-angle")
                .attr("x", start.x + 20.0)
                .attr("y", start.y - 10.0)
                .attr("fill", ctx.config.angle_color.as_str())
                .attr("font-size", defaults::ANGLE_FONT_SIZE),
            &format!("{}°", fmt_num(force.angle)),
        );
    }
    ctx.out.close();
}

fn render_moment(ctx: &mut RenderContext<'_>, moment: &Moment, point: &Point) {
    let center = anchor(point);
    let radius = moment.radius.unwrap_or(defaults::MOMENT_RADIUS);
    let arc = MomentArc::new(center, radius, moment.direction);
    let color = ctx.config.moment_color.clone();

    ctx.out.open(
        &Element::new("g")
            .attr("class", format!("fbd-moment fbd-moment-{}", moment.direction))
            .attr("data-moment-id", moment.id.as_str()),
    );
    ctx.out.leaf(
        &Element::new("path")
            .attr("d", arc.path_data())
            .attr("fill", "none")
            .attr("stroke", color.as_str())
            .attr("stroke-width", defaults::MOMENT_STROKE_WIDTH),
    );
    ctx.out.leaf(
        &Element::new("polygon")
            .points(&arrow_head(arc.end, arc.heading, defaults::MOMENT_HEAD_SIZE))
            .attr("fill", color.as_str()),
    );
    let caption = format!("{} ({} N·m)", label::typeset(&moment.label), fmt_num(moment.magnitude));
    ctx.out.markup(
        &Element::new("text")
            .attr("class", "fbd-label")
            .attr("x", center.x)
            .attr("y", center.y - radius - 15.0)
            .attr("fill", color.as_str())
            .attr("text-anchor", "middle"),
        &caption,
    );
    ctx.out.leaf(
        &Element::new("circle")
            .attr("cx", center.x)
            .attr("cy", center.y)
            .attr("r", 3.0)
            .attr("fill", color.as_str())
            .attr("opacity", 0.5),
    );
    ctx.out.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DiagramBuilder;
    use crate::model::{Body, ForceKind, MomentDirection};

    #[test]
    fn root_carries_size_and_id() {
        let svg = render(&Diagram::new("d1", 320.0, 240.5));
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="d1" class="fbd-diagram" width="320" height="240.5" viewBox="0 0 320 240.5">"#
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<marker id="d1-arrow""#));
        assert!(svg.contains("#d1 .fbd-label"));
    }

    #[test]
    fn optional_layers() {
        let plain = DiagramBuilder::new("p").show_axes(false).diagram().clone();
        let svg = render(&plain);
        assert!(!svg.contains("fbd-grid"));
        assert!(!svg.contains("fbd-axes"));

        let layered = DiagramBuilder::new("p").show_grid(true).background_color("#fff").diagram().clone();
        let svg = render(&layered);
        assert!(svg.contains("fbd-grid"));
        assert!(svg.contains("fbd-axes"));
        assert!(svg.contains(r##"fill="#fff""##));
    }

    #[test]
    fn background_art_is_unwrapped() {
        let d = DiagramBuilder::new("b")
            .background_markup(r#"<svg viewBox="0 0 10 10"><path d="M0 0 L10 10"/></svg>"#)
            .diagram()
            .clone();
        let svg = render(&d);
        assert!(svg.contains("<g class=\"fbd-background-art\">\n    <path d=\"M0 0 L10 10\"/>\n  </g>"));
        assert_eq!(svg.matches("<svg").count(), 1);
    }

    #[test]
    fn fixed_and_pivot_supports_are_decorated() {
        let d = DiagramBuilder::new("s")
            .add_support("A", 100.0, 100.0, Some("A"), PointKind::Fixed)
            .add_support("B", 200.0, 100.0, None, PointKind::Pivot)
            .diagram()
            .clone();
        let svg = render(&d);
        assert!(svg.contains("fbd-point fbd-point-fixed"));
        assert!(svg.contains("M 88 106 L 112 106"));
        assert!(svg.contains(r#"r="7""#));
        assert!(svg.contains(r#"<text class="fbd-point-label" x="100" y="90""#));
    }

    #[test]
    fn force_arrow_and_label() {
        let d = DiagramBuilder::new("f")
            .add_point("P", 300.0, 200.0, None)
            .add_force("W", "P", 80.0, 270.0, "mg", Some(ForceKind::Weight))
            .diagram()
            .clone();
        let svg = render(&d);
        assert!(svg.contains(r##"<line class="fbd-force-line" x1="300" y1="200" x2="300" y2="280" stroke="#3B82F6""##));
        // label sits 15px beyond the tip
        assert!(svg.contains(r##"<text class="fbd-label" x="300" y="295" fill="#3B82F6""##));
    }

    #[test]
    fn missing_anchor_and_zero_length_are_skipped() {
        let d = DiagramBuilder::new("z")
            .add_point("P", 10.0, 10.0, None)
            .add_force("ghost", "nowhere", 50.0, 0.0, "G", None)
            .add_force("zero", "P", 0.0, 0.0, "Z", None)
            .diagram()
            .clone();
        let svg = render(&d);
        assert!(!svg.contains("fbd-force"));
    }

    #[test]
    fn angle_annotations_only_off_axis() {
        let d = DiagramBuilder::new("a")
            .add_point("P", 100.0, 100.0, None)
            .add_force("F1", "P", 50.0, 30.0, "F", None)
            .add_force("F2", "P", 50.0, 90.0, "N", None)
            .show_angles(true)
            .diagram()
            .clone();
        let svg = render(&d);
        assert_eq!(svg.matches("fbd-angle").count(), 1);
        assert!(svg.contains(">30°</text>"));
    }

    #[test]
    fn moments_draw_arc_and_caption() {
        let d = DiagramBuilder::new("m")
            .add_point("O", 100.0, 100.0, None)
            .add_moment("M1", "O", 12.0, MomentDirection::Cw, r"\tau")
            .diagram()
            .clone();
        let svg = render(&d);
        assert!(svg.contains("fbd-moment fbd-moment-cw"));
        assert!(svg.contains(" A 30 30 0 1 1 "));
        assert!(svg.contains(">τ (12 N·m)</text>"));
    }

    #[test]
    fn bodies_render_in_order() {
        let mut d = Diagram::new("b", 200.0, 200.0);
        d.body = Some(Body::circle(50.0, 50.0, 10.0));
        d.bodies.push(Body::triangle(150.0, 150.0));
        let svg = render(&d);
        let circle = svg.find("fbd-body-circle").unwrap();
        let triangle = svg.find("fbd-body-triangle").unwrap();
        assert!(circle < triangle);
    }

    #[test]
    fn rendering_is_deterministic() {
        let d = crate::parse::parse("PRESET:incline(30,10,true)", "x").unwrap();
        assert_eq!(render(&d), render(&d));
        assert_eq!(d.rendered_markup.as_deref(), Some(render(&d).as_str()));
    }
}
