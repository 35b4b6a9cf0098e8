//! Rendering configuration and per-render state

use super::defaults;
use super::svg::SvgWriter;
use crate::model::{Force, ForceKind};
use crate::types::MagnitudeUnits;

/// Arrow color for each force kind
#[derive(Debug, Clone, PartialEq)]
pub struct ForcePalette {
    pub weight: String,
    pub normal: String,
    pub friction: String,
    pub tension: String,
    pub applied: String,
    pub custom: String,
    pub component: String,
}

impl Default for ForcePalette {
    fn default() -> Self {
        Self {
            weight: "#3B82F6".into(),
            normal: "#10B981".into(),
            friction: "#EF4444".into(),
            tension: "#8B5CF6".into(),
            applied: "#F59E0B".into(),
            custom: "#6B7280".into(),
            component: "#9CA3AF".into(),
        }
    }
}

impl ForcePalette {
    pub fn color(&self, kind: ForceKind) -> &str {
        match kind {
            ForceKind::Weight => &self.weight,
            ForceKind::Normal => &self.normal,
            ForceKind::Friction => &self.friction,
            ForceKind::Tension => &self.tension,
            ForceKind::Applied => &self.applied,
            ForceKind::Custom => &self.custom,
            ForceKind::Component => &self.component,
        }
    }
}

/// Colors and sizes used by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub palette: ForcePalette,
    pub axes_color: String,
    pub grid_color: String,
    pub moment_color: String,
    pub point_color: String,
    pub angle_color: String,
    /// Fill for bodies without their own; `None` uses a soft gradient
    pub body_fill: Option<String>,
    pub body_stroke: String,
    pub grid_spacing: f64,
    pub arrow_width: f64,
    pub arrow_head_size: f64,
    pub magnitude_units: MagnitudeUnits,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: ForcePalette::default(),
            axes_color: "#374151".into(),
            grid_color: "#E5E7EB".into(),
            moment_color: "#8B5CF6".into(),
            point_color: "#374151".into(),
            angle_color: "#6B7280".into(),
            body_fill: None,
            body_stroke: "#374151".into(),
            grid_spacing: defaults::GRID_SPACING,
            arrow_width: defaults::FORCE_STROKE_WIDTH,
            arrow_head_size: defaults::ARROW_HEAD_SIZE,
            magnitude_units: MagnitudeUnits::Auto,
        }
    }
}

/// State for one render: the diagram's id scope, config and output
pub(crate) struct RenderContext<'a> {
    pub id: &'a str,
    pub config: &'a RenderConfig,
    pub out: SvgWriter,
}

impl<'a> RenderContext<'a> {
    pub fn new(id: &'a str, config: &'a RenderConfig) -> Self {
        Self {
            id,
            config,
            out: SvgWriter::new(),
        }
    }

    /// Id of the shared arrowhead marker
    pub fn marker_id(&self) -> String {
        format!("{}-arrow", self.id)
    }

    pub fn gradient_id(&self) -> String {
        format!("{}-body-fill", self.id)
    }

    pub fn body_fill(&self) -> String {
        match &self.config.body_fill {
            Some(fill) => fill.clone(),
            None => format!("url(#{})", self.gradient_id()),
        }
    }

    /// Explicit color, else the kind's color; forces without a kind count as applied
    pub fn force_color<'f>(&'f self, force: &'f Force) -> &'f str {
        match (&force.color, force.kind) {
            (Some(color), _) => color,
            (None, Some(kind)) => self.config.palette.color(kind),
            (None, None) => &self.config.palette.applied,
        }
    }

    pub fn force_units(&self, force: &Force) -> MagnitudeUnits {
        force.units.unwrap_or(self.config.magnitude_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_color_precedence() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new("d", &config);
        let plain = Force::new("f", "p", 1.0, 0.0, "F");
        assert_eq!(ctx.force_color(&plain), "#F59E0B");
        let weight = plain.clone().with_kind(ForceKind::Weight);
        assert_eq!(ctx.force_color(&weight), "#3B82F6");
        let painted = weight.with_color("red");
        assert_eq!(ctx.force_color(&painted), "red");
    }

    #[test]
    fn per_force_units_override_config() {
        let config = RenderConfig {
            magnitude_units: MagnitudeUnits::Pixels,
            ..RenderConfig::default()
        };
        let ctx = RenderContext::new("d", &config);
        let mut force = Force::new("f", "p", 5.0, 0.0, "F");
        assert_eq!(ctx.force_units(&force), MagnitudeUnits::Pixels);
        force.units = Some(MagnitudeUnits::Auto);
        assert_eq!(ctx.force_units(&force), MagnitudeUnits::Auto);
    }

    #[test]
    fn default_body_fill_is_scoped_gradient() {
        let config = RenderConfig::default();
        assert_eq!(RenderContext::new("q7", &config).body_fill(), "url(#q7-body-fill)");
    }
}
