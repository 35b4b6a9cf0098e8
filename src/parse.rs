//! Compact-text notation to [`Diagram`]
//!
//! Two forms are accepted:
//!
//! ```text
//! PRESET:incline(30, 10, true)
//! P1(300,200,A) | F1@P1(80,0,F,applied) F2@P1(60,90,N,normal) | axes=true
//! ```
//!
//! Malformed tokens in the custom form are skipped and reported as
//! [`Warning`]s; only an unusable notation as a whole is an error.

use pest::Parser;
use pest::iterators::Pair;

use crate::builder::DiagramBuilder;
use crate::errors::{NotationError, Warning, named_source};
use crate::log;
use crate::model::{Diagram, Force, ForceKind};
use crate::preset::{self, PresetArg, PresetRegistry, parse_arguments};
use crate::{NotationParser, Rule};

const PRESET_PREFIX: &str = "PRESET:";

/// A diagram together with everything that was dropped while reading it
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub diagram: Diagram,
    pub warnings: Vec<Warning>,
}

/// Parses notation, resolving preset names through a borrowed registry
#[derive(Debug, Clone, Copy)]
pub struct DiagramParser<'r> {
    registry: &'r PresetRegistry,
}

impl Default for DiagramParser<'static> {
    fn default() -> Self {
        Self::new(preset::builtin())
    }
}

impl<'r> DiagramParser<'r> {
    pub fn new(registry: &'r PresetRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r PresetRegistry {
        self.registry
    }

    /// Parse `text` into a diagram with the given id, or `None`
    pub fn parse(&self, text: &str, id: &str) -> Option<Diagram> {
        self.parse_detailed(text, id).ok().map(|parsed| parsed.diagram)
    }

    pub fn parse_detailed(&self, text: &str, id: &str) -> Result<Parsed, NotationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NotationError::Empty);
        }
        if text.starts_with(PRESET_PREFIX) {
            return self.parse_preset(text, id).map(|diagram| Parsed {
                diagram,
                warnings: Vec::new(),
            });
        }
        parse_custom(text, id)
    }

    fn parse_preset(&self, text: &str, id: &str) -> Result<Diagram, NotationError> {
        let mut pairs = NotationParser::parse(Rule::preset, text).map_err(|e| syntax_error(text, &e))?;

        let mut name = "";
        let mut args: Vec<PresetArg> = Vec::new();
        if let Some(call) = pairs.next() {
            for inner in call.into_inner() {
                match inner.as_rule() {
                    Rule::preset_name => name = inner.as_str(),
                    Rule::preset_args => args = parse_arguments(inner.as_str()),
                    _ => {}
                }
            }
        }
        let key = name.to_lowercase();

        let failure = match self.registry.generate(&key, id, &args) {
            Some(Ok(diagram)) => return Ok(diagram),
            Some(Err(source)) => Some(source),
            None => None,
        };

        if let Some(diagram) = preset::legacy::generate(&key, id, &args) {
            log::debug!(preset = %key, "resolved by legacy preset table");
            return Ok(diagram);
        }

        Err(match failure {
            Some(source) => NotationError::Generator { name: key, source },
            None => NotationError::UnknownPreset { name: key },
        })
    }
}

/// Parse with the built-in registry
pub fn parse(text: &str, id: &str) -> Option<Diagram> {
    DiagramParser::default().parse(text, id)
}

pub fn parse_detailed(text: &str, id: &str) -> Result<Parsed, NotationError> {
    DiagramParser::default().parse_detailed(text, id)
}

fn syntax_error(text: &str, error: &pest::error::Error<Rule>) -> NotationError {
    let (start, end) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span(span) => span,
    };
    NotationError::Syntax {
        message: error.variant.message().into_owned(),
        src: named_source("notation", text),
        span: (start, end.saturating_sub(start)).into(),
    }
}

// ============================================================================
// Custom form
// ============================================================================

fn parse_custom(text: &str, id: &str) -> Result<Parsed, NotationError> {
    let mut sections = text.split('|').map(str::trim);
    let points = sections.next().unwrap_or_default();
    let forces = sections.next().unwrap_or_default();
    let options = sections.next().unwrap_or_default();

    let mut warnings = Vec::new();
    let mut builder = DiagramBuilder::with_size(id, 600.0, 400.0);
    let mut point_count = 0;

    for pair in section(Rule::points_section, points) {
        match pair.as_rule() {
            Rule::point => match read_point(pair.clone()) {
                Some((pid, x, y, label)) => {
                    builder = builder.add_point(pid, x, y, label.as_deref());
                    point_count += 1;
                }
                None => skip(&mut warnings, Warning::SkippedPoint { token: pair.as_str().into() }),
            },
            Rule::junk => skip(&mut warnings, Warning::SkippedPoint { token: pair.as_str().into() }),
            _ => {}
        }
    }

    if point_count == 0 {
        return Err(NotationError::NoPoints);
    }

    for pair in section(Rule::forces_section, forces) {
        match pair.as_rule() {
            Rule::force => {
                let token = pair.as_str();
                match read_force(pair.clone(), &mut warnings) {
                    Some(force) => builder = builder.push_force(force),
                    None => skip(&mut warnings, Warning::SkippedForce { token: token.into() }),
                }
            }
            Rule::junk => skip(&mut warnings, Warning::SkippedForce { token: pair.as_str().into() }),
            _ => {}
        }
    }

    for pair in section(Rule::options_section, options) {
        match pair.as_rule() {
            Rule::option => {
                let mut inner = pair.into_inner();
                let (Some(key), Some(value)) = (inner.next(), inner.next()) else {
                    continue;
                };
                let on = value.as_str() == "true";
                builder = match key.as_str() {
                    "axes" => builder.show_axes(on),
                    "grid" => builder.show_grid(on),
                    "angles" => builder.show_angles(on),
                    other => {
                        skip(&mut warnings, Warning::UnknownOption { key: other.into() });
                        builder
                    }
                };
            }
            Rule::junk => skip(&mut warnings, Warning::SkippedOption { token: pair.as_str().into() }),
            _ => {}
        }
    }

    Ok(Parsed {
        diagram: builder.build(),
        warnings,
    })
}

fn skip(warnings: &mut Vec<Warning>, warning: Warning) {
    log::debug!(%warning, "skipping token");
    warnings.push(warning);
}

/// Top-level pairs of one section; the section rules accept any input
fn section(rule: Rule, text: &str) -> Vec<Pair<'_, Rule>> {
    match NotationParser::parse(rule, text) {
        Ok(mut pairs) => pairs.next().map(|p| p.into_inner().collect()).unwrap_or_default(),
        Err(e) => {
            log::debug!(error = %e, "section did not parse");
            Vec::new()
        }
    }
}

fn number(pair: Option<Pair<'_, Rule>>) -> Option<f64> {
    pair.filter(|p| p.as_rule() == Rule::number)?
        .as_str()
        .parse()
        .ok()
}

fn read_point(pair: Pair<'_, Rule>) -> Option<(String, f64, f64, Option<String>)> {
    let mut inner = pair.into_inner();
    let id = inner.next()?.as_str().to_string();
    let x = number(inner.next())?;
    let y = number(inner.next())?;
    let label = inner
        .next()
        .map(|p| p.as_str().trim().to_string())
        .filter(|l| !l.is_empty());
    Some((id, x, y, label))
}

fn read_force(pair: Pair<'_, Rule>, warnings: &mut Vec<Warning>) -> Option<Force> {
    let mut inner = pair.into_inner();
    let id = inner.next()?.as_str();
    let point_id = inner.next()?.as_str();
    let magnitude = number(inner.next())?;
    let angle = number(inner.next())?;
    let label = inner.next()?.as_str().trim();

    let mut force = Force::new(id, point_id, magnitude, angle, label);
    if let Some(kind) = inner.next() {
        match kind.as_str().parse::<ForceKind>() {
            Ok(kind) => force.kind = Some(kind),
            Err(_) => skip(
                warnings,
                Warning::UnknownForceKind {
                    force: id.into(),
                    kind: kind.as_str().into(),
                },
            ),
        }
    }
    Some(force)
}

// ============================================================================
// Export
// ============================================================================

/// Write a diagram back out in the custom form.
///
/// Bodies, moments and markup have no notation and are dropped; empty
/// sections are left out.
pub fn to_compact_text(diagram: &Diagram) -> String {
    let points = diagram
        .points
        .iter()
        .map(|p| match &p.label {
            Some(label) => format!("{}({},{},{})", p.id, p.x, p.y, label),
            None => format!("{}({},{})", p.id, p.x, p.y),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let forces = diagram
        .forces
        .iter()
        .map(|f| match f.kind {
            Some(kind) => format!("{}@{}({},{},{},{})", f.id, f.point_id, f.magnitude, f.angle, f.label, kind),
            None => format!("{}@{}({},{},{})", f.id, f.point_id, f.magnitude, f.angle, f.label),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let options = [("axes", diagram.show_axes), ("grid", diagram.show_grid), ("angles", diagram.show_angles)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
        .collect::<Vec<_>>()
        .join(" ");

    [points, forces, options]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
