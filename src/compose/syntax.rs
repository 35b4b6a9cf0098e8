//! Combination strings
//!
//! ```text
//! SERIES:incline,hanging
//! PARALLEL:incline(30),incline(45)
//! GRID:2:incline,hanging,pulley,beam
//! COMPARE:Smooth|incline(30,10,false),Rough|incline(30,10,true)
//! ```
//!
//! Mode tags are case-insensitive. A segment may be double-quoted to carry
//! `,` or `|` literally.

use pest::Parser;
use pest::iterators::Pair;

use super::{CompositionEntry, Layout};
use crate::errors::{NotationError, named_source};
use crate::preset::parse_arguments;
use crate::{NotationParser, Rule};

/// Mode prefixes recognised by the inline extractor
pub const PREFIXES: &[&str] = &["SERIES:", "PARALLEL:", "GRID:", "COMPARE:"];

/// Whether `text` starts with a combination mode tag
pub fn is_combination(text: &str) -> bool {
    let text = text.trim_start();
    PREFIXES.iter().any(|p| text.starts_with(p))
}

/// A parsed combination string
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub layout: Layout,
    pub entries: Vec<CompositionEntry>,
}

impl Combination {
    /// Id given to the composed diagram: `combo-series`, `combo-grid`, ...
    pub fn default_id(&self) -> &'static str {
        match self.layout {
            Layout::Series => "combo-series",
            Layout::Parallel => "combo-parallel",
            Layout::Grid { .. } => "combo-grid",
            Layout::Comparison { .. } => "combo-compare",
        }
    }
}

pub fn parse_combination(syntax: &str) -> Result<Combination, NotationError> {
    let mut pairs = NotationParser::parse(Rule::combination, syntax).map_err(|e| {
        let (start, end) = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, pos),
            pest::error::InputLocation::Span(span) => span,
        };
        NotationError::Combination {
            message: e.variant.message().into_owned(),
            src: named_source("combination", syntax),
            span: (start, end.saturating_sub(start)).into(),
        }
    })?;

    let mode = pairs
        .next()
        .and_then(|combination| combination.into_inner().next())
        .ok_or_else(|| NotationError::Combination {
            message: "missing mode".into(),
            src: named_source("combination", syntax),
            span: (0, syntax.len()).into(),
        })?;

    let rule = mode.as_rule();
    let mut layout = match rule {
        Rule::series => Layout::Series,
        Rule::parallel => Layout::Parallel,
        Rule::compare => Layout::Comparison { title: None },
        _ => Layout::Grid { columns: 1 },
    };
    let mut entries = Vec::new();

    for inner in mode.into_inner() {
        match inner.as_rule() {
            Rule::columns => {
                let columns = inner.as_str().parse::<usize>().unwrap_or(1).max(1);
                layout = Layout::Grid { columns };
            }
            Rule::entry_list => {
                for entry in inner.into_inner() {
                    let segment = entry.into_inner().next();
                    entries.push(segment.map(preset_entry).unwrap_or_default());
                }
            }
            Rule::compare_list => {
                for entry in inner.into_inner() {
                    let mut segments = entry.into_inner();
                    let first = segments.next();
                    let second = segments.next();
                    entries.push(match (first, second) {
                        (Some(label), Some(preset)) => {
                            let label = segment_text(label);
                            preset_entry(preset).with_label(label)
                        }
                        // No label given: the preset names itself
                        (Some(preset), None) => preset_entry(preset),
                        _ => CompositionEntry::default(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(Combination { layout, entries })
}

fn segment_text(segment: Pair<'_, Rule>) -> String {
    let raw = segment.as_str().trim();
    match segment.into_inner().next() {
        Some(inner) if inner.as_rule() == Rule::quoted => {
            inner.into_inner().next().map(|q| q.as_str().to_string()).unwrap_or_default()
        }
        _ => raw.to_string(),
    }
}

/// `name` or `name(args)`
fn preset_entry(segment: Pair<'_, Rule>) -> CompositionEntry {
    let text = segment_text(segment);
    let text = text.trim();
    match text.find('(') {
        Some(open) if text.ends_with(')') => CompositionEntry::new(text[..open].trim())
            .with_args(parse_arguments(&text[open + 1..text.len() - 1])),
        _ => CompositionEntry::new(text),
    }
}
