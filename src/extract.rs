//! Diagrams embedded in prose
//!
//! Notation inside `##...##` (on a single line) is parsed and replaced by a
//! `__FBD_<n>__` placeholder, where `n` indexes [`Extracted::diagrams`].
//! Spans that do not parse stay in the text as written.
//!
//! ```text
//! A block rests on a slope: ##PRESET:incline(30,10,true)## Find N.
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::compose::{self, Composer};
use crate::errors::NotationError;
use crate::log;
use crate::model::Diagram;
use crate::parse::DiagramParser;
use crate::preset::{self, PresetRegistry};

static DELIMITED: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"##(.*?)##").ok());
static PLACEHOLDER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"__FBD_(\d+)__").ok());

/// The placeholder token for the `index`th extracted diagram
pub fn placeholder(index: usize) -> String {
    format!("__FBD_{index}__")
}

/// Result of [`extract`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    /// Input text with each parsed span replaced by its placeholder
    pub clean_text: String,
    pub diagrams: Vec<Diagram>,
    /// `placeholders[i]` stands for `diagrams[i]`
    pub placeholders: Vec<String>,
}

impl Extracted {
    pub fn segments(&self) -> Vec<Segment<'_>> {
        expand(&self.clean_text, &self.diagrams)
    }

    /// The clean text with every placeholder replaced by its diagram's markup
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.clean_text.len());
        for segment in self.segments() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Diagram(diagram) => out.push_str(&diagram.markup()),
            }
        }
        out
    }
}

/// A piece of expanded text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Diagram(&'a Diagram),
}

/// Finds and parses inline notation with a given registry
#[derive(Debug, Clone)]
pub struct InlineExtractor<'r> {
    parser: DiagramParser<'r>,
    composer: Composer<'r>,
}

impl Default for InlineExtractor<'static> {
    fn default() -> Self {
        Self::new(preset::builtin())
    }
}

impl<'r> InlineExtractor<'r> {
    pub fn new(registry: &'r PresetRegistry) -> Self {
        Self {
            parser: DiagramParser::new(registry),
            composer: Composer::new(registry),
        }
    }

    /// Use a composer with a custom layout configuration
    pub fn with_composer(mut self, composer: Composer<'r>) -> Self {
        self.composer = composer;
        self
    }

    /// One span's notation to a diagram. Combination strings go to the
    /// composer first; if that fails they are tried as plain notation.
    fn diagram(&self, notation: &str, index: usize) -> Result<Diagram, NotationError> {
        if compose::is_combination(notation) {
            match compose::parse_combination(notation) {
                Ok(combination) => {
                    let id = format!("inline-combo-{index}");
                    let composition = self.composer.compose(&id, &combination.layout, &combination.entries);
                    return Ok(composition.diagram);
                }
                Err(e) => log::debug!(notation, error = %e, "not a combination, trying plain notation"),
            }
        }
        self.parser
            .parse_detailed(notation, &format!("inline-fbd-{index}"))
            .map(|parsed| parsed.diagram)
    }

    pub fn extract(&self, text: &str) -> Extracted {
        let mut extracted = Extracted::default();
        let Some(re) = DELIMITED.as_ref() else {
            extracted.clean_text = text.to_string();
            return extracted;
        };

        let mut last = 0;
        for caps in re.captures_iter(text) {
            let (Some(span), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let notation = inner.as_str().trim();
            let index = extracted.diagrams.len();

            match self.diagram(notation, index) {
                Ok(diagram) => {
                    let token = placeholder(index);
                    extracted.clean_text.push_str(&text[last..span.start()]);
                    extracted.clean_text.push_str(&token);
                    extracted.diagrams.push(diagram);
                    extracted.placeholders.push(token);
                    last = span.end();
                }
                Err(e) => log::warn!(notation, error = %e, "inline diagram left as text"),
            }
        }
        extracted.clean_text.push_str(&text[last..]);
        extracted
    }

    /// One message per span that would be left as text by [`extract`](Self::extract)
    pub fn validate(&self, text: &str) -> Vec<String> {
        let Some(re) = DELIMITED.as_ref() else {
            return Vec::new();
        };
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|inner| {
                let notation = inner.as_str().trim();
                self.diagram(notation, 0)
                    .err()
                    .map(|e| format!("invalid diagram `{notation}`: {e}"))
            })
            .collect()
    }

    pub fn render(&self, text: &str) -> String {
        self.extract(text).render()
    }
}

/// Extract with the built-in registry
pub fn extract(text: &str) -> Extracted {
    InlineExtractor::default().extract(text)
}

/// Split `text` at placeholder tokens.
///
/// A placeholder whose index has no diagram stays in the surrounding text.
/// Text with no usable placeholder comes back as a single segment; empty
/// text gives none.
pub fn expand<'a>(text: &'a str, diagrams: &'a [Diagram]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let Some(re) = PLACEHOLDER.as_ref() else {
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        return segments;
    };

    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(token), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(diagram) = digits.as_str().parse::<usize>().ok().and_then(|i| diagrams.get(i)) else {
            log::debug!(token = token.as_str(), "placeholder without a diagram, kept as text");
            continue;
        };
        if token.start() > last {
            segments.push(Segment::Text(&text[last..token.start()]));
        }
        segments.push(Segment::Diagram(diagram));
        last = token.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    if segments.is_empty() && !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

pub fn has_inline_diagrams(text: &str) -> bool {
    DELIMITED.as_ref().is_some_and(|re| re.is_match(text))
}

/// Problems with the inline notation in `text`, empty when all of it parses
pub fn validate_inline(text: &str) -> Vec<String> {
    InlineExtractor::default().validate(text)
}

/// Replace every parsable span in `text` with rendered markup
pub fn render_inline(text: &str) -> String {
    InlineExtractor::default().render(text)
}
