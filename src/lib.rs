//! Free body diagrams from a compact text notation, rendered to SVG.
//!
//! ```
//! let diagram = fbdraw::parse("P1(300,200,A) | F1@P1(80,0,F,applied) | axes=true", "demo").unwrap();
//! assert_eq!(diagram.forces.len(), 1);
//! assert!(diagram.markup().starts_with("<svg"));
//! ```
//!
//! Notation can also sit inside ordinary text between `##` delimiters; see
//! [`extract`] and [`render_inline`].

use pest_derive::Parser;

pub mod builder;
pub mod calc;
pub mod compose;
pub mod errors;
pub mod extract;
mod log;
pub mod model;
pub mod parse;
pub mod preset;
pub mod render;
pub mod types;

pub use builder::{DiagramBuilder, ForceSpec, simple_diagram};
pub use compose::{Composer, Composition, CompositionEntry, Layout};
pub use errors::{GeneratorError, NotationError, ValidationIssue, Warning};
pub use extract::{Extracted, Segment, expand, extract, has_inline_diagrams, render_inline, validate_inline};
pub use model::{Body, BodyKind, Diagram, Force, ForceKind, Moment, MomentDirection, Point, PointKind, validate};
pub use parse::{DiagramParser, Parsed, parse, parse_detailed, to_compact_text};
pub use preset::{DiagramGenerator, PresetArg, PresetRegistry};
pub use render::{RenderConfig, render, render_with};

#[derive(Parser)]
#[grammar = "notation.pest"]
pub struct NotationParser;

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_preset_call() {
        let result = NotationParser::parse(Rule::preset, "PRESET:incline(30, 10, true)");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_bare_preset() {
        let result = NotationParser::parse(Rule::preset, "PRESET:beam");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn preset_args_run_to_last_paren() {
        let mut pairs = NotationParser::parse(Rule::preset, "PRESET:f(g(1), [2,3])").unwrap();
        let args = pairs
            .next()
            .unwrap()
            .into_inner()
            .find(|p| p.as_rule() == Rule::preset_args)
            .unwrap();
        assert_eq!(args.as_str(), "g(1), [2,3]");
    }

    #[test]
    fn parse_point_with_label() {
        let result = NotationParser::parse(Rule::point, "P1(300, 200, Block A)");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_force_with_kind() {
        let result = NotationParser::parse(Rule::force, "F1@P1(80,-30.5,F_{net},applied)");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn junk_is_tolerated_in_sections() {
        let result = NotationParser::parse(Rule::points_section, "P1(1,2) garbage P2(3,4)");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
        let result = NotationParser::parse(Rule::options_section, "axes=true =oops");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_grid_combination() {
        let result = NotationParser::parse(Rule::combination, "GRID:2:incline(30),\"a,b\",,beam");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_compare_combination() {
        let result = NotationParser::parse(Rule::combination, "compare:Smooth|incline(30,10,false), Rough|incline");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_unbalanced_combination() {
        assert!(NotationParser::parse(Rule::combination, "SERIES:incline(30").is_err());
    }

    #[test]
    fn round_trip_through_public_api() {
        let d = DiagramBuilder::new("api")
            .add_point("A", 100.0, 100.0, Some("A"))
            .add_force("F", "A", 50.0, 45.0, "F", Some(ForceKind::Applied))
            .build();
        assert!(validate(&d).is_empty());
        let again = parse(&to_compact_text(&d), "api").unwrap();
        assert_eq!(again.points, d.points);
        assert_eq!(again.forces, d.forces);
    }
}
