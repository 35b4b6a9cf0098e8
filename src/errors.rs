//! Error, warning and validation types
//!
//! Nothing in this crate raises: notation failures come back as
//! [`NotationError`] (with source spans for miette reports), soft failures
//! as [`Warning`]s next to a produced diagram, and broken references as
//! [`ValidationIssue`]s.

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Build a miette source for a notation string
pub fn named_source(name: impl AsRef<str>, source: impl Into<String>) -> NamedSource<String> {
    NamedSource::new(name, source.into())
}

// ============================================================================
// Notation Errors
// ============================================================================

/// Why a notation produced no diagram
#[derive(Error, Diagnostic, Debug)]
pub enum NotationError {
    #[error("empty notation")]
    #[diagnostic(code(fbdraw::notation::empty))]
    Empty,

    #[error("malformed preset call: {message}")]
    #[diagnostic(
        code(fbdraw::notation::syntax),
        help("presets are written as PRESET:name(arg, arg, ...)")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("malformed combination: {message}")]
    #[diagnostic(
        code(fbdraw::notation::combination),
        help("use SERIES:a,b  PARALLEL:a,b  GRID:2:a,b,c  or  COMPARE:Label|a,Label|b")
    )]
    Combination {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown preset: {name}")]
    #[diagnostic(
        code(fbdraw::preset::unknown),
        help("register a generator under that name, or use one of incline, hanging, pulley, beam")
    )]
    UnknownPreset { name: String },

    #[error("preset `{name}` failed to generate a diagram")]
    #[diagnostic(code(fbdraw::preset::generator_failed))]
    Generator {
        name: String,
        #[source]
        source: GeneratorError,
    },

    #[error("notation declares no points")]
    #[diagnostic(
        code(fbdraw::notation::no_points),
        help("a custom diagram needs at least one point, e.g. `P1(300,200,A) | F1@P1(80,0,F)`")
    )]
    NoPoints,
}

/// Failure reported by a preset generator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("argument {index} should be {expected}")]
    InvalidArgument { index: usize, expected: &'static str },

    #[error("{0}")]
    Failed(String),

    #[error("generator panicked: {0}")]
    Panicked(String),
}

// ============================================================================
// Warnings
// ============================================================================

/// A soft failure: the diagram was produced, but some input was dropped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("skipped malformed point `{token}`")]
    SkippedPoint { token: String },

    #[error("skipped malformed force `{token}`")]
    SkippedForce { token: String },

    #[error("skipped malformed option `{token}`")]
    SkippedOption { token: String },

    #[error("ignored unknown option `{key}`")]
    UnknownOption { key: String },

    #[error("force `{force}` has unknown kind `{kind}`")]
    UnknownForceKind { force: String, kind: String },
}

// ============================================================================
// Validation
// ============================================================================

/// Which collection an element id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Point,
    Force,
    Moment,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Point => write!(f, "point"),
            ElementKind::Force => write!(f, "force"),
            ElementKind::Moment => write!(f, "moment"),
        }
    }
}

/// A broken structural invariant found by [`crate::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    #[error("diagram must have an id")]
    MissingId,

    #[error("invalid width: {0}")]
    InvalidWidth(f64),

    #[error("invalid height: {0}")]
    InvalidHeight(f64),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: ElementKind, id: String },

    #[error("force {index} references non-existent point: {point_id}")]
    DanglingForce { index: usize, point_id: String },

    #[error("moment {index} references non-existent point: {point_id}")]
    DanglingMoment { index: usize, point_id: String },
}
