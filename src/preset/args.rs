//! Preset call arguments
//!
//! `PRESET:name(a, b, ...)` arguments are split on top-level commas (commas
//! nested in `[]` or `{}` do not split) and each piece is coerced in order:
//! boolean, number, JSON-ish literal, quoted string, raw string.

use std::fmt;

use serde_json::Value;

/// One coerced argument of a preset call
#[derive(Debug, Clone, PartialEq)]
pub enum PresetArg {
    Bool(bool),
    Number(f64),
    Str(String),
    /// An array or object literal
    Literal(Value),
}

impl PresetArg {
    /// Numeric value, also accepting numeric strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PresetArg::Number(n) => Some(*n),
            PresetArg::Str(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            PresetArg::Literal(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PresetArg::Bool(b) => Some(*b),
            PresetArg::Str(s) if s == "true" => Some(true),
            PresetArg::Str(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PresetArg::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PresetArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetArg::Bool(b) => write!(f, "{b}"),
            PresetArg::Number(n) => write!(f, "{n}"),
            PresetArg::Str(s) => f.write_str(s),
            PresetArg::Literal(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for PresetArg {
    fn from(n: f64) -> Self {
        PresetArg::Number(n)
    }
}

impl From<bool> for PresetArg {
    fn from(b: bool) -> Self {
        PresetArg::Bool(b)
    }
}

impl From<&str> for PresetArg {
    fn from(s: &str) -> Self {
        PresetArg::Str(s.to_string())
    }
}

/// Split and coerce a raw argument list.
///
/// Empty pieces between commas become empty strings; a trailing empty piece
/// is dropped, so `""` yields no arguments.
pub fn parse_arguments(raw: &str) -> Vec<PresetArg> {
    let mut args = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                args.push(coerce(raw[start..i].trim()));
                start = i + 1;
            }
            _ => {}
        }
    }

    let rest = raw[start..].trim();
    if !rest.is_empty() {
        args.push(coerce(rest));
    }
    args
}

/// Coerce a single trimmed argument
pub fn coerce(value: &str) -> PresetArg {
    match value {
        "true" => return PresetArg::Bool(true),
        "false" => return PresetArg::Bool(false),
        _ => {}
    }

    if let Some(n) = parse_number(value) {
        return PresetArg::Number(n);
    }

    let bracketed = (value.starts_with('[') && value.ends_with(']'))
        || (value.starts_with('{') && value.ends_with('}'));
    if bracketed {
        return match serde_json::from_str(&value.replace('\'', "\"")) {
            Ok(literal) => PresetArg::Literal(literal),
            Err(_) => PresetArg::Str(value.to_string()),
        };
    }

    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return PresetArg::Str(value[1..value.len() - 1].to_string());
        }
    }

    PresetArg::Str(value.to_string())
}

fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    // Words like "inf" and "NaN" stay strings
    if value.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_coerced() {
        assert_eq!(
            parse_arguments("30, 10, true, 'rough', plain"),
            vec![
                PresetArg::Number(30.0),
                PresetArg::Number(10.0),
                PresetArg::Bool(true),
                PresetArg::Str("rough".into()),
                PresetArg::Str("plain".into()),
            ]
        );
    }

    #[test]
    fn nested_commas_do_not_split() {
        let args = parse_arguments("[1, 2, 3], {'a': 1, 'b': [4,5]}, -2.5");
        assert_eq!(args[0], PresetArg::Literal(json!([1, 2, 3])));
        assert_eq!(args[1], PresetArg::Literal(json!({"a": 1, "b": [4, 5]})));
        assert_eq!(args[2], PresetArg::Number(-2.5));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn bad_literal_falls_back_to_raw_text() {
        assert_eq!(coerce("[1, 2,"), PresetArg::Str("[1, 2,".into()));
        assert_eq!(coerce("{oops}"), PresetArg::Str("{oops}".into()));
    }

    #[test]
    fn empty_pieces() {
        assert!(parse_arguments("").is_empty());
        assert!(parse_arguments("   ").is_empty());
        assert_eq!(
            parse_arguments("1,,2,"),
            vec![PresetArg::Number(1.0), PresetArg::Str(String::new()), PresetArg::Number(2.0)]
        );
    }

    #[test]
    fn non_finite_words_stay_strings() {
        assert_eq!(coerce("inf"), PresetArg::Str("inf".into()));
        assert_eq!(coerce("NaN"), PresetArg::Str("NaN".into()));
        assert_eq!(coerce("1e3"), PresetArg::Number(1000.0));
    }

    #[test]
    fn accessor_conversions() {
        assert_eq!(PresetArg::Str("12".into()).as_f64(), Some(12.0));
        assert_eq!(PresetArg::Str("true".into()).as_bool(), Some(true));
        assert_eq!(PresetArg::Number(1.0).as_bool(), None);
    }
}
