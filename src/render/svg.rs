//! SVG generation
//!
//! Markup is built as strings: a small element builder and an indenting
//! writer. Attribute values are escaped on the way in and numbers go through
//! [`fmt_num`], so output is stable across platforms.

/// Format a coordinate: rounded to three decimals, trailing zeros trimmed
pub(crate) fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.3}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, false);
    out
}

pub(crate) fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, true);
    out
}

/// Copies unescaped runs as whole slices; quotes only matter inside attributes
fn escape_into(out: &mut String, text: &str, quotes: bool) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' if quotes => "&quot;",
            b'\'' if quotes => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

/// Escape a string for use as a CSS id selector
pub(crate) fn css_ident(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for (i, c) in id.chars().enumerate() {
        if c.is_ascii_digit() && i == 0 {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// Inner content of an SVG document, without the XML prolog and the root
/// `<svg>` element. Markup without a root is returned trimmed.
pub fn strip_root(markup: &str) -> &str {
    let mut s = markup.trim();
    if s.starts_with("<?xml") {
        if let Some(end) = s.find("?>") {
            s = s[end + 2..].trim_start();
        }
    }
    if !s.starts_with("<svg") {
        return s;
    }
    let Some(open_end) = s.find('>') else {
        return s;
    };
    if s[..open_end].ends_with('/') {
        return "";
    }
    let inner = &s[open_end + 1..];
    inner.strip_suffix("</svg>").unwrap_or(inner).trim()
}

/// Something that can be written as an attribute value
pub(crate) trait AttrValue {
    fn to_attr(&self) -> String;
}

impl AttrValue for f64 {
    fn to_attr(&self) -> String {
        fmt_num(*self)
    }
}

impl AttrValue for usize {
    fn to_attr(&self) -> String {
        self.to_string()
    }
}

impl AttrValue for &str {
    fn to_attr(&self) -> String {
        escape_attr(self)
    }
}

impl AttrValue for String {
    fn to_attr(&self) -> String {
        escape_attr(self)
    }
}

impl AttrValue for &String {
    fn to_attr(&self) -> String {
        escape_attr(self)
    }
}

/// One SVG element with its attributes, in insertion order
#[derive(Debug, Clone)]
pub(crate) struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl AttrValue) -> Self {
        self.attrs.push((key, value.to_attr()));
        self
    }

    pub fn attr_opt(self, key: &'static str, value: Option<impl AttrValue>) -> Self {
        match value {
            Some(v) => self.attr(key, v),
            None => self,
        }
    }

    /// `points="x,y x,y ..."` for polygons and polylines
    pub fn points(self, points: &[glam::DVec2]) -> Self {
        let list = points
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.attr("points", list)
    }

    fn open_tag(&self, self_closing: bool) -> String {
        let mut tag = format!("<{}", self.name);
        for (key, value) in &self.attrs {
            tag.push_str(&format!(" {key}=\"{value}\""));
        }
        tag.push_str(if self_closing { "/>" } else { ">" });
        tag
    }
}

/// Accumulates indented SVG markup
#[derive(Debug, Default)]
pub(crate) struct SvgWriter {
    out: String,
    open: Vec<&'static str>,
}

impl SvgWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.open.len() {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write `<name ...>` and indent until the matching [`close`](Self::close)
    pub fn open(&mut self, element: &Element) {
        self.line(&element.open_tag(false));
        self.open.push(element.name);
    }

    pub fn close(&mut self) {
        if let Some(name) = self.open.pop() {
            self.line(&format!("</{name}>"));
        }
    }

    /// A self-closing element
    pub fn leaf(&mut self, element: &Element) {
        self.line(&element.open_tag(true));
    }

    /// An element around plain text, which is escaped
    pub fn text(&mut self, element: &Element, text: &str) {
        self.markup(element, &escape_text(text));
    }

    /// An element around markup that is already escaped
    pub fn markup(&mut self, element: &Element, inner: &str) {
        let line = format!("{}{}</{}>", element.open_tag(false), inner, element.name);
        self.line(&line);
    }

    /// Trusted markup, one output line per input line
    pub fn raw(&mut self, markup: &str) {
        for line in markup.lines() {
            let line = line.trim_end();
            if !line.is_empty() {
                self.line(line);
            }
        }
    }

    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(300.0), "300");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(fmt_num(-7.25), "-7.25");
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_text(r#"it's "F""#), r#"it's "F""#);
        assert_eq!(escape_attr("m₁ > 'a'"), "m₁ &gt; &#39;a&#39;");
        assert_eq!(css_ident("fbd.1"), "fbd\\.1");
        assert_eq!(css_ident("1a"), "\\31 a");
    }

    #[test]
    fn strip_root_variants() {
        assert_eq!(strip_root(r#"<svg width="1"><g/></svg>"#), "<g/>");
        assert_eq!(strip_root(r#"<?xml version="1.0"?> <svg><rect/></svg>"#), "<rect/>");
        assert_eq!(strip_root("<svg/>"), "");
        assert_eq!(strip_root("  <path d='M0 0'/> "), "<path d='M0 0'/>");
    }

    #[test]
    fn writer_nests_and_closes() {
        let mut w = SvgWriter::new();
        w.open(&Element::new("g").attr("class", "x"));
        w.leaf(&Element::new("circle").attr("r", 4.0));
        w.text(&Element::new("text"), "a<b");
        let out = w.finish();
        assert_eq!(out, "<g class=\"x\">\n  <circle r=\"4\"/>\n  <text>a&lt;b</text>\n</g>\n");
    }
}
