//! Label typesetting
//!
//! Turns `\theta`-style escapes into glyphs and `_x` / `^{x}` groups into
//! sub/superscript `<tspan>`s. The result is escaped SVG text content.

const SYMBOLS: &[(&str, &str)] = &[
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("Gamma", "Γ"),
    ("delta", "δ"),
    ("Delta", "Δ"),
    ("epsilon", "ε"),
    ("eta", "η"),
    ("theta", "θ"),
    ("Theta", "Θ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("Sigma", "Σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("Phi", "Φ"),
    ("omega", "ω"),
    ("Omega", "Ω"),
    ("cdot", "·"),
    ("times", "×"),
    ("pm", "±"),
    ("infty", "∞"),
    ("degree", "°"),
    ("deg", "°"),
    ("circ", "°"),
    ("approx", "≈"),
    ("neq", "≠"),
    ("leq", "≤"),
    ("geq", "≥"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("parallel", "∥"),
    ("perp", "⊥"),
    ("sqrt", "√"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("hbar", "ℏ"),
];

/// Glyph for a backslash escape name, if it is one we know
pub fn symbol(name: &str) -> Option<&'static str> {
    SYMBOLS.iter().find(|(n, _)| *n == name).map(|(_, glyph)| *glyph)
}

#[derive(Clone, Copy)]
enum Shift {
    Sub,
    Super,
}

impl Shift {
    fn attr(self) -> &'static str {
        match self {
            Shift::Sub => "sub",
            Shift::Super => "super",
        }
    }
}

/// Typeset a label into SVG text content
pub fn typeset(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let word: String = chars[i + 1..].iter().take_while(|c| c.is_ascii_alphabetic()).collect();
                match symbol(&word) {
                    Some(glyph) => out.push_str(glyph),
                    None => {
                        out.push('\\');
                        out.push_str(&word);
                    }
                }
                i += 1 + word.chars().count();
            }
            '_' | '^' => {
                let shift = if c == '_' { Shift::Sub } else { Shift::Super };
                match group(&chars, i + 1) {
                    Some((content, next)) => {
                        out.push_str(&format!(
                            "<tspan baseline-shift=\"{}\" font-size=\"0.7em\">{}</tspan>",
                            shift.attr(),
                            typeset(&content)
                        ));
                        i = next;
                    }
                    None => {
                        out.push(c);
                        i += 1;
                    }
                }
            }
            '&' => {
                out.push_str("&amp;");
                i += 1;
            }
            '<' => {
                out.push_str("&lt;");
                i += 1;
            }
            '>' => {
                out.push_str("&gt;");
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// The group after `_` or `^`: a braced group or a run of word characters.
/// Returns the content and the index just past it.
fn group(chars: &[char], start: usize) -> Option<(String, usize)> {
    match chars.get(start)? {
        '{' => {
            let mut depth = 0;
            for (offset, &c) in chars[start..].iter().enumerate() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            let end = start + offset;
                            return Some((chars[start + 1..end].iter().collect(), end + 1));
                        }
                    }
                    _ => {}
                }
            }
            None
        }
        c if c.is_alphanumeric() => {
            let run: String = chars[start..].iter().take_while(|c| c.is_alphanumeric()).collect();
            let len = run.chars().count();
            Some((run, start + len))
        }
        _ => None,
    }
}
