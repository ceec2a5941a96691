//! LaTeX character decoding
//!
//! Decodes LaTeX accents, escaped specials, ligatures and common symbols to
//! Unicode. Accents are applied as combining marks and composed with NFC, so
//! any base letter works, not only a fixed table of accented characters.
//! Formatting commands such as `\emph{...}` are dropped and their argument
//! kept; grouping braces are left in place for the caller to strip.

use lazy_static::lazy_static;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Control words that stand for a character or symbol
    static ref SYMBOLS: HashMap<&'static str, &'static str> = [
        // Letters and ligatures
        ("ae", "æ"), ("AE", "Æ"), ("oe", "œ"), ("OE", "Œ"),
        ("o", "ø"), ("O", "Ø"), ("l", "ł"), ("L", "Ł"),
        ("ss", "ß"), ("aa", "å"), ("AA", "Å"),
        ("i", "ı"), ("j", "ȷ"),
        // Text symbols
        ("textendash", "–"), ("textemdash", "—"),
        ("ldots", "…"), ("dots", "…"), ("textellipsis", "…"),
        ("copyright", "©"), ("textregistered", "®"), ("texttrademark", "™"),
        ("pounds", "£"), ("euro", "€"), ("S", "§"), ("P", "¶"),
        ("dag", "†"), ("ddag", "‡"), ("textbullet", "•"),
        ("textasciitilde", "~"), ("textbackslash", "\\"), ("textdegree", "°"),
        // Greek
        ("alpha", "α"), ("beta", "β"), ("gamma", "γ"), ("delta", "δ"),
        ("epsilon", "ε"), ("varepsilon", "ε"), ("zeta", "ζ"), ("eta", "η"),
        ("theta", "θ"), ("iota", "ι"), ("kappa", "κ"), ("lambda", "λ"),
        ("mu", "μ"), ("nu", "ν"), ("xi", "ξ"), ("pi", "π"), ("rho", "ρ"),
        ("sigma", "σ"), ("tau", "τ"), ("upsilon", "υ"), ("phi", "φ"),
        ("varphi", "φ"), ("chi", "χ"), ("psi", "ψ"), ("omega", "ω"),
        ("Gamma", "Γ"), ("Delta", "Δ"), ("Theta", "Θ"), ("Lambda", "Λ"),
        ("Xi", "Ξ"), ("Pi", "Π"), ("Sigma", "Σ"), ("Upsilon", "Υ"),
        ("Phi", "Φ"), ("Psi", "Ψ"), ("Omega", "Ω"),
        // Math
        ("times", "×"), ("div", "÷"), ("pm", "±"), ("mp", "∓"), ("cdot", "·"),
        ("leq", "≤"), ("geq", "≥"), ("neq", "≠"), ("approx", "≈"), ("sim", "∼"),
        ("propto", "∝"), ("infty", "∞"), ("partial", "∂"), ("nabla", "∇"),
        ("to", "→"), ("rightarrow", "→"), ("leftarrow", "←"),
    ]
    .into_iter()
    .collect();
}

/// Decode LaTeX markup in `input` to Unicode text
pub fn decode_latex(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => i = decode_command(&chars, i + 1, &mut out),
            '~' => {
                out.push(' ');
                i += 1;
            }
            // Math shift; the symbols inside are decoded like text
            '$' => i += 1,
            '-' if chars.get(i + 1) == Some(&'-') => {
                if chars.get(i + 2) == Some(&'-') {
                    out.push('—');
                    i += 3;
                } else {
                    out.push('–');
                    i += 2;
                }
            }
            '`' if chars.get(i + 1) == Some(&'`') => {
                out.push('\u{201C}');
                i += 2;
            }
            '\'' if chars.get(i + 1) == Some(&'\'') => {
                out.push('\u{201D}');
                i += 2;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out.nfc().collect()
}

/// Decode the command starting at `start` (just past the backslash) and
/// return the index of the first character after it
fn decode_command(chars: &[char], start: usize, out: &mut String) -> usize {
    let Some(&next) = chars.get(start) else {
        out.push('\\');
        return start;
    };

    if next.is_ascii_alphabetic() {
        let end = start
            + chars[start..]
                .iter()
                .take_while(|c| c.is_ascii_alphabetic())
                .count();
        let name: String = chars[start..end].iter().collect();

        if let Some(mark) = letter_accent(&name) {
            if let Some((base, after)) = accent_argument(chars, end, true) {
                out.push(base);
                out.push(mark);
                return after;
            }
        }
        if let Some(symbol) = SYMBOLS.get(name.as_str()) {
            out.push_str(symbol);
            return skip_empty_group(chars, end);
        }
        if chars.get(end) == Some(&'{') {
            // \emph{...}, \textbf{...} and friends: keep only the argument
            return end;
        }
        out.push('\\');
        out.push_str(&name);
        return end;
    }

    if let Some(mark) = symbol_accent(next) {
        if let Some((base, after)) = accent_argument(chars, start + 1, false) {
            out.push(base);
            out.push(mark);
            return after;
        }
    }

    match next {
        '&' | '%' | '$' | '#' | '_' | '{' | '}' => out.push(next),
        '\\' | ' ' => out.push(' '),
        _ => {
            out.push('\\');
            out.push(next);
        }
    }
    start + 1
}

/// Combining mark for a punctuation accent such as `\'` or `\"`
fn symbol_accent(c: char) -> Option<char> {
    Some(match c {
        '"' => '\u{0308}',
        '\'' => '\u{0301}',
        '`' => '\u{0300}',
        '^' => '\u{0302}',
        '~' => '\u{0303}',
        '=' => '\u{0304}',
        '.' => '\u{0307}',
        _ => return None,
    })
}

/// Combining mark for a letter accent such as `\c` or `\v`
fn letter_accent(name: &str) -> Option<char> {
    Some(match name {
        "u" => '\u{0306}',
        "v" => '\u{030C}',
        "H" => '\u{030B}',
        "r" => '\u{030A}',
        "c" => '\u{0327}',
        "k" => '\u{0328}',
        "d" => '\u{0323}',
        "b" => '\u{0331}',
        _ => return None,
    })
}

/// Read the base letter of an accent: `e`, `{e}`, ` e`, `\i` or `{\i}`.
/// Letter accents need a brace or a space before the base.
fn accent_argument(chars: &[char], pos: usize, letter_accent: bool) -> Option<(char, usize)> {
    let mut i = pos;
    while chars.get(i) == Some(&' ') {
        i += 1;
    }
    let spaced = i > pos;
    let braced = chars.get(i) == Some(&'{');
    if braced {
        i += 1;
    }
    if letter_accent && !braced && !spaced {
        return None;
    }

    let base = match chars.get(i) {
        Some('\\')
            if matches!(chars.get(i + 1), Some('i' | 'j'))
                && !chars.get(i + 2).is_some_and(|c| c.is_ascii_alphabetic()) =>
        {
            i += 2;
            let base = chars[i - 1];
            // A space after a control word only terminates it
            if !braced && chars.get(i) == Some(&' ') {
                i += 1;
            }
            base
        }
        Some(c) if c.is_alphabetic() => {
            i += 1;
            *c
        }
        _ => return None,
    };

    if braced {
        if chars.get(i) != Some(&'}') {
            return None;
        }
        i += 1;
    }
    Some((base, i))
}

/// Skip a `{}` terminator after a control word, as in `Stra\ss{}e`
fn skip_empty_group(chars: &[char], pos: usize) -> usize {
    if chars.get(pos) == Some(&'{') && chars.get(pos + 1) == Some(&'}') {
        pos + 2
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_umlaut_decoding() {
        assert_eq!(decode_latex(r#"M\"uller"#), "Müller");
        assert_eq!(decode_latex(r#"M\"{u}ller"#), "Müller");
        assert_eq!(decode_latex(r#"{M\"u}ller"#), "{Mü}ller");
    }

    #[test]
    fn test_acute_and_dotless_i() {
        assert_eq!(decode_latex(r"caf\'e"), "café");
        assert_eq!(decode_latex(r"Garc\'{\i}a"), "García");
        assert_eq!(decode_latex(r"Garc\'\i a"), "García");
    }

    #[test]
    fn test_letter_accents() {
        assert_eq!(decode_latex(r"gar\c{c}on"), "garçon");
        assert_eq!(decode_latex(r"gar\c con"), "garçon");
        assert_eq!(decode_latex(r"\v{S}koda"), "Škoda");
        assert_eq!(decode_latex(r"Erd\H{o}s"), "Erdős");
    }

    #[test]
    fn test_symbols_and_ligatures() {
        assert_eq!(decode_latex(r"Stra\ss{}e"), "Straße");
        assert_eq!(decode_latex(r"\O{}stergaard"), "Østergaard");
        assert_eq!(decode_latex(r"Smith \& Jones"), "Smith & Jones");
        assert_eq!(decode_latex(r"10\% off"), "10% off");
    }

    #[test]
    fn test_math_and_greek() {
        assert_eq!(decode_latex(r"$\alpha$ particles"), "α particles");
        assert_eq!(decode_latex(r"a $\leq$ b"), "a ≤ b");
    }

    #[test]
    fn test_dashes_and_quotes() {
        assert_eq!(decode_latex("pages 1--10"), "pages 1–10");
        assert_eq!(decode_latex("the---as usual"), "the—as usual");
        assert_eq!(decode_latex("``quoted''"), "\u{201C}quoted\u{201D}");
        assert_eq!(decode_latex("non~breaking"), "non breaking");
    }

    #[test]
    fn test_formatting_commands_keep_argument() {
        assert_eq!(decode_latex(r"\emph{Nature}"), "{Nature}");
        assert_eq!(decode_latex(r"\textbf{bold} text"), "{bold} text");
    }

    #[test]
    fn test_unknown_commands_pass_through() {
        assert_eq!(decode_latex(r"\foo bar"), r"\foo bar");
        assert_eq!(decode_latex("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_plain_unicode_unchanged() {
        assert_eq!(decode_latex("Łukasz Öztürk"), "Łukasz Öztürk");
    }
}
