//! Text normalization for citation fields
//!
//! Field text goes through a [`TextNormalizer`] and then through
//! [`strip_markup_braces`]. The default normalizer only removes braces and
//! leaves LaTeX escapes as written; [`LatexDecoder`] turns them into
//! readable Unicode instead.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"[0-9]{4}").unwrap();
}

/// Converts raw field markup into display text
pub trait TextNormalizer {
    fn normalize(&self, text: &str) -> String;
}

/// Lossy default: drops grouping braces, keeps everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceStripper;

impl TextNormalizer for BraceStripper {
    fn normalize(&self, text: &str) -> String {
        strip_markup_braces(text)
    }
}

/// Decodes LaTeX accents and symbols to Unicode, then drops braces
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexDecoder;

impl TextNormalizer for LatexDecoder {
    fn normalize(&self, text: &str) -> String {
        strip_markup_braces(&pubpage_bibtex::decode_latex(text))
    }
}

/// Which normalizer to apply to author, title and journal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoding {
    #[default]
    Braces,
    Latex,
}

impl TextDecoding {
    pub fn normalizer(self) -> Box<dyn TextNormalizer> {
        match self {
            Self::Braces => Box::new(BraceStripper),
            Self::Latex => Box::new(LatexDecoder),
        }
    }
}

/// Remove `{` and `}` from `text`
pub fn strip_markup_braces(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}

/// First run of four digits in a date or year field, or `""`
pub fn extract_year(field: &str) -> String {
    YEAR.find(field)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_markup_braces() {
        assert_eq!(
            strip_markup_braces("{Title} with {nested} braces"),
            "Title with nested braces"
        );
        assert_eq!(strip_markup_braces("{{FDTD}} model"), "FDTD model");
        assert_eq!(strip_markup_braces(""), "");
        assert_eq!(strip_markup_braces("Zürich {Ångström}"), "Zürich Ångström");
    }

    #[test]
    fn test_brace_stripper_keeps_latex_escapes() {
        assert_eq!(BraceStripper.normalize(r#"M\"{u}ller"#), r#"M\"uller"#);
    }

    #[test]
    fn test_latex_decoder() {
        assert_eq!(LatexDecoder.normalize(r#"M\"{u}ller"#), "Müller");
        assert_eq!(
            LatexDecoder.normalize(r"\emph{In situ} {FDTD} runs"),
            "In situ FDTD runs"
        );
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2023-05-01"), "2023");
        assert_eq!(extract_year("no digits here"), "");
        assert_eq!(extract_year("v12 of 2019"), "2019");
        assert_eq!(extract_year("2019/2020"), "2019");
        assert_eq!(extract_year(""), "");
    }

    #[test]
    fn test_decoding_selects_normalizer() {
        assert_eq!(TextDecoding::default(), TextDecoding::Braces);
        assert_eq!(TextDecoding::Braces.normalizer().normalize(r"\'e"), r"\'e");
        assert_eq!(TextDecoding::Latex.normalizer().normalize(r"\'e"), "é");
    }

    proptest! {
        #[test]
        fn stripped_text_has_no_braces(s in ".*") {
            let stripped = strip_markup_braces(&s);
            prop_assert!(!stripped.contains(['{', '}']), "stripped text contains a brace: {:?}", stripped);
        }

        #[test]
        fn stripping_is_idempotent(s in ".*") {
            let once = strip_markup_braces(&s);
            prop_assert_eq!(strip_markup_braces(&once), once.clone());
        }

        #[test]
        fn extracted_year_is_empty_or_four_digits(s in ".*") {
            let year = extract_year(&s);
            prop_assert!(year.is_empty() || (year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())));
        }
    }
}
