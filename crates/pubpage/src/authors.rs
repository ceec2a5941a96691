//! Author list formatting
//!
//! Author fields use the BibTeX convention of names joined by `" and "`.
//! Each name is rendered surname first, and the list is joined with
//! semicolons, the final name carrying a leading `"and "`:
//!
//! ```text
//! Smith, John; Doe, Jane; and Li, Dongshuai
//! ```

use serde::Deserialize;

/// How each name in an author list is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorStyle {
    /// `Last, First Middle`
    #[default]
    Full,
    /// `Last, F.M.`
    Initials,
}

/// Split one author into `(last, first)`.
///
/// Handles both "Last, First" and "First Last" formats. A single bare word
/// becomes the surname with an empty given name.
pub fn split_name(author: &str) -> (String, String) {
    if let Some((last, first)) = author.split_once(',') {
        return (last.trim().to_string(), first.trim().to_string());
    }

    let words: Vec<&str> = author.split_whitespace().collect();
    match words.split_last() {
        Some((last, given)) => (last.to_string(), given.join(" ")),
        None => (String::new(), String::new()),
    }
}

/// Format an author field, wrapping the highlighted author in `<strong>`.
///
/// The highlight comparison is exact and case-sensitive against the
/// `"Last, First"` rendering, whatever the display style.
pub fn format_authors(authors: &str, highlight: &str, style: AuthorStyle) -> String {
    if authors.trim().is_empty() {
        return String::new();
    }

    let names: Vec<String> = authors
        .split(" and ")
        .map(|author| format_name(author.trim(), highlight, style))
        .collect();

    match names.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => {
            let mut parts = rest.to_vec();
            parts.push(format!("and {last}"));
            parts.join("; ")
        }
        None => String::new(),
    }
}

fn format_name(author: &str, highlight: &str, style: AuthorStyle) -> String {
    if author.is_empty() {
        return String::new();
    }

    let (last, first) = split_name(author);
    let full = format!("{last}, {first}");
    let display = match style {
        AuthorStyle::Full => full.clone(),
        AuthorStyle::Initials => format!("{last}, {}", initials(&first)),
    };

    if full == highlight {
        format!("<strong>{display}</strong>")
    } else {
        display
    }
}

fn initials(given: &str) -> String {
    given
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .map(|c| format!("{c}."))
        .collect()
}
