//! Citation formatting
//!
//! Turns one [`Record`] into an HTML citation string plus its year:
//!
//! ```text
//! {authors}, {year}. {title}. <em>{journal}</em>, {volume}({number}), {pages}, <a ...>{doi url}</a>
//! ```
//!
//! Every optional part is left out, with its punctuation, when the field is
//! absent or empty.

use pubpage_bibtex::Record;
use tracing::{debug, warn};

use crate::authors::{format_authors, AuthorStyle};
use crate::config::PageConfig;
use crate::normalize::{extract_year, strip_markup_braces, BraceStripper, TextNormalizer};

const DOI_RESOLVER: &str = "https://doi.org/";

/// A formatted citation and the year it is grouped under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub html: String,
    /// Four digits, or empty when the record has no usable date
    pub year: String,
}

/// Formats records into citations
pub struct CitationFormatter {
    normalizer: Box<dyn TextNormalizer>,
    highlight_name: String,
    author_style: AuthorStyle,
}

impl CitationFormatter {
    pub fn new(normalizer: Box<dyn TextNormalizer>, highlight_name: impl Into<String>) -> Self {
        Self {
            normalizer,
            highlight_name: highlight_name.into(),
            author_style: AuthorStyle::Full,
        }
    }

    pub fn with_author_style(mut self, style: AuthorStyle) -> Self {
        self.author_style = style;
        self
    }

    pub fn from_config(config: &PageConfig) -> Self {
        Self::new(config.text_decoding.normalizer(), &config.highlight_name)
            .with_author_style(config.author_style)
    }

    fn clean(&self, raw: &str) -> String {
        strip_markup_braces(&self.normalizer.normalize(raw))
    }

    /// Format one record. Missing fields are omitted, never an error.
    pub fn format(&self, record: &Record) -> Citation {
        let authors = format_authors(
            &self.clean(record.get_or_empty("author")),
            &self.highlight_name,
            self.author_style,
        );

        let date = record.get_or_empty("date");
        let year = extract_year(if date.is_empty() {
            record.get_or_empty("year")
        } else {
            date
        });

        let title = self.clean(record.get_or_empty("title"));
        let journal_field = match record.get_or_empty("journaltitle") {
            "" => record.get_or_empty("journal"),
            journal => journal,
        };
        let journal = self.clean(journal_field);

        if authors.is_empty() || title.is_empty() || year.is_empty() {
            warn!(
                cite_key = %record.cite_key,
                has_author = !authors.is_empty(),
                has_title = !title.is_empty(),
                has_year = !year.is_empty(),
                "incomplete record"
            );
        }

        let mut html = format!("{authors}, {year}. {title}. <em>{journal}</em>");

        let volume = record.get_or_empty("volume");
        if !volume.is_empty() {
            html.push_str(", ");
            html.push_str(volume);
            let number = record.get_or_empty("number");
            if !number.is_empty() {
                html.push('(');
                html.push_str(number);
                html.push(')');
            }
        }

        let pages = record.get_or_empty("pages");
        if !pages.is_empty() {
            html.push_str(", ");
            html.push_str(pages);
        }

        let doi = record.get_or_empty("doi");
        if !doi.is_empty() {
            let url = doi_url(doi);
            html.push_str(&format!(
                ", <a href='{url}' target='_blank' class='text-blue-600 hover:underline'>{url}</a>"
            ));
        }

        debug!(cite_key = %record.cite_key, year = %year, "formatted citation");
        Citation { html, year }
    }
}

impl Default for CitationFormatter {
    fn default() -> Self {
        Self::new(Box::new(BraceStripper), PageConfig::default().highlight_name)
    }
}

/// Resolve a DOI field to a link target; values that are already URLs pass through
pub fn doi_url(doi: &str) -> String {
    let is_url = doi
        .get(..4)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http"));
    if is_url {
        doi.to_string()
    } else {
        format!("{DOI_RESOLVER}{doi}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::LatexDecoder;

    fn article() -> Record {
        Record::new("Li2023", "article")
            .with_field("author", "Li, Dongshuai and Luque, Alejandro")
            .with_field("date", "2023-05-01")
            .with_field("title", "{FDTD} Modeling of {ELVES}")
            .with_field("journaltitle", "Journal of Geophysical Research: Atmospheres")
    }

    #[test]
    fn test_full_citation() {
        let record = article()
            .with_field("volume", "128")
            .with_field("number", "9")
            .with_field("pages", "e2022JD037919")
            .with_field("doi", "10.1029/2022JD037919");

        let citation = CitationFormatter::default().format(&record);
        assert_eq!(citation.year, "2023");
        assert_eq!(
            citation.html,
            "<strong>Li, Dongshuai</strong>; and Luque, Alejandro, 2023. FDTD Modeling of ELVES. \
             <em>Journal of Geophysical Research: Atmospheres</em>, 128(9), e2022JD037919, \
             <a href='https://doi.org/10.1029/2022JD037919' target='_blank' \
             class='text-blue-600 hover:underline'>https://doi.org/10.1029/2022JD037919</a>"
        );
    }

    #[test]
    fn test_volume_and_number_without_pages() {
        let record = article().with_field("volume", "5").with_field("number", "2");
        let citation = CitationFormatter::default().format(&record);
        assert!(citation.html.ends_with(", 5(2)"));
    }

    #[test]
    fn test_number_without_volume_is_dropped() {
        let record = article().with_field("number", "2");
        let citation = CitationFormatter::default().format(&record);
        assert!(citation.html.ends_with("<em>Journal of Geophysical Research: Atmospheres</em>"));
        assert!(!citation.html.contains("(2)"));
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let record = article()
            .with_field("volume", "")
            .with_field("pages", "")
            .with_field("doi", "");
        let citation = CitationFormatter::default().format(&record);
        assert!(citation.html.ends_with("</em>"));
    }

    #[test]
    fn test_year_prefers_date_over_year() {
        let record = Record::new("Both", "article")
            .with_field("year", "2019")
            .with_field("date", "2020-01");
        assert_eq!(CitationFormatter::default().format(&record).year, "2020");

        let record = Record::new("YearOnly", "article")
            .with_field("date", "")
            .with_field("year", "2019");
        assert_eq!(CitationFormatter::default().format(&record).year, "2019");
    }

    #[test]
    fn test_empty_record() {
        let citation = CitationFormatter::default().format(&Record::new("Empty", "misc"));
        assert_eq!(citation.year, "");
        assert_eq!(citation.html, ", . . <em></em>");
    }

    #[test]
    fn test_journal_falls_back_to_journal_field() {
        let record = Record::new("Classic", "article").with_field("journal", "{Nature}");
        let citation = CitationFormatter::default().format(&record);
        assert!(citation.html.ends_with("<em>Nature</em>"));
    }

    #[test]
    fn test_latex_decoding_strategy() {
        let record = Record::new("Accents", "article")
            .with_field("author", r#"M\"{u}ller, J\"{o}rg"#)
            .with_field("year", "2018")
            .with_field("title", r"Caf\'e culture");
        let formatter = CitationFormatter::new(Box::new(LatexDecoder), "Müller, Jörg");
        let citation = formatter.format(&record);
        assert!(citation
            .html
            .starts_with("<strong>Müller, Jörg</strong>, 2018. Café culture."));
    }

    #[test]
    fn test_doi_url() {
        assert_eq!(doi_url("10.1000/xyz"), "https://doi.org/10.1000/xyz");
        assert_eq!(doi_url("https://doi.org/10.1/a"), "https://doi.org/10.1/a");
        assert_eq!(doi_url("HTTP://example.org/x"), "HTTP://example.org/x");
        assert_eq!(doi_url("doi"), "https://doi.org/doi");
    }
}
