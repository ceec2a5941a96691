//! HTML page rendering
//!
//! The page is a single Tailwind-styled document: the configured static
//! sections first, then the publication list with one block per year.
//! Citation HTML and section fragments are inserted verbatim; headings and
//! the title are escaped.

use std::path::Path;

use crate::config::{PageConfig, StaticSection};
use crate::error::{PubpageError, PubpageResult};
use crate::group::YearGroups;

const CARD_OPEN: &str = r#"
    <div class="bg-white shadow-lg rounded-2xl p-6 hover:shadow-xl transition duration-300 ease-in-out">
        <p class="text-gray-800 text-base md:text-lg leading-relaxed">"#;
const CARD_CLOSE: &str = "</p>\n    </div>\n";

/// Render the complete page
pub fn render_page(config: &PageConfig, groups: &YearGroups) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{}</title>
  <script src="{}"></script>
</head>
<body class="bg-gray-100 text-gray-800 font-sans leading-relaxed">
  <div class="max-w-5xl mx-auto px-6 py-12">
"#,
        html_escape(&config.page_title),
        html_escape(&config.stylesheet_url),
    ));

    for section in &config.sections {
        render_section(&mut html, section);
    }

    html.push_str(&page_heading(&config.publications_heading));
    for year in groups.sorted_years() {
        let label = if year.is_empty() {
            config.undated_label.as_str()
        } else {
            year
        };
        html.push_str(&format!(
            r#"
    <div class="mb-12">
      <h2 class="text-3xl font-semibold mb-6 border-b-2 border-gray-300 pb-2">{}</h2>
      <div class="space-y-6">
"#,
            html_escape(label)
        ));
        for citation in groups.citations(year) {
            push_card(&mut html, citation);
        }
        html.push_str("      </div>\n    </div>\n");
    }

    html.push_str("  </div>\n</body>\n</html>\n");
    html
}

fn render_section(html: &mut String, section: &StaticSection) {
    html.push_str(&page_heading(&section.heading));
    html.push_str("    <div class=\"space-y-6 mb-12\">\n");
    for fragment in &section.fragments {
        push_card(html, fragment);
    }
    html.push_str("    </div>\n");
}

fn page_heading(text: &str) -> String {
    format!(
        "\n    <h1 class=\"text-4xl font-extrabold mb-12 text-center text-gray-900\">{}</h1>\n",
        html_escape(text)
    )
}

fn push_card(html: &mut String, content: &str) {
    html.push_str(CARD_OPEN);
    html.push_str(content);
    html.push_str(CARD_CLOSE);
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write the page, replacing any previous output
pub fn write_output(html: &str, path: &Path) -> PubpageResult<()> {
    std::fs::write(path, html).map_err(|source| PubpageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
