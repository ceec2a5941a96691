//! Page configuration
//!
//! Loaded from a TOML file with the following structure (every key is
//! optional and falls back to the built-in default):
//!
//! ```toml
//! input = "publications.bib"
//! output = "index.html"
//! highlight_name = "Li, Dongshuai"
//! author_style = "full"          # or "initials"
//! text_decoding = "braces"       # or "latex"
//! page_title = "Publications"
//! stylesheet_url = "https://cdn.tailwindcss.com"
//! publications_heading = "Journal Publications"
//! undated_label = "Undated"
//!
//! [[sections]]
//! heading = "Book Chapters"
//! fragments = ["<strong>Dongshuai Li</strong>, ..."]
//! ```
//!
//! Lookup order: an explicit path, `./pubpage.toml`, then
//! `<config dir>/pubpage/config.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::authors::AuthorStyle;
use crate::error::{PubpageError, PubpageResult};
use crate::normalize::TextDecoding;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pubpage.toml";

/// A block of hand-written entries rendered before the publication list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticSection {
    pub heading: String,
    /// HTML fragments, one card each
    #[serde(default)]
    pub fragments: Vec<String>,
}

/// Everything that shapes one page build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub highlight_name: String,
    pub author_style: AuthorStyle,
    pub text_decoding: TextDecoding,
    pub page_title: String,
    pub stylesheet_url: String,
    pub publications_heading: String,
    pub undated_label: String,
    pub sections: Vec<StaticSection>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("publications.bib"),
            output: PathBuf::from("index.html"),
            highlight_name: "Li, Dongshuai".to_string(),
            author_style: AuthorStyle::default(),
            text_decoding: TextDecoding::default(),
            page_title: "Publications".to_string(),
            stylesheet_url: "https://cdn.tailwindcss.com".to_string(),
            publications_heading: "Journal Publications".to_string(),
            undated_label: "Undated".to_string(),
            sections: vec![default_book_chapters()],
        }
    }
}

fn default_book_chapters() -> StaticSection {
    StaticSection {
        heading: "Book Chapters".to_string(),
        fragments: vec![
            chapter_card(
                "<strong>Dongshuai Li</strong>, Alejandro Luque, Farhad Rachidi, Marcos Rubinstein, 2022",
                "Advanced Time Domain Modelling for Electrical Engineering",
                "Chapter 11",
                "The Application of The Finite-Difference Time-Domain (FDTD) Technique to Lightning Studies",
                "9781839531538",
                "10.1049/SBEW550E_ch11",
            ),
            chapter_card(
                "<strong>Dongshuai Li</strong>, Alejandro Luque, Marcos Rubinstein, Farhad Rachidi, 2023",
                "Lightning Electromagnetics, 2nd Edition",
                "Chapter 10",
                "Lightning interaction with the ionosphere",
                "9781785615412",
                "10.1049/PBPO127G_ch10",
            ),
        ],
    }
}

fn chapter_card(
    authors: &str,
    book: &str,
    chapter: &str,
    chapter_title: &str,
    isbn: &str,
    doi: &str,
) -> String {
    format!(
        "{authors}<br>\n\
         <em>{book}</em><br>\n\
         {chapter}: <span class=\"font-medium\">{chapter_title}</span><br>\n\
         The Institution of Engineering and Technology (IET)<br>\n\
         <span class=\"text-sm\">ISBN: {isbn} | <a href=\"https://doi.org/{doi}\" target=\"_blank\" class=\"text-blue-600 hover:underline\">https://doi.org/{doi}</a></span>"
    )
}

impl PageConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str, path: &Path) -> PubpageResult<Self> {
        toml::from_str(source).map_err(|source| PubpageError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> PubpageResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| PubpageError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source, path)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise the first existing default
    /// location is used, and the built-in defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> PubpageResult<Self> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                info!(path = %candidate.display(), "loading config");
                return Self::from_file(&candidate);
            }
            debug!(path = %candidate.display(), "no config file");
        }

        debug!("using built-in config");
        Ok(Self::default())
    }
}

/// Config file locations searched when no path is given
pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("pubpage").join("config.toml"));
    }
    locations
}
