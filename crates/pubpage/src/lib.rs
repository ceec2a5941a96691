//! Publications page generator
//!
//! Reads a BibTeX bibliography and writes a static HTML page listing the
//! publications by year, newest first, with one author name highlighted.
//!
//! # Example
//!
//! ```ignore
//! use pubpage::{run, PageConfig};
//!
//! let config = PageConfig::load(None)?;
//! let summary = run(&config)?;
//! println!("{} records over {} years", summary.records, summary.years);
//! ```

pub mod authors;
pub mod citation;
pub mod config;
mod error;
pub mod group;
pub mod normalize;
pub mod pipeline;
pub mod render;

pub use authors::{format_authors, AuthorStyle};
pub use citation::{Citation, CitationFormatter};
pub use config::{PageConfig, StaticSection};
pub use error::{PubpageError, PubpageResult};
pub use group::YearGroups;
pub use normalize::{
    extract_year, strip_markup_braces, BraceStripper, LatexDecoder, TextDecoding, TextNormalizer,
};
pub use pipeline::{format_citations, group_by_year, load_records, run, RunSummary};
pub use render::{render_page, write_output};
