//! The page build, one stage per function
//!
//! `load_records -> format_citations -> group_by_year -> render_page -> write_output`
//!
//! Only the first and last stages touch the file system.

use std::path::Path;

use pubpage_bibtex::Record;
use tracing::info;

use crate::citation::{Citation, CitationFormatter};
use crate::config::PageConfig;
use crate::error::{PubpageError, PubpageResult};
use crate::group::YearGroups;
use crate::render::{render_page, write_output};

/// Counts reported after a successful build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub years: usize,
}

/// Read and parse the bibliography. Any failure aborts the build.
pub fn load_records(path: &Path) -> PubpageResult<Vec<Record>> {
    let source = std::fs::read_to_string(path).map_err(|source| PubpageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = pubpage_bibtex::parse(&source).map_err(|source| PubpageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = records.len(), "loaded bibliography");
    Ok(records)
}

/// One citation per record, in record order
pub fn format_citations(records: &[Record], formatter: &CitationFormatter) -> Vec<Citation> {
    records.iter().map(|record| formatter.format(record)).collect()
}

pub fn group_by_year(citations: Vec<Citation>) -> YearGroups {
    citations.into_iter().collect()
}

/// Run the whole build described by `config`
pub fn run(config: &PageConfig) -> PubpageResult<RunSummary> {
    let records = load_records(&config.input)?;
    let formatter = CitationFormatter::from_config(config);
    let groups = group_by_year(format_citations(&records, &formatter));
    let html = render_page(config, &groups);
    write_output(&html, &config.output)?;

    let summary = RunSummary {
        records: records.len(),
        years: groups.year_count(),
    };
    info!(
        path = %config.output.display(),
        records = summary.records,
        years = summary.years,
        "wrote publications page"
    );
    Ok(summary)
}
