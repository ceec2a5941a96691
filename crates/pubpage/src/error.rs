use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a page build
#[derive(Debug, Error)]
pub enum PubpageError {
    #[error("failed to read bibliography {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse bibliography {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: pubpage_bibtex::ParseError,
    },

    #[error("failed to write page {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type for page builds
pub type PubpageResult<T> = Result<T, PubpageError>;
