//! BibTeX record loading
//!
//! This crate turns a BibTeX/BibLaTeX source into an ordered list of
//! [`Record`]s, one per bibliography entry, and provides the LaTeX decoder
//! used when readable Unicode text is wanted instead of raw markup.
//!
//! Features:
//! - Nom-based parser with `@string` macros and `#` concatenation
//! - Strict error reporting: a malformed entry aborts the whole parse
//! - Case-insensitive field lookup
//! - LaTeX accent, symbol and formatting-command decoding

mod latex;
pub mod parser;
mod record;

pub use latex::decode_latex;
pub use parser::{parse, ParseError};
pub use record::{Field, Record};
