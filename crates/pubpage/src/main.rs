//! pubpage binary
//!
//! Builds the publications page. With no arguments it reads
//! `publications.bib` and writes `index.html` in the working directory.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pubpage::{run, PageConfig};

#[derive(Debug, Parser)]
#[command(name = "pubpage", version, about = "Render a BibTeX file as an HTML publications page")]
struct Cli {
    /// Config file (defaults to ./pubpage.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bibliography to read, overriding the config
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Page to write, overriding the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log each record as it is formatted
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = PageConfig::load(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    run(&config)?;
    Ok(())
}
