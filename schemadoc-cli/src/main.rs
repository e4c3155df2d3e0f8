//! schemadoc command-line tool
//!
//! Checks documents produced elsewhere against a declarative schema catalog
//! before they are trusted, and previews what a catalog change does to
//! stored types.
//!
//! Usage:
//!   schemadoc --catalog schemadoc.toml validate note.json
//!   schemadoc --catalog next.toml plan current.toml

use anyhow::Result;
use clap::Parser;
use schemadoc_cli::{Args, run};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("Using catalog {}", args.catalog.display());
    let report = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
