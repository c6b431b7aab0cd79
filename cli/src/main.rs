#![deny(missing_docs)]

//! # Restmap CLI
//!
//! Command Line Interface for the route extraction engine.
//!
//! Supported Commands:
//! - `extract`: Metadata document -> merged, validated route mapping.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod extract;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Restmap route extraction CLI")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extracts route definitions from a class metadata document.
    Extract(extract::ExtractArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract(args) => extract::execute(args)?,
    }

    Ok(())
}
