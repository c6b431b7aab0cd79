#![deny(missing_docs)]

//! # Extract Command
//!
//! Loads a metadata document, runs route extraction for the requested
//! classes and prints the resulting mapping.

use std::path::PathBuf;

use clap::ValueEnum;
use restmap_core::{extract_routes, HandlerRef, MetadataRegistry, RouteDefinition};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Output serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the extract command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Path to the class metadata document (YAML or JSON).
    #[clap(long, short = 'm', env = "RESTMAP_METADATA")]
    pub metadata: PathBuf,

    /// Fully qualified names of the classes to extract. With none
    /// given, every class in the document is extracted.
    pub classes: Vec<String>,

    /// Output format.
    #[clap(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// One extracted route, flattened for output.
#[derive(Debug, Serialize)]
struct RouteReport {
    /// The merged, validated definition.
    route: RouteDefinition,
    /// The handler that serves it.
    handler: HandlerRef,
}

/// Per-class extraction report.
#[derive(Debug, Serialize)]
struct ClassReport {
    /// The extraction target.
    class: String,
    /// Routes in definition order.
    routes: Vec<RouteReport>,
}

/// Executes the extraction and returns the rendered report.
pub fn run(args: &ExtractArgs) -> CliResult<String> {
    if !args.metadata.exists() {
        return Err(CliError::General(format!(
            "Metadata file not found: {:?}",
            args.metadata
        )));
    }

    let registry = MetadataRegistry::from_path(&args.metadata)?;

    let targets: Vec<String> = if args.classes.is_empty() {
        registry.class_names().map(str::to_string).collect()
    } else {
        args.classes.clone()
    };

    let mut reports = Vec::new();
    for class in &targets {
        let mapping = extract_routes(&registry, class)?;
        reports.push(ClassReport {
            class: class.clone(),
            routes: mapping
                .into_iter()
                .map(|(route, handler)| RouteReport { route, handler })
                .collect(),
        });
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)
            .map_err(|e| CliError::General(format!("Failed to render JSON: {}", e)))?,
        OutputFormat::Yaml => serde_yaml::to_string(&reports)
            .map_err(|e| CliError::General(format!("Failed to render YAML: {}", e)))?,
    };
    Ok(rendered)
}

/// Executes the extraction and prints the report to stdout.
pub fn execute(args: &ExtractArgs) -> CliResult<()> {
    println!("{}", run(args)?);
    Ok(())
}
