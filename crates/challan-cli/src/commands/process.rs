//! Process command - extract data from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use challan_core::{Aggregator, DocumentProcessor};

use super::{format_table, OutputFormat, ProfileArgs};
use crate::decode;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.json document dump or .pdf with embedded text)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    profile: ProfileArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = args.profile.resolve(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = decode::load_document(&args.input)?;
    let processor = DocumentProcessor::new(config);
    let outcome = processor.process(&document);

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    if let Some(error) = &outcome.error {
        anyhow::bail!("Failed to process '{}': {}", outcome.document, error);
    }

    let mut aggregator = Aggregator::new();
    aggregator.push(&outcome);
    let table = aggregator.into_table();

    let output = format_table(&table, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
