//! Batch command - extract data from many documents into one table.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use challan_core::{Aggregator, DocumentProcessor, ExtractionOutcome};

use super::{format_table, OutputFormat, ProfileArgs};
use crate::decode;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    #[command(flatten)]
    profile: ProfileArgs,

    /// Output file
    #[arg(short, long, default_value = "extracted_data.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Resolve the profile once, before any document is touched.
    let config = args.profile.resolve(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "json" | "pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Strictly sequential, in submission order; every failure (decode or
    // parse) is recorded and the batch continues.
    let processor = DocumentProcessor::new(config);
    let mut aggregator = Aggregator::new();
    let mut outcomes: Vec<ExtractionOutcome> = Vec::with_capacity(files.len());

    for path in &files {
        let file_start = Instant::now();

        let outcome = match decode::load_document(path) {
            Ok(document) => processor.process(&document),
            Err(e) => {
                warn!("Failed to decode {}: {}", path.display(), e);
                ExtractionOutcome {
                    document: path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or("document")
                        .to_string(),
                    rows: Vec::new(),
                    error: Some(e.to_string()),
                    warnings: Vec::new(),
                    elapsed_ms: file_start.elapsed().as_millis() as u64,
                }
            }
        };

        aggregator.push(&outcome);
        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successes = aggregator.successes();
    let failures = aggregator.failures();
    let no_data = aggregator.no_data();
    let table = aggregator.into_table();

    // Write the table even when it only carries error rows; skip the file
    // entirely when there is nothing at all.
    if !table.is_empty() {
        let content = format_table(&table, args.format)?;
        fs::write(&args.output, content)?;
        println!(
            "{} Extracted data written to {}",
            style("✓").green(),
            args.output.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successes).green(),
        style(failures).red()
    );

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            println!(
                "  - {}: {}",
                outcome.document,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let with_warnings: Vec<_> = outcomes.iter().filter(|o| !o.warnings.is_empty()).collect();
    if !with_warnings.is_empty() {
        println!();
        println!("{}", style("Warnings:").yellow());
        for outcome in &with_warnings {
            for warning in &outcome.warnings {
                println!("  - {}: {}", outcome.document, warning);
            }
        }
    }

    if no_data {
        println!();
        println!(
            "{} No data was extracted. Please check the input files.",
            style("⚠").yellow()
        );
    }

    debug!("Batch finished in {:?}", start.elapsed());

    Ok(())
}
