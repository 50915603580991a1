//! CLI subcommands and shared output plumbing.

pub mod batch;
pub mod process;

use clap::Args;

use challan_core::{BatchConfig, DocumentKind, LayoutProfile, PaymentSource, UnifiedTable};

/// Batch-level layout selection, resolved once before any document is
/// processed.
#[derive(Args)]
pub struct ProfileArgs {
    /// Document type to extract
    #[arg(short = 't', long, value_enum)]
    doc_type: Option<DocTypeArg>,

    /// Payment source (required for --doc-type payments)
    #[arg(short, long, value_enum)]
    source: Option<SourceArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DocTypeArg {
    /// TDS return acknowledgments
    Returns,
    /// TDS payment receipts
    Payments,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SourceArg {
    /// HDFC Bank challan receipts
    Hdfc,
    /// Income Tax Department challan receipts
    IncomeTax,
}

impl ProfileArgs {
    /// Resolve the selection into a batch configuration. A config file
    /// takes precedence over command-line flags.
    pub fn resolve(&self, config_path: Option<&str>) -> anyhow::Result<BatchConfig> {
        if let Some(path) = config_path {
            return Ok(BatchConfig::from_file(std::path::Path::new(path))?);
        }

        let kind = match self.doc_type {
            Some(DocTypeArg::Returns) => DocumentKind::Returns,
            Some(DocTypeArg::Payments) => DocumentKind::Payments,
            None => anyhow::bail!("either --doc-type or --config is required"),
        };
        let source = self.source.map(|s| match s {
            SourceArg::Hdfc => PaymentSource::HdfcBank,
            SourceArg::IncomeTax => PaymentSource::IncomeTaxDepartment,
        });

        let profile = LayoutProfile::resolve(kind, source)?;
        Ok(BatchConfig::new(profile))
    }
}

/// Output format for extracted data.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV table
    Csv,
    /// JSON rows
    Json,
    /// Plain text summary
    Text,
}

/// Render the unified table in the requested format.
pub fn format_table(table: &UnifiedTable, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => table_to_csv(table),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table.rows())?),
        OutputFormat::Text => Ok(table_to_text(table)),
    }
}

fn table_to_csv(table: &UnifiedTable) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(table.columns())?;
    for row in 0..table.len() {
        wtr.write_record(table.rendered_row(row))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn table_to_text(table: &UnifiedTable) -> String {
    let mut output = String::new();

    for (index, record) in table.rows().iter().enumerate() {
        output.push_str(&format!("Row {}\n", index + 1));
        for (field, value) in record.iter() {
            output.push_str(&format!("  {}: {}\n", field, value));
        }
        output.push('\n');
    }

    output
}
