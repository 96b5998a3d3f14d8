//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::user::CurrentUser;
use crate::error::{StockroomError, StockroomResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (products, or activity with --activity)
    Csv,
    /// JSON format (products and activity)
    Json,
    /// YAML format (products and activity, human-readable)
    Yaml,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Export the activity log instead of products (CSV only)
    #[arg(long)]
    pub activity: bool,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    user: &CurrentUser,
    args: ExportArgs,
) -> StockroomResult<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                StockroomError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv if args.activity => {
            csv::export_activity_csv(storage, user, &mut writer)?
        }
        ExportFormat::Csv => csv::export_products_csv(storage, user, &mut writer)?,
        ExportFormat::Json => {
            json::export_full_json(storage, user, &mut writer, args.pretty)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => yaml::export_full_yaml(storage, user, &mut writer)?,
    }

    writer.flush()?;

    if let Some(path) = &args.output {
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}
