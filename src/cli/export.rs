//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::audit::JsonlAuditStore;
use crate::error::{AuditError, AuditResult};
use crate::export::{export_entries_csv, export_entries_json, export_entries_yaml, ExportFormat};

/// Arguments of `export`
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export the whole audit log
pub fn handle_export_command(store: &JsonlAuditStore, args: ExportArgs) -> AuditResult<()> {
    let entries = store.read_all()?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AuditError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_entries_csv(&entries, writer)?,
        ExportFormat::Json => export_entries_json(&entries, writer)?,
        ExportFormat::Yaml => export_entries_yaml(&entries, writer)?,
    }

    if let Some(path) = &args.output {
        eprintln!("Exported {} entries to {}", entries.len(), path.display());
    }

    Ok(())
}
