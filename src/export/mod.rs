//! Export module for fsm-audit
//!
//! Writes audit entries in several formats:
//! - CSV: one row per transition (spreadsheet-compatible)
//! - JSON: machine-readable export with schema version
//! - YAML: human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;

pub use self::csv::export_entries_csv;
pub use self::json::{export_entries_json, AuditExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_entries_yaml, import_from_yaml};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}
