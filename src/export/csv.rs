//! CSV export of audit entries

use std::io::Write;

use crate::audit::AuditEntry;
use crate::error::{AuditError, AuditResult};

/// Column headers of the CSV export
pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "Created At",
    "Record Type",
    "Record ID",
    "Field",
    "Transition",
    "Source",
    "Target",
];

/// Export audit entries to CSV, one row per transition
pub fn export_entries_csv<W: Write>(entries: &[AuditEntry], writer: W) -> AuditResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AuditError::Export(e.to_string()))?;

    for entry in entries {
        csv_writer
            .write_record([
                entry.id().as_uuid().to_string(),
                entry.created_at().to_rfc3339(),
                entry.owner().record_type.clone(),
                entry.owner().object_id.to_string(),
                entry.field().to_string(),
                entry.transition().to_string(),
                entry.source().to_string(),
                entry.target().to_string(),
            ])
            .map_err(|e| AuditError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| AuditError::Export(e.to_string()))
}
