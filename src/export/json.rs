//! JSON export of audit entries with schema versioning

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;
use crate::error::{AuditError, AuditResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full audit trail export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Crate version that created the export
    pub app_version: String,

    pub entry_count: usize,

    pub entries: Vec<AuditEntry>,
}

impl AuditExport {
    pub fn new(entries: Vec<AuditEntry>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entry_count: entries.len(),
            entries,
        }
    }

    /// Check the export is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Unsupported schema version {} (expected {})",
                self.schema_version, EXPORT_SCHEMA_VERSION
            ));
        }
        if self.entry_count != self.entries.len() {
            return Err(format!(
                "Entry count mismatch: header says {}, found {}",
                self.entry_count,
                self.entries.len()
            ));
        }
        Ok(())
    }
}

/// Export audit entries as pretty-printed JSON
pub fn export_entries_json<W: Write>(entries: &[AuditEntry], mut writer: W) -> AuditResult<()> {
    let export = AuditExport::new(entries.to_vec());
    serde_json::to_writer_pretty(&mut writer, &export)
        .map_err(|e| AuditError::Export(e.to_string()))?;

    writer.flush().map_err(|e| AuditError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordRef;

    #[test]
    fn test_export_and_reload() {
        let entries = vec![AuditEntry::new(
            RecordRef::new("blog.post", 3),
            "status",
            "publish",
            "draft",
            "published",
        )];

        let mut output = Vec::new();
        export_entries_json(&entries, &mut output).unwrap();

        let export: AuditExport = serde_json::from_slice(&output).unwrap();
        assert!(export.validate().is_ok());
        assert_eq!(export.entry_count, 1);
        assert_eq!(export.entries, entries);
    }

    /// Accepts writes but fails when flushed, like a full disk behind a buffer
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "No space left on device"))
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let err = export_entries_json(&[], FullDisk).unwrap_err();
        assert!(matches!(err, AuditError::Export(_)));
        assert!(err.to_string().contains("No space left"));
    }

    #[test]
    fn test_validate_count_mismatch() {
        let mut export = AuditExport::new(Vec::new());
        export.entry_count = 2;
        assert!(export.validate().unwrap_err().contains("mismatch"));
    }
}
