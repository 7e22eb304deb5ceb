//! YAML export of audit entries

use std::io::Write;

use crate::audit::AuditEntry;
use crate::error::{AuditError, AuditResult};

use super::json::AuditExport;

/// Export audit entries as YAML with a short header comment
pub fn export_entries_yaml<W: Write>(entries: &[AuditEntry], mut writer: W) -> AuditResult<()> {
    let export = AuditExport::new(entries.to_vec());

    writeln!(writer, "# fsm-audit transition export")
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| AuditError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AuditError::Export(e.to_string()))?;

    serde_yaml::to_writer(&mut writer, &export).map_err(|e| AuditError::Export(e.to_string()))?;

    writer.flush().map_err(|e| AuditError::Export(e.to_string()))
}

/// Load an export produced by `export_entries_yaml`
pub fn import_from_yaml(yaml_str: &str) -> AuditResult<AuditExport> {
    let export: AuditExport =
        serde_yaml::from_str(yaml_str).map_err(|e| AuditError::Export(e.to_string()))?;

    export.validate().map_err(AuditError::Export)?;

    Ok(export)
}
