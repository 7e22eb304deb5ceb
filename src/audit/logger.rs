//! Append-only audit log file
//!
//! Provides `JsonlAuditStore`, an `AuditStore` that writes each entry as a
//! single JSON line and flushes immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{AuditError, AuditResult};

use super::entry::AuditEntry;
use super::store::AuditStore;

/// Audit store backed by a line-delimited JSON (JSONL) file
///
/// Each line is a complete JSON object representing one audit entry.
pub struct JsonlAuditStore {
    /// Path to the audit log file
    log_path: PathBuf,

    /// Serializes appends from concurrent savers
    write_lock: Mutex<()>,
}

impl JsonlAuditStore {
    /// Create a store that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            write_lock: Mutex::new(()),
        }
    }

    fn open_for_append(&self) -> AuditResult<File> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuditError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| AuditError::Io(format!("Failed to open audit log: {}", e)))
    }

    fn write_line(file: &mut File, entry: &AuditEntry) -> AuditResult<()> {
        let json = serde_json::to_string(entry)
            .map_err(|e| AuditError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| AuditError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Append several entries and flush once at the end
    ///
    /// Every entry is validated before the file is touched, so an invalid
    /// entry leaves the log unchanged.
    pub fn insert_batch(&self, entries: &[AuditEntry]) -> AuditResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        for entry in entries {
            entry.validate()?;
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AuditError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut file = self.open_for_append()?;
        for entry in entries {
            Self::write_line(&mut file, entry)?;
        }

        file.flush()
            .map_err(|e| AuditError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read all audit entries from the log file, oldest first
    pub fn read_all(&self) -> AuditResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AuditError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                AuditError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                AuditError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> AuditResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Get the number of entries in the audit log
    pub fn entry_count(&self) -> AuditResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AuditError::Io(format!("Failed to open audit log: {}", e)))?;

        let count = BufReader::new(file)
            .lines()
            .filter_map(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count();

        Ok(count)
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl AuditStore for JsonlAuditStore {
    fn insert(&self, entry: &AuditEntry) -> AuditResult<()> {
        entry.validate()?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AuditError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut file = self.open_for_append()?;
        Self::write_line(&mut file, entry)?;

        file.flush()
            .map_err(|e| AuditError::Io(format!("Failed to flush audit log: {}", e)))
    }

    fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        self.read_all()
    }
}
