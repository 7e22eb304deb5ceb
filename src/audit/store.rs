//! Audit persistence interface
//!
//! `AuditStore` is the seam between the audit trail and durable storage.
//! `MemoryAuditStore` keeps entries in process; the append-only file store
//! lives in `logger`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{AuditError, AuditResult};

use super::entry::AuditEntry;

/// Durable storage for audit entries
///
/// Entries are insert-only; there is no update or delete.
pub trait AuditStore: Send + Sync {
    /// Persist one entry
    fn insert(&self, entry: &AuditEntry) -> AuditResult<()>;

    /// Every stored entry in insertion order
    fn entries(&self) -> AuditResult<Vec<AuditEntry>>;
}

impl<S: AuditStore + ?Sized> AuditStore for Arc<S> {
    fn insert(&self, entry: &AuditEntry) -> AuditResult<()> {
        (**self).insert(entry)
    }

    fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        (**self).entries()
    }
}

impl<S: AuditStore + ?Sized> AuditStore for &S {
    fn insert(&self, entry: &AuditEntry) -> AuditResult<()> {
        (**self).insert(entry)
    }

    fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        (**self).entries()
    }
}

/// In-process audit store
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    data: RwLock<Vec<AuditEntry>>,
    insert_calls: AtomicUsize,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `insert` has been called, including failed calls
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of stored entries
    pub fn len(&self) -> AuditResult<usize> {
        let data = self.data.read().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> AuditResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl AuditStore for MemoryAuditStore {
    fn insert(&self, entry: &AuditEntry) -> AuditResult<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        entry.validate()?;

        let mut data = self.data.write().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        let data = self.data.read().map_err(|e| {
            AuditError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }
}
