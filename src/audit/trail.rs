//! The audit trail: transition observer and save-time flusher
//!
//! `AuditTrail` turns each transition event into one buffered `AuditEntry`
//! and writes a record's buffered entries to the store when that record is
//! saved. Entries of a record that is never saved stay in memory until
//! discarded and never reach the store.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::error::{AuditError, AuditResult};
use crate::models::RecordRef;

use super::buffer::PendingAudits;
use super::entry::AuditEntry;
use super::query::ScopedAuditQuery;
use super::signals::{SaveEvent, SaveListener, Signals, TransitionEvent, TransitionListener};
use super::store::AuditStore;

/// Buffers audit entries per record and persists them on save
pub struct AuditTrail<S> {
    store: S,
    pending: Mutex<PendingAudits>,
}

impl<S: AuditStore> AuditTrail<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: Mutex::new(PendingAudits::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn buffer(&self) -> AuditResult<MutexGuard<'_, PendingAudits>> {
        self.pending
            .lock()
            .map_err(|e| AuditError::Storage(format!("Failed to acquire audit buffer lock: {}", e)))
    }

    /// Buffer one entry for a completed transition
    ///
    /// Entries the store would reject are refused here, so nothing that can
    /// never be persisted sits in the buffer.
    pub fn record_transition(&self, event: &TransitionEvent) -> AuditResult<()> {
        let entry = AuditEntry::from_event(event);
        entry.validate()?;
        let queued = self.buffer()?.push(entry);

        debug!(
            owner = %event.owner,
            field = %event.field,
            transition = %event.transition,
            source = %event.source,
            target = %event.target,
            queued,
            "buffered transition audit"
        );

        Ok(())
    }

    /// Persist the record's buffered entries in order, returning how many
    /// were written
    ///
    /// The buffer is emptied, so saving again does not write the same
    /// entries twice. If the store fails, the failing entry and everything
    /// after it go back into the buffer and the store error is returned
    /// unchanged.
    pub fn flush(&self, owner: &RecordRef) -> AuditResult<usize> {
        let entries = self.buffer()?.drain(owner);
        if entries.is_empty() {
            return Ok(0);
        }

        let total = entries.len();
        let mut remaining = entries.into_iter();
        let mut written = 0;

        while let Some(entry) = remaining.next() {
            if let Err(err) = self.store.insert(&entry) {
                let mut unsaved = vec![entry];
                unsaved.extend(remaining);

                warn!(
                    owner = %owner,
                    written,
                    unsaved = unsaved.len(),
                    error = %err,
                    "failed to persist transition audit"
                );

                match self.buffer() {
                    Ok(mut pending) => pending.restore(owner, unsaved),
                    Err(lock_err) => {
                        warn!(owner = %owner, error = %lock_err, "dropping unsaved transition audits")
                    }
                }
                return Err(err);
            }
            written += 1;
        }

        info!(owner = %owner, count = total, "persisted transition audits");
        Ok(written)
    }

    /// Drop the record's buffered entries without persisting them
    pub fn discard(&self, owner: &RecordRef) -> AuditResult<usize> {
        let dropped = self.buffer()?.discard(owner);
        if dropped > 0 {
            debug!(owner = %owner, dropped, "discarded unsaved transition audits");
        }
        Ok(dropped)
    }

    /// Copy of the record's buffered entries
    pub fn pending(&self, owner: &RecordRef) -> AuditResult<Vec<AuditEntry>> {
        Ok(self.buffer()?.pending(owner).to_vec())
    }

    pub fn pending_count(&self, owner: &RecordRef) -> AuditResult<usize> {
        Ok(self.buffer()?.len(owner))
    }

    /// Query the persisted entries of one record field
    pub fn query(&self, owner: RecordRef, field: impl Into<String>) -> ScopedAuditQuery<'_, S> {
        ScopedAuditQuery::new(&self.store, owner, field)
    }
}

impl<S: AuditStore + 'static> AuditTrail<S> {
    /// Register this trail as both transition and save listener
    pub fn attach(self: &Arc<Self>, signals: &mut Signals) {
        signals.connect_transition(Arc::clone(self) as Arc<dyn TransitionListener>);
        signals.connect_save(Arc::clone(self) as Arc<dyn SaveListener>);
    }
}

impl<S: AuditStore> TransitionListener for AuditTrail<S> {
    fn on_transition(&self, event: &TransitionEvent) -> AuditResult<()> {
        self.record_transition(event)
    }
}

impl<S: AuditStore> SaveListener for AuditTrail<S> {
    fn on_save(&self, event: &SaveEvent) -> AuditResult<()> {
        self.flush(&event.owner).map(|_| ())
    }
}
