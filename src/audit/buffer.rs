//! Per-record buffer of unsaved audit entries
//!
//! Entries wait here between the transition that produced them and the save
//! of their owning record. A record's list is created by its first
//! transition and removed when drained or discarded.

use std::collections::HashMap;

use crate::models::RecordRef;

use super::entry::AuditEntry;

/// Audit entries waiting for their owning record to be saved
#[derive(Debug, Default)]
pub struct PendingAudits {
    by_owner: HashMap<RecordRef, Vec<AuditEntry>>,
}

impl PendingAudits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its owner's list, returning the new list length
    pub fn push(&mut self, entry: AuditEntry) -> usize {
        let list = self.by_owner.entry(entry.owner().clone()).or_default();
        list.push(entry);
        list.len()
    }

    /// Entries waiting for the given record, oldest first
    pub fn pending(&self, owner: &RecordRef) -> &[AuditEntry] {
        self.by_owner
            .get(owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self, owner: &RecordRef) -> usize {
        self.pending(owner).len()
    }

    /// Whether no record has pending entries
    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }

    /// Remove and return the record's entries in insertion order
    pub fn drain(&mut self, owner: &RecordRef) -> Vec<AuditEntry> {
        self.by_owner.remove(owner).unwrap_or_default()
    }

    /// Put entries back in front of anything buffered since they were drained
    pub fn restore(&mut self, owner: &RecordRef, mut entries: Vec<AuditEntry>) {
        if entries.is_empty() {
            return;
        }
        if let Some(newer) = self.by_owner.remove(owner) {
            entries.extend(newer);
        }
        self.by_owner.insert(owner.clone(), entries);
    }

    /// Drop the record's entries without persisting them
    pub fn discard(&mut self, owner: &RecordRef) -> usize {
        self.by_owner.remove(owner).map(|list| list.len()).unwrap_or(0)
    }

    /// Records that currently have pending entries
    pub fn owners(&self) -> impl Iterator<Item = &RecordRef> {
        self.by_owner.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, target: &str) -> AuditEntry {
        AuditEntry::new(RecordRef::new("shop.order", id), "state", "go", "new", target)
    }

    #[test]
    fn test_push_creates_list_on_first_entry() {
        let mut buffer = PendingAudits::new();
        let owner = RecordRef::new("shop.order", 1);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(&owner), 0);

        assert_eq!(buffer.push(entry(1, "paid")), 1);
        assert_eq!(buffer.push(entry(1, "shipped")), 2);
        assert_eq!(buffer.len(&owner), 2);
        assert_eq!(buffer.owners().count(), 1);
    }

    #[test]
    fn test_drain_preserves_order_and_clears() {
        let mut buffer = PendingAudits::new();
        let owner = RecordRef::new("shop.order", 1);
        buffer.push(entry(1, "paid"));
        buffer.push(entry(2, "paid"));
        buffer.push(entry(1, "shipped"));

        let drained = buffer.drain(&owner);
        let targets: Vec<_> = drained.iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec!["paid", "shipped"]);

        assert_eq!(buffer.len(&owner), 0);
        assert_eq!(buffer.len(&RecordRef::new("shop.order", 2)), 1);
    }

    #[test]
    fn test_restore_goes_before_newer_entries() {
        let mut buffer = PendingAudits::new();
        let owner = RecordRef::new("shop.order", 1);
        buffer.push(entry(1, "paid"));
        let drained = buffer.drain(&owner);

        buffer.push(entry(1, "refunded"));
        buffer.restore(&owner, drained);

        let targets: Vec<_> = buffer.pending(&owner).iter().map(|e| e.target()).collect();
        assert_eq!(targets, vec!["paid", "refunded"]);
    }

    #[test]
    fn test_discard() {
        let mut buffer = PendingAudits::new();
        let owner = RecordRef::new("shop.order", 1);
        buffer.push(entry(1, "paid"));

        assert_eq!(buffer.discard(&owner), 1);
        assert_eq!(buffer.discard(&owner), 0);
        assert!(buffer.is_empty());
    }
}
