//! Audit lookups scoped to one record field
//!
//! A `ScopedAuditQuery` only remembers which record and field it is scoped
//! to. The store is read when a result is asked for, and rows belonging to
//! other records or other fields are never returned.

use crate::error::AuditResult;
use crate::models::{RecordRef, Tracked};

use super::entry::AuditEntry;
use super::store::AuditStore;

/// Read-only view of the audit entries of one record's field
pub struct ScopedAuditQuery<'a, S: ?Sized> {
    store: &'a S,
    owner: RecordRef,
    field: String,
}

impl<'a, S: AuditStore + ?Sized> ScopedAuditQuery<'a, S> {
    pub fn new(store: &'a S, owner: RecordRef, field: impl Into<String>) -> Self {
        Self {
            store,
            owner,
            field: field.into(),
        }
    }

    /// Scope to a host record's field
    pub fn for_record<T: Tracked>(store: &'a S, record: &T, field: impl Into<String>) -> Self {
        Self::new(store, record.record_ref(), field)
    }

    pub fn owner(&self) -> &RecordRef {
        &self.owner
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Matching entries, oldest first
    pub fn all(&self) -> AuditResult<Vec<AuditEntry>> {
        Ok(self
            .store
            .entries()?
            .into_iter()
            .filter(|entry| entry.concerns(&self.owner, &self.field))
            .collect())
    }

    pub fn count(&self) -> AuditResult<usize> {
        Ok(self.all()?.len())
    }

    pub fn exists(&self) -> AuditResult<bool> {
        Ok(self.count()? > 0)
    }

    /// The most recent matching entry
    pub fn latest(&self) -> AuditResult<Option<AuditEntry>> {
        Ok(self.all()?.pop())
    }

    /// States the field has passed through, in order
    ///
    /// Starts with the first recorded source state unless it was empty
    /// (an initial transition), followed by each target.
    pub fn history(&self) -> AuditResult<Vec<String>> {
        let entries = self.all()?;
        let mut states = Vec::with_capacity(entries.len() + 1);

        if let Some(first) = entries.first() {
            if !first.source().is_empty() {
                states.push(first.source().to_string());
            }
        }
        states.extend(entries.iter().map(|entry| entry.target().to_string()));

        Ok(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::store::MemoryAuditStore;

    struct Order {
        id: u64,
    }

    impl Tracked for Order {
        const RECORD_TYPE: &'static str = "shop.order";

        fn object_id(&self) -> u64 {
            self.id
        }
    }

    fn seeded_store() -> MemoryAuditStore {
        let store = MemoryAuditStore::new();
        let rows = [
            (RecordRef::new("shop.order", 1), "state", "new", "paid"),
            (RecordRef::new("shop.order", 1), "payment_state", "open", "settled"),
            (RecordRef::new("shop.order", 2), "state", "new", "cancelled"),
            (RecordRef::new("shop.invoice", 1), "state", "draft", "sent"),
            (RecordRef::new("shop.order", 1), "state", "paid", "shipped"),
        ];
        for (owner, field, source, target) in rows {
            store
                .insert(&AuditEntry::new(owner, field, "go", source, target))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_only_matching_record_and_field() {
        let store = seeded_store();
        let query = ScopedAuditQuery::new(&store, RecordRef::new("shop.order", 1), "state");

        let entries = query.all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .all(|e| e.owner() == &RecordRef::new("shop.order", 1) && e.field() == "state"));
    }

    #[test]
    fn test_same_id_other_type_excluded() {
        let store = seeded_store();
        let query = ScopedAuditQuery::new(&store, RecordRef::new("shop.invoice", 1), "state");

        let entries = query.all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target(), "sent");
    }

    #[test]
    fn test_for_record_latest_and_history() {
        let store = seeded_store();
        let order = Order { id: 1 };
        let query = ScopedAuditQuery::for_record(&store, &order, "state");

        assert_eq!(query.latest().unwrap().unwrap().target(), "shipped");
        assert_eq!(query.history().unwrap(), vec!["new", "paid", "shipped"]);
        assert_eq!(query.count().unwrap(), 2);
    }

    #[test]
    fn test_no_matches() {
        let store = seeded_store();
        let query = ScopedAuditQuery::new(&store, RecordRef::new("shop.order", 99), "state");

        assert!(!query.exists().unwrap());
        assert!(query.latest().unwrap().is_none());
        assert!(query.history().unwrap().is_empty());
    }

    #[test]
    fn test_lazy_sees_later_inserts() {
        let store = MemoryAuditStore::new();
        let owner = RecordRef::new("shop.order", 5);
        let query = ScopedAuditQuery::new(&store, owner.clone(), "state");
        assert_eq!(query.count().unwrap(), 0);

        store
            .insert(&AuditEntry::new(owner, "state", "pay", "new", "paid"))
            .unwrap();
        assert_eq!(query.count().unwrap(), 1);
    }
}
