//! References to owning records
//!
//! Audit entries point at the record whose field transitioned through a
//! (type tag, identifier) pair. The owning record's Rust type is unknown to
//! the audit subsystem, so resolving a reference back into a record goes
//! through a [`RecordResolver`] supplied by the host.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Polymorphic reference to an owning record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordRef {
    /// Type tag of the owning record (e.g. "shop.order")
    pub record_type: String,

    /// Identifier of the owning record within its type
    pub object_id: u64,
}

impl RecordRef {
    pub fn new(record_type: impl Into<String>, object_id: u64) -> Self {
        Self {
            record_type: record_type.into(),
            object_id,
        }
    }

    /// Check whether this reference points at a record of the given type
    pub fn is_type(&self, record_type: &str) -> bool {
        self.record_type == record_type
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.record_type, self.object_id)
    }
}

impl FromStr for RecordRef {
    type Err = AuditError;

    /// Parse the `type#id` form produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (record_type, id) = s.rsplit_once('#').ok_or_else(|| {
            AuditError::Validation(format!("Record reference '{}' is not of the form type#id", s))
        })?;

        if record_type.is_empty() {
            return Err(AuditError::Validation(format!(
                "Record reference '{}' has an empty type",
                s
            )));
        }

        let object_id = id.parse::<u64>().map_err(|e| {
            AuditError::Validation(format!("Invalid record id '{}': {}", id, e))
        })?;

        Ok(Self::new(record_type, object_id))
    }
}

/// A host record whose state fields are audited
pub trait Tracked {
    /// Type tag stored in audit entries for this record type
    const RECORD_TYPE: &'static str;

    /// Identifier of this record within its type
    fn object_id(&self) -> u64;

    fn record_ref(&self) -> RecordRef {
        RecordRef::new(Self::RECORD_TYPE, self.object_id())
    }
}

/// Resolves a [`RecordRef`] back into a host record
pub trait RecordResolver {
    type Record;

    fn resolve(&self, reference: &RecordRef) -> Option<Self::Record>;
}

impl<T: Clone> RecordResolver for HashMap<RecordRef, T> {
    type Record = T;

    fn resolve(&self, reference: &RecordRef) -> Option<T> {
        self.get(reference).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order {
        id: u64,
    }

    impl Tracked for Order {
        const RECORD_TYPE: &'static str = "shop.order";

        fn object_id(&self) -> u64 {
            self.id
        }
    }

    #[test]
    fn test_display_and_parse() {
        let reference = RecordRef::new("shop.order", 42);
        assert_eq!(reference.to_string(), "shop.order#42");

        let parsed: RecordRef = "shop.order#42".parse().unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("shop.order".parse::<RecordRef>().unwrap_err().is_validation());
        assert!("#42".parse::<RecordRef>().unwrap_err().is_validation());
        assert!("shop.order#-1".parse::<RecordRef>().unwrap_err().is_validation());
    }

    #[test]
    fn test_tracked_record_ref() {
        let order = Order { id: 7 };
        let reference = order.record_ref();
        assert!(reference.is_type("shop.order"));
        assert_eq!(reference.object_id, 7);
    }

    #[test]
    fn test_map_resolver() {
        let mut records = HashMap::new();
        records.insert(RecordRef::new("shop.order", 1), "first order".to_string());

        assert_eq!(
            records.resolve(&RecordRef::new("shop.order", 1)),
            Some("first order".to_string())
        );
        assert_eq!(records.resolve(&RecordRef::new("shop.invoice", 1)), None);
    }
}
