//! Audit trail for state field transitions
//!
//! Records every completed transition of a tracked field and persists the
//! records when the owning record is saved.
//!
//! # Architecture
//!
//! - `AuditEntry`: one immutable transition record (timestamp, field,
//!   transition name, source and target state, owning record).
//! - `Signals`: explicit listener registration for `post_transition` and
//!   `post_save` notifications raised by the host.
//! - `AuditTrail`: listens to both notifications, buffering entries per
//!   record in `PendingAudits` and flushing them to an `AuditStore` on save.
//! - `JsonlAuditStore` / `MemoryAuditStore`: insert-only stores.
//! - `ScopedAuditQuery`: reads entries for one record field.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fsm_audit::audit::{AuditTrail, JsonlAuditStore, SaveEvent, Signals, TransitionEvent};
//! use fsm_audit::models::RecordRef;
//!
//! let trail = Arc::new(AuditTrail::new(JsonlAuditStore::new(audit_log_path)));
//! let mut signals = Signals::new();
//! trail.attach(&mut signals);
//!
//! let order = RecordRef::new("shop.order", 42);
//! signals.post_transition(&TransitionEvent::new(order.clone(), "state", "pay", "new", "paid"))?;
//! signals.post_save(&SaveEvent::new(order.clone()))?;
//!
//! let history = trail.query(order, "state").history()?;
//! ```

mod buffer;
mod entry;
mod logger;
mod query;
mod signals;
mod store;
mod trail;

pub use buffer::PendingAudits;
pub use entry::{AuditEntry, FIELD_MAX_LEN, STATE_MAX_LEN, TRANSITION_MAX_LEN};
pub use logger::JsonlAuditStore;
pub use query::ScopedAuditQuery;
pub use signals::{SaveEvent, SaveListener, Signals, TransitionEvent, TransitionListener};
pub use store::{AuditStore, MemoryAuditStore};
pub use trail::AuditTrail;
