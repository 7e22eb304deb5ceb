//! Core data models for fsm-audit
//!
//! Record references, audit identifiers, and the declared state machines
//! that the audit trail and the graph renderer read from.

pub mod ids;
pub mod machine;
pub mod record;
pub mod registry;

pub use ids::AuditId;
pub use machine::{load_definitions, MachineDefinition, SourceStates, TransitionDefinition};
pub use record::{RecordRef, RecordResolver, Tracked};
pub use registry::{StateRegistry, WILDCARD};
