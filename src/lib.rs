//! fsm-audit - audit trail for finite-state-machine fields
//!
//! This library records every transition of a tracked state field on a
//! persisted record and writes those records to storage when the owning
//! record is saved. It can also render every declared state machine as a
//! graph.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record references and declared state machines
//! - `audit`: Transition signals, buffering, stores and scoped queries
//! - `graph`: State graph construction and Graphviz rendering
//! - `export`: CSV, JSON and YAML export of the audit log
//! - `cli`: Command handlers for the `fsm-audit` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fsm_audit::audit::{AuditTrail, MemoryAuditStore, Signals};
//!
//! let trail = Arc::new(AuditTrail::new(MemoryAuditStore::new()));
//! let mut signals = Signals::new();
//! trail.attach(&mut signals);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod logging;
pub mod models;

pub use error::{AuditError, AuditResult};
