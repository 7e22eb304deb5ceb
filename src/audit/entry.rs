//! Audit entry data structures
//!
//! An `AuditEntry` describes one completed transition of a tracked field.
//! Entries are immutable: they are built once from a transition event and
//! only ever inserted into a store, never updated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};
use crate::models::{AuditId, RecordRef, RecordResolver};

use super::signals::TransitionEvent;

/// Maximum length of a field name
pub const FIELD_MAX_LEN: usize = 32;

/// Maximum length of a state label
pub const STATE_MAX_LEN: usize = 50;

/// Maximum length of a transition name
pub const TRANSITION_MAX_LEN: usize = 50;

/// A single transition audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    id: AuditId,

    /// When the transition was observed (UTC)
    created_at: DateTime<Utc>,

    /// Name of the state field that transitioned
    field: String,

    /// Name of the transition that ran
    transition: String,

    /// Previous state
    source: String,

    /// New state
    target: String,

    /// The record whose field transitioned
    owner: RecordRef,
}

impl AuditEntry {
    /// Create a new entry timestamped now
    pub fn new(
        owner: RecordRef,
        field: impl Into<String>,
        transition: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditId::new(),
            created_at: Utc::now(),
            field: field.into(),
            transition: transition.into(),
            source: source.into(),
            target: target.into(),
            owner,
        }
    }

    /// Build the entry describing a transition event
    pub fn from_event(event: &TransitionEvent) -> Self {
        Self::new(
            event.owner.clone(),
            event.field.as_str(),
            event.transition.as_str(),
            event.source.as_str(),
            event.target.as_str(),
        )
    }

    pub fn id(&self) -> AuditId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn transition(&self) -> &str {
        &self.transition
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn owner(&self) -> &RecordRef {
        &self.owner
    }

    /// Check whether this entry belongs to the given record and field
    pub fn concerns(&self, owner: &RecordRef, field: &str) -> bool {
        self.owner == *owner && self.field == field
    }

    /// Resolve the owning record through a host-supplied resolver
    pub fn content_object<R: RecordResolver>(&self, resolver: &R) -> Option<R::Record> {
        resolver.resolve(&self.owner)
    }

    /// Check the entry against the storage column limits
    pub fn validate(&self) -> AuditResult<()> {
        if self.field.is_empty() {
            return Err(AuditError::Validation("Audit field name cannot be empty".into()));
        }
        if self.transition.is_empty() {
            return Err(AuditError::Validation(
                "Audit transition name cannot be empty".into(),
            ));
        }

        check_len("field", &self.field, FIELD_MAX_LEN)?;
        check_len("transition", &self.transition, TRANSITION_MAX_LEN)?;
        check_len("source", &self.source, STATE_MAX_LEN)?;
        check_len("target", &self.target, STATE_MAX_LEN)?;

        Ok(())
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {}: {} -> {} ({})",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.owner,
            self.field,
            display_state(&self.source),
            display_state(&self.target),
            self.transition
        )
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Audit({}, '{}' => '{}')",
            self.owner, self.source, self.target
        )
    }
}

fn check_len(what: &str, value: &str, max: usize) -> AuditResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(AuditError::Validation(format!(
            "Audit {} '{}' is {} characters, limit is {}",
            what, value, len, max
        )));
    }
    Ok(())
}

fn display_state(state: &str) -> &str {
    if state.is_empty() {
        "(none)"
    } else {
        state
    }
}
