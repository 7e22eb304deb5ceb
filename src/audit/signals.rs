//! Transition and save notifications
//!
//! The host raises `post_transition` after a tracked field changes state and
//! `post_save` after a record is written. Listeners are registered on a
//! [`Signals`] value that the host constructs and owns, so there is no
//! process-wide registration.

use std::sync::Arc;

use crate::error::AuditResult;
use crate::models::{RecordRef, Tracked};

/// Payload of a completed transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub owner: RecordRef,
    pub field: String,
    pub transition: String,
    pub source: String,
    pub target: String,
}

impl TransitionEvent {
    pub fn new(
        owner: RecordRef,
        field: impl Into<String>,
        transition: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            owner,
            field: field.into(),
            transition: transition.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Payload of a record save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEvent {
    pub owner: RecordRef,
}

impl SaveEvent {
    pub fn new(owner: RecordRef) -> Self {
        Self { owner }
    }

    pub fn for_record<T: Tracked>(record: &T) -> Self {
        Self::new(record.record_ref())
    }
}

/// Reacts to completed transitions
pub trait TransitionListener: Send + Sync {
    fn on_transition(&self, event: &TransitionEvent) -> AuditResult<()>;
}

/// Reacts to record saves
pub trait SaveListener: Send + Sync {
    fn on_save(&self, event: &SaveEvent) -> AuditResult<()>;
}

impl<F> TransitionListener for F
where
    F: Fn(&TransitionEvent) -> AuditResult<()> + Send + Sync,
{
    fn on_transition(&self, event: &TransitionEvent) -> AuditResult<()> {
        self(event)
    }
}

impl<F> SaveListener for F
where
    F: Fn(&SaveEvent) -> AuditResult<()> + Send + Sync,
{
    fn on_save(&self, event: &SaveEvent) -> AuditResult<()> {
        self(event)
    }
}

/// Explicit listener registry for transition and save notifications
#[derive(Default)]
pub struct Signals {
    transition_listeners: Vec<Arc<dyn TransitionListener>>,
    save_listeners: Vec<Arc<dyn SaveListener>>,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for completed transitions
    pub fn connect_transition(&mut self, listener: Arc<dyn TransitionListener>) {
        self.transition_listeners.push(listener);
    }

    /// Register a listener for record saves
    pub fn connect_save(&mut self, listener: Arc<dyn SaveListener>) {
        self.save_listeners.push(listener);
    }

    /// Notify transition listeners in registration order
    ///
    /// Stops at and returns the first listener error.
    pub fn post_transition(&self, event: &TransitionEvent) -> AuditResult<()> {
        for listener in &self.transition_listeners {
            listener.on_transition(event)?;
        }
        Ok(())
    }

    /// Notify save listeners in registration order
    ///
    /// Stops at and returns the first listener error.
    pub fn post_save(&self, event: &SaveEvent) -> AuditResult<()> {
        for listener in &self.save_listeners {
            listener.on_save(event)?;
        }
        Ok(())
    }

    pub fn transition_listener_count(&self) -> usize {
        self.transition_listeners.len()
    }

    pub fn save_listener_count(&self) -> usize {
        self.save_listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuditError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event() -> TransitionEvent {
        TransitionEvent::new(RecordRef::new("blog.post", 3), "status", "publish", "draft", "published")
    }

    #[test]
    fn test_no_listeners_is_ok() {
        let signals = Signals::new();
        assert!(signals.post_transition(&event()).is_ok());
        assert!(signals.post_save(&SaveEvent::new(RecordRef::new("blog.post", 3))).is_ok());
    }

    #[test]
    fn test_listeners_called_in_order() {
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut signals = Signals::new();

        for tag in ["first", "second"] {
            let calls = Arc::clone(&calls);
            signals.connect_transition(Arc::new(move |e: &TransitionEvent| -> AuditResult<()> {
                calls.lock().unwrap().push(format!("{}:{}", tag, e.target));
                Ok(())
            }));
        }

        signals.post_transition(&event()).unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first:published".to_string(), "second:published".to_string()]
        );
        assert_eq!(signals.transition_listener_count(), 2);
    }

    #[test]
    fn test_first_error_propagates() {
        let later = Arc::new(AtomicUsize::new(0));
        let mut signals = Signals::new();

        signals.connect_save(Arc::new(|_: &SaveEvent| -> AuditResult<()> {
            Err(AuditError::Storage("disk full".into()))
        }));
        let counter = Arc::clone(&later);
        signals.connect_save(Arc::new(move |_: &SaveEvent| -> AuditResult<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        let err = signals
            .post_save(&SaveEvent::new(RecordRef::new("blog.post", 3)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Storage error: disk full");
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }
}
