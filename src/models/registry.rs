//! Registry of every declared state pair
//!
//! The FSM field implementation records each `(source, target)` pair of every
//! declared transition here. The registry is an explicit value handed to the
//! code that needs it (the graph renderer, the CLI) rather than process-wide
//! state.

use indexmap::IndexSet;

use super::machine::MachineDefinition;

/// Source state meaning "any declared state"
pub const WILDCARD: &str = "*";

/// Ordered collection of `(source, target)` state pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRegistry {
    pairs: Vec<(String, String)>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from machine definitions
    pub fn from_definitions<'a, I>(machines: I) -> Self
    where
        I: IntoIterator<Item = &'a MachineDefinition>,
    {
        let mut registry = Self::new();
        for machine in machines {
            registry.register(machine);
        }
        registry
    }

    /// Record one `(source, target)` pair
    pub fn add(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.pairs.push((source.into(), target.into()));
    }

    /// Record every pair declared by a machine, one per source state
    pub fn register(&mut self, machine: &MachineDefinition) {
        for transition in &machine.transitions {
            for source in transition.source.iter() {
                self.add(source, transition.target.as_str());
            }
        }
    }

    /// All recorded pairs in registration order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Distinct real state labels in first-seen order
    ///
    /// Empty labels and the wildcard are not states.
    pub fn states(&self) -> Vec<&str> {
        let states: IndexSet<&str> = self
            .pairs
            .iter()
            .flat_map(|(source, target)| [source.as_str(), target.as_str()])
            .filter(|state| !state.is_empty() && *state != WILDCARD)
            .collect();
        states.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
