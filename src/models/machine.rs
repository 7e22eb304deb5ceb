//! Declarative state machine definitions
//!
//! Machines are described in a YAML or JSON file so that tooling outside the
//! host application (the graph renderer, the CLI) can see every declared
//! transition.
//!
//! ```yaml
//! machines:
//!   - record_type: shop.order
//!     field: state
//!     transitions:
//!       - name: pay
//!         source: new
//!         target: paid
//!       - name: cancel
//!         source: [new, paid]
//!         target: cancelled
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

use super::registry::WILDCARD;

/// Source states of a transition: a single label or a list of labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceStates {
    One(String),
    Many(Vec<String>),
}

impl SourceStates {
    /// Iterate over every source label
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            SourceStates::One(state) => std::slice::from_ref(state),
            SourceStates::Many(states) => states,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for SourceStates {
    fn from(state: &str) -> Self {
        SourceStates::One(state.to_string())
    }
}

impl From<Vec<&str>> for SourceStates {
    fn from(states: Vec<&str>) -> Self {
        SourceStates::Many(states.into_iter().map(String::from).collect())
    }
}

/// One declared transition of a state field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    /// Transition name (the method name on the host record)
    pub name: String,

    /// State(s) the transition may start from; `*` means any state
    pub source: SourceStates,

    /// State the transition ends in
    pub target: String,
}

/// All transitions declared for one state field of one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    pub record_type: String,
    pub field: String,
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
}

impl MachineDefinition {
    pub fn new(record_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            field: field.into(),
            transitions: Vec::new(),
        }
    }

    /// Add a transition (builder style)
    pub fn transition(
        mut self,
        name: impl Into<String>,
        source: impl Into<SourceStates>,
        target: impl Into<String>,
    ) -> Self {
        self.transitions.push(TransitionDefinition {
            name: name.into(),
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Validate the definition
    pub fn validate(&self) -> AuditResult<()> {
        if self.record_type.trim().is_empty() {
            return Err(AuditError::Validation(
                "Machine record_type cannot be empty".into(),
            ));
        }
        if self.field.trim().is_empty() {
            return Err(AuditError::Validation(format!(
                "Machine for '{}' has an empty field name",
                self.record_type
            )));
        }

        for transition in &self.transitions {
            if transition.name.trim().is_empty() {
                return Err(AuditError::Validation(format!(
                    "Transition of {}.{} has an empty name",
                    self.record_type, self.field
                )));
            }
            if transition.target == WILDCARD {
                return Err(AuditError::Validation(format!(
                    "Transition '{}' cannot target the wildcard state",
                    transition.name
                )));
            }
        }

        Ok(())
    }
}

/// On-disk layout of a machine definitions file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineFile {
    #[serde(default)]
    pub machines: Vec<MachineDefinition>,
}

/// Load and validate machine definitions from a YAML or JSON file
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn load_definitions<P: AsRef<Path>>(path: P) -> AuditResult<Vec<MachineDefinition>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AuditError::machines_not_found(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AuditError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let file: MachineFile = if is_json {
        serde_json::from_str(&contents).map_err(|e| {
            AuditError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?
    } else {
        serde_yaml::from_str(&contents).map_err(|e| {
            AuditError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?
    };

    for machine in &file.machines {
        machine.validate()?;
    }

    Ok(file.machines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORDER_YAML: &str = r#"
machines:
  - record_type: shop.order
    field: state
    transitions:
      - name: pay
        source: new
        target: paid
      - name: cancel
        source: [new, paid]
        target: cancelled
"#;

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("machines.yaml");
        std::fs::write(&path, ORDER_YAML).unwrap();

        let machines = load_definitions(&path).unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].field, "state");
        assert_eq!(machines[0].transitions.len(), 2);
        assert_eq!(
            machines[0].transitions[1].source.iter().collect::<Vec<_>>(),
            vec!["new", "paid"]
        );
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("machines.json");
        std::fs::write(
            &path,
            r#"{"machines": [{"record_type": "blog.post", "field": "status",
                "transitions": [{"name": "publish", "source": "*", "target": "published"}]}]}"#,
        )
        .unwrap();

        let machines = load_definitions(&path).unwrap();
        assert_eq!(machines[0].transitions[0].source, SourceStates::One("*".into()));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_definitions(temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_wildcard_target_rejected() {
        let machine = MachineDefinition::new("blog.post", "status").transition("reset", "a", "*");
        assert!(machine.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_builder() {
        let machine = MachineDefinition::new("blog.post", "status")
            .transition("publish", "draft", "published")
            .transition("archive", vec!["draft", "published"], "archived");

        assert!(machine.validate().is_ok());
        assert_eq!(machine.transitions.len(), 2);
    }
}
