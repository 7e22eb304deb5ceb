//! PNG rendering through Graphviz
//!
//! Layout is delegated to the external `dot` program. Rendering is a
//! developer convenience: when the program is not installed nothing is
//! written and the caller gets `Ok(false)`.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{AuditError, AuditResult};
use crate::models::StateRegistry;

use super::builder::StateGraph;

/// Renders state graphs with an external Graphviz executable
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    dot_command: String,
    node_shape: String,
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl GraphRenderer {
    pub fn new(dot_command: impl Into<String>, node_shape: impl Into<String>) -> Self {
        Self {
            dot_command: dot_command.into(),
            node_shape: node_shape.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.dot_command.as_str(), settings.node_shape.as_str())
    }

    /// DOT source for a graph using this renderer's node shape
    pub fn dot_source(&self, graph: &StateGraph) -> String {
        graph.to_dot(&self.node_shape)
    }

    /// Render a graph to a PNG file
    ///
    /// Returns `Ok(true)` when the image was written and `Ok(false)` when the
    /// Graphviz executable could not be found.
    pub fn write_png(&self, graph: &StateGraph, output: &Path) -> AuditResult<bool> {
        let mut child = match Command::new(&self.dot_command)
            .arg("-Tpng")
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(command = %self.dot_command, "graphviz not available, skipping graph");
                return Ok(false);
            }
            Err(e) => {
                return Err(AuditError::Graph(format!(
                    "Failed to start {}: {}",
                    self.dot_command, e
                )))
            }
        };

        let source = self.dot_source(graph);
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(|e| {
                AuditError::Graph(format!("Failed to send graph to {}: {}", self.dot_command, e))
            })?;
        }

        let result = child.wait_with_output().map_err(|e| {
            AuditError::Graph(format!("Failed to wait for {}: {}", self.dot_command, e))
        })?;

        if !result.status.success() {
            return Err(AuditError::Graph(format!(
                "{} exited with {}: {}",
                self.dot_command,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        debug!(
            output = %output.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "rendered state graph"
        );
        Ok(true)
    }

    /// Render every pair of a registry to a PNG file
    pub fn write_registry(&self, registry: &StateRegistry, output: &Path) -> AuditResult<bool> {
        self.write_png(&StateGraph::from_registry(registry), output)
    }
}

/// Render every declared state machine to a PNG file with default settings
pub fn write_png_graph(registry: &StateRegistry, output: &Path) -> AuditResult<bool> {
    GraphRenderer::default().write_registry(registry, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_graphviz_is_silent_noop() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("states.png");
        let renderer = GraphRenderer::new("fsm-audit-test-no-such-dot", "rect");

        let mut registry = StateRegistry::new();
        registry.add("A", "B");

        let written = renderer
            .write_png(&StateGraph::from_registry(&registry), &output)
            .unwrap();

        assert!(!written);
        assert!(!output.exists());
    }

    #[test]
    fn test_failing_graphviz_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("states.png");
        let renderer = GraphRenderer::new("false", "rect");

        let mut registry = StateRegistry::new();
        registry.add("A", "B");

        let err = renderer.write_registry(&registry, &output).unwrap_err();
        assert!(matches!(err, AuditError::Graph(_)));
    }

    #[test]
    fn test_write_png_graph_reports_whether_image_was_written() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("states.png");

        let mut registry = StateRegistry::new();
        registry.add("draft", "published");
        registry.add("*", "archived");

        // depends on whether graphviz is installed on this machine
        let written = write_png_graph(&registry, &output).unwrap();
        assert_eq!(written, output.exists());
    }

    #[test]
    fn test_dot_source_uses_configured_shape() {
        let renderer = GraphRenderer::new("dot", "ellipse");
        let mut registry = StateRegistry::new();
        registry.add("A", "B");

        let source = renderer.dot_source(&StateGraph::from_registry(&registry));
        assert!(source.contains("[shape=ellipse]"));
    }
}
