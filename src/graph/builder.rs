//! State graph construction
//!
//! Flattens every declared `(source, target)` pair into a directed graph of
//! states. A wildcard source becomes an edge from every known state, and
//! each edge appears once no matter how many machines declare it.

use indexmap::IndexSet;

use crate::models::{StateRegistry, WILDCARD};

/// Directed graph of declared states
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateGraph {
    nodes: IndexSet<String>,
    edges: IndexSet<(String, String)>,
}

impl StateGraph {
    /// Build the graph of every state pair in the registry
    pub fn from_registry(registry: &StateRegistry) -> Self {
        let states = registry.states();
        let nodes: IndexSet<String> = states.iter().map(|s| s.to_string()).collect();
        let mut edges = IndexSet::new();

        for (source, target) in registry.pairs() {
            if target.is_empty() || target == WILDCARD {
                continue;
            }

            if source == WILDCARD {
                for state in &states {
                    edges.insert((state.to_string(), target.clone()));
                }
            } else if !source.is_empty() {
                edges.insert((source.clone(), target.clone()));
            }
        }

        Self { nodes, edges }
    }

    /// State labels in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edges in first-declared order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(&(source.to_string(), target.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Graphviz DOT source for the graph
    pub fn to_dot(&self, node_shape: &str) -> String {
        let mut dot = String::from("digraph states {\n");

        for node in &self.nodes {
            dot.push_str(&format!(
                "  \"{}\" [shape={}];\n",
                escape_label(node),
                node_shape
            ));
        }

        for (source, target) in &self.edges {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape_label(source),
                escape_label(target)
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_expands_to_every_state() {
        let mut registry = StateRegistry::new();
        registry.add("A", "B");
        registry.add(WILDCARD, "C");

        let graph = StateGraph::from_registry(&registry);

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("A", "B"), ("A", "C"), ("B", "C"), ("C", "C")]
        );
        assert!(!graph.nodes().any(|n| n == WILDCARD));
        assert!(!graph.edges().any(|(s, t)| s == WILDCARD || t == WILDCARD));
    }

    #[test]
    fn test_duplicate_edges_suppressed() {
        let mut registry = StateRegistry::new();
        registry.add("A", "B");
        registry.add("A", "B");
        registry.add(WILDCARD, "B");

        let graph = StateGraph::from_registry(&registry);

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("A", "B"));
        assert!(graph.has_edge("B", "B"));
    }

    #[test]
    fn test_empty_labels_skipped() {
        let mut registry = StateRegistry::new();
        registry.add("", "new");
        registry.add("new", "paid");

        let graph = StateGraph::from_registry(&registry);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("new", "paid")]);
    }

    #[test]
    fn test_to_dot() {
        let mut registry = StateRegistry::new();
        registry.add("draft", "published");
        registry.add("say \"hi\"", "draft");

        let dot = StateGraph::from_registry(&registry).to_dot("rect");

        assert!(dot.starts_with("digraph states {\n"));
        assert!(dot.contains("  \"draft\" [shape=rect];\n"));
        assert!(dot.contains("  \"draft\" -> \"published\";\n"));
        assert!(dot.contains("\"say \\\"hi\\\"\" -> \"draft\""));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_empty_registry_gives_empty_graph() {
        let graph = StateGraph::from_registry(&StateRegistry::new());
        assert!(graph.is_empty());
        assert_eq!(graph.to_dot("rect"), "digraph states {\n}\n");
    }
}
