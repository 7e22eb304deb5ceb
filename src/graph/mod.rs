//! State machine graphs
//!
//! Builds a deduplicated graph of every declared state and renders it as
//! DOT text or, through Graphviz, a PNG image.

mod builder;
mod render;

pub use builder::StateGraph;
pub use render::{write_png_graph, GraphRenderer};
