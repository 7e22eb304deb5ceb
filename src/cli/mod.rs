//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the audit and graph layers.

pub mod audit;
pub mod export;
pub mod graph;

pub use audit::{
    handle_history_command, handle_log_command, handle_record_command, HistoryArgs, LogArgs,
    RecordArgs,
};
pub use export::{handle_export_command, ExportArgs};
pub use graph::{handle_dot_command, handle_graph_command, DotArgs, GraphArgs};
