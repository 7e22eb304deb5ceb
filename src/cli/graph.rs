//! State graph CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::config::{AuditPaths, Settings};
use crate::error::AuditResult;
use crate::graph::{GraphRenderer, StateGraph};
use crate::models::{load_definitions, StateRegistry};

/// Arguments of `graph`
#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Output PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Machine definitions file (YAML or JSON)
    #[arg(short, long)]
    pub machines: Option<PathBuf>,
}

/// Arguments of `dot`
#[derive(Debug, Args)]
pub struct DotArgs {
    /// Machine definitions file (YAML or JSON)
    #[arg(short, long)]
    pub machines: Option<PathBuf>,
}

fn load_graph(
    paths: &AuditPaths,
    settings: &Settings,
    machines: Option<PathBuf>,
) -> AuditResult<StateGraph> {
    let machines_path = machines.unwrap_or_else(|| settings.machines_path(paths));
    let definitions = load_definitions(&machines_path)?;
    let registry = StateRegistry::from_definitions(&definitions);
    Ok(StateGraph::from_registry(&registry))
}

/// Render every declared machine to a PNG image
pub fn handle_graph_command(
    paths: &AuditPaths,
    settings: &Settings,
    args: GraphArgs,
) -> AuditResult<()> {
    let graph = load_graph(paths, settings, args.machines)?;
    let output = args.output.unwrap_or_else(|| paths.graph_file());

    let renderer = GraphRenderer::from_settings(settings);
    if renderer.write_png(&graph, &output)? {
        println!(
            "Wrote {} states and {} transitions to {}",
            graph.node_count(),
            graph.edge_count(),
            output.display()
        );
    }

    Ok(())
}

/// Print the DOT source of every declared machine
pub fn handle_dot_command(
    paths: &AuditPaths,
    settings: &Settings,
    args: DotArgs,
) -> AuditResult<()> {
    let graph = load_graph(paths, settings, args.machines)?;
    print!("{}", GraphRenderer::from_settings(settings).dot_source(&graph));
    Ok(())
}
