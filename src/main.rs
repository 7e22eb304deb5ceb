use anyhow::Result;
use clap::{Parser, Subcommand};

use fsm_audit::audit::JsonlAuditStore;
use fsm_audit::cli::{
    handle_dot_command, handle_export_command, handle_graph_command, handle_history_command,
    handle_log_command, handle_record_command, DotArgs, ExportArgs, GraphArgs, HistoryArgs,
    LogArgs, RecordArgs,
};
use fsm_audit::config::{AuditPaths, Settings};
use fsm_audit::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "fsm-audit",
    version,
    about = "Audit trail and graphs for finite-state-machine fields",
    long_about = "fsm-audit keeps an append-only log of state field transitions \
                  and renders declared state machines with Graphviz."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recent audit entries
    Log(LogArgs),

    /// Show the state history of one record field
    History(HistoryArgs),

    /// Record a transition and save it to the audit log
    Record(RecordArgs),

    /// Render all declared state machines to a PNG image
    Graph(GraphArgs),

    /// Print the DOT source of all declared state machines
    Dot(DotArgs),

    /// Export the audit log
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AuditPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level, cli.verbose)?;

    let store = JsonlAuditStore::new(paths.audit_log());

    match cli.command {
        Some(Commands::Log(args)) => handle_log_command(&store, args, settings.recent_limit)?,
        Some(Commands::History(args)) => handle_history_command(&store, args)?,
        Some(Commands::Record(args)) => {
            paths.ensure_directories()?;
            handle_record_command(store, args)?;
        }
        Some(Commands::Graph(args)) => handle_graph_command(&paths, &settings, args)?,
        Some(Commands::Dot(args)) => handle_dot_command(&paths, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&store, args)?,
        Some(Commands::Config) => {
            println!("fsm-audit Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Machines file:    {}", settings.machines_path(&paths).display());
            println!();
            println!("Settings:");
            println!("  Graphviz command: {}", settings.dot_command);
            println!("  Node shape:       {}", settings.node_shape);
            println!("  Log level:        {}", settings.log_level);
            println!("  Recent limit:     {}", settings.recent_limit);
        }
        None => {
            println!("fsm-audit - audit trail for state machine fields");
            println!();
            println!("Run 'fsm-audit --help' for usage information.");
        }
    }

    Ok(())
}
