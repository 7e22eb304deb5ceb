//! Audit trail CLI commands
//!
//! Listing, per-field history, and recording transitions from scripts.

use std::sync::Arc;

use clap::Args;

use crate::audit::{
    AuditEntry, AuditStore, AuditTrail, JsonlAuditStore, SaveEvent, ScopedAuditQuery, Signals,
    TransitionEvent,
};
use crate::error::AuditResult;
use crate::models::RecordRef;

/// Arguments of `log`
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Only entries of this record type
    #[arg(short = 't', long = "type")]
    pub record_type: Option<String>,

    /// Only entries of this record id
    #[arg(short, long)]
    pub id: Option<u64>,

    /// Only entries of this field
    #[arg(short, long)]
    pub field: Option<String>,

    /// Number of most recent entries to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments of `history`
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Owning record as type#id (e.g. shop.order#42)
    pub record: RecordRef,

    /// State field name
    pub field: String,
}

/// Arguments of `record`
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Owning record as type#id (e.g. shop.order#42)
    pub record: RecordRef,

    /// State field name
    pub field: String,

    /// Transition name
    pub transition: String,

    /// Previous state
    pub source: String,

    /// New state
    pub target: String,
}

/// Show recent audit entries, optionally filtered
pub fn handle_log_command(
    store: &JsonlAuditStore,
    args: LogArgs,
    default_limit: usize,
) -> AuditResult<()> {
    let matching: Vec<AuditEntry> = store
        .read_all()?
        .into_iter()
        .filter(|e| {
            args.record_type
                .as_deref()
                .map_or(true, |t| e.owner().is_type(t))
        })
        .filter(|e| args.id.map_or(true, |id| e.owner().object_id == id))
        .filter(|e| args.field.as_deref().map_or(true, |f| e.field() == f))
        .collect();

    if matching.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    let limit = args.limit.unwrap_or(default_limit);
    let start = matching.len().saturating_sub(limit);

    for entry in &matching[start..] {
        println!("{}", entry.format_human_readable());
    }

    println!("\nShowing {} of {} entries", matching.len() - start, matching.len());
    Ok(())
}

/// Show the state history of one record field
pub fn handle_history_command(store: &JsonlAuditStore, args: HistoryArgs) -> AuditResult<()> {
    let query = ScopedAuditQuery::new(store, args.record, args.field);
    let entries = query.all()?;

    if entries.is_empty() {
        println!("No transitions recorded for {} {}.", query.owner(), query.field());
        return Ok(());
    }

    println!("{} {}: {}", query.owner(), query.field(), query.history()?.join(" -> "));
    println!();
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}

/// Record one transition and save it immediately
///
/// Goes through the same signal path an embedding host uses.
pub fn handle_record_command(store: JsonlAuditStore, args: RecordArgs) -> AuditResult<()> {
    let trail = Arc::new(AuditTrail::new(store));
    let mut signals = Signals::new();
    trail.attach(&mut signals);

    let owner = args.record;
    signals.post_transition(&TransitionEvent::new(
        owner.clone(),
        args.field.as_str(),
        args.transition,
        args.source,
        args.target,
    ))?;
    signals.post_save(&SaveEvent::new(owner.clone()))?;

    if let Some(entry) = trail.query(owner, args.field).latest()? {
        println!("Recorded {}", entry);
    }
    println!("Audit log: {} entries", trail.store().entries()?.len());

    Ok(())
}
