//! Structured logging setup for the fsm-audit binary

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AuditError;

const VERBOSE_FILTER: &str = "fsm_audit=debug";

/// Initialize logging to stderr
///
/// Verbose mode forces debug output for this crate, even over `RUST_LOG`.
/// Otherwise `RUST_LOG` is used if set, then the given filter (e.g. "warn"
/// or "fsm_audit=debug"). Must be called at most once per process.
pub fn init_logging(level: &str, verbose: bool) -> Result<(), AuditError> {
    let env_filter = build_filter(level, verbose)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| AuditError::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(level: &str, verbose: bool) -> Result<EnvFilter, AuditError> {
    if verbose {
        return parse_filter(VERBOSE_FILTER);
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(level),
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, AuditError> {
    EnvFilter::try_new(directive)
        .map_err(|e| AuditError::Config(format!("Invalid log level '{}': {}", directive, e)))
}
