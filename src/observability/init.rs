//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber that renders the engine's
//! structured spans and events to stderr.

use crate::Config;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG`, when set, takes full precedence
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Output goes to stderr so piped stdout stays machine-readable
/// - Idempotent: safe to call multiple times (only the first call takes
///   effect), and initialization failure is never fatal
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
