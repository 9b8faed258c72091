//! Tracing setup for the action handler.
//!
//! Everything is written to stderr: the framework captures an action's
//! stderr into its debug log, while stdout is reserved for the local
//! environment's result output.

use std::env;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Initializes the global tracing subscriber.
pub fn init_tracing() {
    let (level, env_filter) = parse_rust_log();
    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(format.with_filter(LevelFilter::from(level)))
        .with(env_filter)
        .init();
}

fn parse_rust_log() -> (Level, EnvFilter) {
    // Try to parse RUST_LOG as a simple level filter and apply default levels
    // internally. Otherwise, use it literally if the user knows which
    // overrides they want to run.
    let level = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) => match value.parse::<Level>() {
            Ok(level) => level,
            Err(_) => return (Level::TRACE, EnvFilter::new(value)),
        },
        Err(_) => Level::INFO,
    };

    // This is the maximum verbosity that will be logged, we filter this down
    // to `level`.
    let env_filter = EnvFilter::new(
        "INFO,\
        benchcluster_action=TRACE,\
        benchcluster_hooks=TRACE,\
        ",
    );

    (level, env_filter)
}
