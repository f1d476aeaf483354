//! Tracing initialization for the `petfriends` binary.
//!
//! Level comes from `PETFRIENDS_LOG` (default `warn`); `--verbose` forces
//! `debug`. Events go to stderr so stdout stays machine-readable.

use std::sync::OnceLock;

static INIT: OnceLock<()> = OnceLock::new();

fn parse_level(raw: Option<&str>, verbose: bool) -> tracing::Level {
    if verbose {
        return tracing::Level::DEBUG;
    }
    match raw.unwrap_or("warn").to_ascii_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    if INIT.get().is_some() {
        return;
    }
    let raw = std::env::var("PETFRIENDS_LOG").ok();
    let level = parse_level(raw.as_deref(), verbose);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    let _ = INIT.set(());
}
