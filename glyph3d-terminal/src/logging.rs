/// Diagnostic logging to an append-only file
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter for `directives`, falling back to `level` when they are empty.
///
/// Any `RUST_LOG`-style directive replaces the `--log-level` default instead
/// of being combined with it.
fn env_filter(level: tracing::Level, directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

/// Install the global subscriber. The terminal belongs to the renderer, so
/// every event goes to `path` instead of stderr.
pub fn init(path: &Path, level: tracing::Level) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, &directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .init();

    Ok(())
}
