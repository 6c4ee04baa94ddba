//! Structured logging via `tracing`.
//!
//! Logs go to stderr so they never interleave with replies on stdout.
//! `RUST_LOG` overrides the configured level when set.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line, for log collectors.
    Json,
    /// Multi-line, colored.
    Pretty,
    /// Single-line, colored.
    #[default]
    Compact,
}

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`), case-insensitive.
pub fn parse_level(s: &str) -> Option<Level> {
    Level::from_str(s.trim()).ok()
}

fn filter(level: Level) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(level.as_str().to_lowercase()),
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(level: Level, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(filter(level));
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    // Already installed, e.g. by a test harness.
    let _ = result;
}
