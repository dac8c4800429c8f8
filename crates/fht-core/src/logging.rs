//! Structured logging setup with tracing.
//!
//! The kernels emit `tracing` events (dispatch decisions at debug level,
//! pool construction at info level). Binaries call one of the initializers
//! below once at startup; libraries never install a subscriber. Both write
//! to stderr so stdout stays free for transform output.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,fht_core=info,fht_kernels=info,fht_cli=info";

/// Initialize JSON logging for production runs.
///
/// Reads the filter from `RUST_LOG`, falling back to `default_level` for the
/// fht crates and `warn` for dependencies.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    info!("Structured logging initialized");
}

/// Initialize human-readable console logging (CLI, debugging).
pub fn init_console_logging(default_level: &str) {
    console_subscriber(default_level).init();
}

fn console_subscriber(default_level: &str) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr),
        )
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_directives(default_level).into())
}

/// Build filter directives that apply `level` to every fht crate.
pub fn filter_directives(level: &str) -> String {
    if level.is_empty() || level == "info" {
        return DEFAULT_FILTER.to_string();
    }
    format!("warn,fht_core={level},fht_kernels={level},fht_cli={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(filter_directives("info"), DEFAULT_FILTER);
        assert_eq!(filter_directives(""), DEFAULT_FILTER);
    }

    #[test]
    fn test_custom_level_applies_to_all_crates() {
        let d = filter_directives("debug");
        assert!(d.contains("fht_kernels=debug"));
        assert!(d.contains("fht_cli=debug"));
        assert!(d.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_console_subscriber_handles_events() {
        tracing::subscriber::with_default(console_subscriber("debug"), || {
            tracing::debug!(rows = 4, "console event");
            info!("console event");
        });
    }
}
