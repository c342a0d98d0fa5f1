//! Log subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. Output goes to stderr so stdout stays clean for prompts
//! and templates.

use crate::config::LogLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter from `RUST_LOG` when set, otherwise `level` for this crate.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

fn default_directive(level: LogLevel) -> String {
    format!("flipflop={}", level.as_str())
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_scopes_to_crate() {
        assert_eq!(default_directive(LogLevel::Warn), "flipflop=warn");
        assert_eq!(default_directive(LogLevel::Trace), "flipflop=trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LogLevel::Error);
        init(LogLevel::Debug);
    }
}
