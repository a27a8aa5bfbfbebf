#![forbid(unsafe_code)]

//! Structured logging glue.
//!
//! With the `tracing` feature the `tracing` macros are re-exported so
//! downstream crates can log through `wayfinder_core::debug!` and friends.
//! With `tracing-json` a subscriber can be installed from an env filter,
//! either as JSON lines (production) or compact text (local runs).
//!
//! Without either feature this module is empty and costs nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

/// Env var holding the filter directive (e.g. `wayfinder_runtime=debug`).
pub const ENV_LOG_FILTER: &str = "WAYFINDER_LOG";

/// Env var selecting the output format: `json` or `compact`.
pub const ENV_LOG_FORMAT: &str = "WAYFINDER_LOG_FORMAT";

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonl" => Some(Self::Json),
            "compact" | "text" | "pretty" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Read the format from [`ENV_LOG_FORMAT`], defaulting to compact.
    #[must_use]
    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        get(ENV_LOG_FORMAT)
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Install a global subscriber filtered by [`ENV_LOG_FILTER`].
///
/// Falls back to `default_filter` when the variable is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init(default_filter: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match LogFormat::from_env_with(|key| std::env::var(key).ok()) {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Compact => builder.compact().try_init().is_ok(),
    }
}
