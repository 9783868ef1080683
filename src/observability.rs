//! Log output for the `bizcard` binary.
//!
//! Everything goes to stderr: `bizcard vcard --stdout` writes the card itself
//! to stdout, and photo warnings must not end up inside the `.vcf`.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

/// Environment switch for the log format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "BIZCARD_LOG_FORMAT";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `BIZCARD_LOG_FORMAT` wins over `observability.json_logs`; an
    /// unrecognised value keeps the configured format.
    pub fn select<F>(config: &ObservabilityConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let json = match lookup(LOG_FORMAT_ENV).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => true,
            Some(v) if v == "text" || v == "compact" => false,
            _ => config.json_logs,
        };
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Install the stderr subscriber. Later calls are no-ops.
///
/// `RUST_LOG` overrides `observability.log_level`.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let result = match LogFormat::select(config, |key| std::env::var(key).ok()) {
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
        };

        if let Err(err) = result {
            eprintln!("bizcard: logging not initialised: {err}");
        }
    });
}
