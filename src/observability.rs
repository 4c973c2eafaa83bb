//! Observability utilities.

use crate::types::ObservabilityConfig;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Environment variable selecting the log format (`json` or plain text).
pub const LOG_FORMAT_ENV: &str = "TOOLBRIDGE_LOG_FORMAT";

/// Initialize the tracing subscriber once for the process.
///
/// `RUST_LOG` wins over `config.log_level`. JSON output is enabled by
/// `config.json_logs` or `TOOLBRIDGE_LOG_FORMAT=json`. Logs go to stderr so
/// tool output on stdout stays machine-readable.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let json = config.json_logs || json_requested(std::env::var(LOG_FORMAT_ENV).ok());

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

fn json_requested(format: Option<String>) -> bool {
    format.map_or(false, |v| v.eq_ignore_ascii_case("json"))
}
