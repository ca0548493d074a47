//! Structured logging for ir-core.
//!
//! - stdout is reserved for command payloads (HTML or JSON)
//! - stderr receives all log output, human or JSONL
//! - every view load carries a `render_id` for correlation

pub mod config;

pub use config::{LogConfig, LogFormat, Verbosity, LOG_ENV};

use std::io::IsTerminal;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let filter = config.filter();

    let initialized = match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if initialized.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Generate a unique render ID for one view load.
pub fn generate_render_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // First 12 hex chars are enough for correlation
    format!("render-{}", &uuid.simple().to_string()[..12])
}
