//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control (`RUST_LOG` wins over
//! the configured level), a console layer, and an optional rolling file.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix for the rolling log, e.g. `platescan.log.2024-05-01`.
pub const LOG_FILE_PREFIX: &str = "platescan.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `platescan_gateway=debug`.
    pub level: String,
    /// Console output as JSON lines instead of human-readable text.
    pub json: bool,
    /// Directory for the daily rolling NDJSON file. `None` disables it.
    pub dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            dir: None,
        }
    }
}

/// Build the filter: `RUST_LOG` if set and valid, else the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logger(options: &LogOptions) {
    let file_layer = options.dir.as_ref().map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let json_console = options
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stdout));

    let text_console = (!options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter(&options.level))
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_log_info_to_console() {
        let options = LogOptions::default();
        assert_eq!(options.level, "info");
        assert!(!options.json);
        assert!(options.dir.is_none());
    }

    #[test]
    fn invalid_level_falls_back() {
        // Must not panic on garbage directives.
        let _ = env_filter("not a [valid directive");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logger(&LogOptions::default());
        init_logger(&LogOptions {
            json: true,
            ..LogOptions::default()
        });
    }
}
