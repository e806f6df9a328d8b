//! Structured logging for farlens.
//!
//! Provides structured, span-based, filterable logging via the `tracing`
//! ecosystem: console output with timestamps and module paths, plus JSON file
//! logging in debug builds for offline correlation against the metrics
//! stream. Integrates with [`farlens_config::Config`] for runtime log-level
//! control.

use farlens_config::{Config, LogLevel};
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for JSON log files (debug builds only).
/// * `debug_build` - Whether this is a debug build (enables file logging).
/// * `config` - Optional configuration to source the log level from.
///
/// # Examples
///
/// ```no_run
/// use farlens_log::init_logging;
///
/// init_logging(None, false, None);
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = config
        .map(|c| c.observability.log_level)
        .unwrap_or(LogLevel::Info)
        .as_filter_str()
        .to_string();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("farlens.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The default `EnvFilter` used when no config and no `RUST_LOG` are present.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_subsystem_filter() {
        let filter = EnvFilter::new("info,farlens_lens=debug");
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("farlens_lens=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_env_filter_parsing_is_robust() {
        let valid_filters = ["info", "debug,farlens_input=trace", "warn,farlens_lens=debug", "error"];
        for filter_str in &valid_filters {
            assert!(EnvFilter::try_from(*filter_str).is_ok(), "failed to parse {filter_str}");
        }
    }

    #[test]
    fn test_file_logger_creation() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path()).unwrap();
        let log_file_path = temp_dir.path().join("farlens.log");
        assert_eq!(log_file_path.file_name().unwrap(), "farlens.log");
    }
}
