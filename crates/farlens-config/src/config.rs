//! Configuration structs with sensible defaults and JSON persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration loaded from a JSON file.
///
/// `connection` and `application` are required top-level objects; the rest
/// fall back to documented defaults when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Remote host, transport, and tunnelling settings.
    pub connection: ConnectionConfig,
    /// The remote application to launch and publish.
    pub application: ApplicationConfig,
    /// Latency/quality tuning, defaulted to the "balanced" profile shape.
    #[serde(default)]
    pub performance: PerformanceConfig,
    /// Metrics and logging settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Transport lens selection and fallback order.
    #[serde(default)]
    pub lens: LensConfig,
}

/// Connection settings: how to reach the remote host and what to ship over it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionConfig {
    /// Remote host to connect to. Required.
    pub remote_host: String,
    /// Remote SSH/control port.
    #[serde(default = "default_remote_port")]
    pub remote_port: u16,
    /// SSH user for tunnelling lenses.
    #[serde(default = "default_ssh_user")]
    pub ssh_user: String,
    /// Optional path to an SSH private key.
    #[serde(default)]
    pub ssh_key_path: Option<String>,
    /// Compression scheme: "none", "lz4", or "zstd".
    #[serde(default = "default_compression")]
    pub compression: String,
    /// Video codec for streaming lenses: "h264", "h265", "vp8", "vp9", or "av1".
    #[serde(default = "default_video_codec")]
    pub video_codec: String,
    /// Bandwidth cap in Mbps; 0 means unlimited.
    #[serde(default)]
    pub bandwidth_limit: u32,
}

/// The remote application to launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationConfig {
    /// Path or name of the executable to run remotely. Required.
    pub executable: String,
    /// Arguments passed to the executable.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables, flattened to `KEY=VAL` by the lens that launches it.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Working directory for the launched process, if not the lens's default.
    #[serde(default)]
    pub working_directory: Option<String>,
}

/// Latency/quality tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Named preset this configuration currently reflects.
    pub profile: Profile,
    /// Target end-to-end latency budget in milliseconds.
    pub target_latency_ms: u32,
    /// Target frame rate; 0 means adaptive.
    pub frame_rate: u32,
    /// Enable the input predictor.
    pub enable_prediction: bool,
    /// Prediction window in milliseconds.
    pub prediction_window_ms: u32,
    /// Enable scroll smoothing.
    pub enable_scroll_smoothing: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Balanced,
            target_latency_ms: 50,
            frame_rate: 60,
            enable_prediction: true,
            prediction_window_ms: 16,
            enable_scroll_smoothing: true,
        }
    }
}

/// Metrics and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether the metrics collector is active for this session.
    pub enable_metrics: bool,
    /// Interval, in milliseconds, at which metrics are flushed to disk.
    pub metrics_interval_ms: u32,
    /// Path to the newline-delimited JSON metrics file, if any.
    pub metrics_file: Option<String>,
    /// Minimum severity logged.
    pub log_level: LogLevel,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            metrics_interval_ms: 1000,
            metrics_file: None,
            log_level: LogLevel::Info,
        }
    }
}

/// Transport lens selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LensConfig {
    /// Preferred lens, or `auto` to select by heuristic.
    #[serde(rename = "type")]
    pub lens_type: LensType,
    /// Ordered fallback candidates tried if the preferred lens fails to start.
    pub fallback: Vec<LensType>,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            lens_type: LensType::Auto,
            fallback: Vec::new(),
        }
    }
}

/// Named performance presets; see `apply_profile`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    LowLatency,
    #[default]
    Balanced,
    HighQuality,
    BandwidthConstrained,
}

/// Transport lens types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LensType {
    Waypipe,
    Sunshine,
    Moonlight,
    #[default]
    Auto,
}

/// Logging severity, matching the integer taxonomy `error=0 .. trace=4`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The integer encoding carried over the JSON config boundary.
    pub fn as_u8(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// The `tracing`/`EnvFilter` directive name for this level.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn default_remote_port() -> u16 {
    22
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_compression() -> String {
    "lz4".to_string()
}

fn default_video_codec() -> String {
    "h264".to_string()
}

// --- Load / Save / Reload ---

impl Config {
    /// Load configuration from a JSON file at `path`.
    ///
    /// Fails with [`ConfigError::MissingField`] if the top-level `connection`
    /// or `application` objects are absent, matching the requirement that
    /// those two sections have no usable default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let raw: serde_json::Value =
            serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;

        if raw.get("connection").is_none() {
            return Err(ConfigError::MissingField("connection"));
        }
        if raw.get("application").is_none() {
            return Err(ConfigError::MissingField("application"));
        }

        let config: Config = serde_json::from_value(raw).map_err(ConfigError::ParseError)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize and write configuration to `path`, creating parent directories
    /// as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }

        let serialized =
            serde_json::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read `path` and return `Some(new_config)` only if it differs from `self`.
    pub fn reload(&self, path: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Config::load(path)?;
        if &new_config != self {
            tracing::info!("configuration reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "connection": { "remote_host": "localhost" },
            "application": { "executable": "/usr/bin/echo", "args": ["test"] }
        }"#
    }

    #[test]
    fn test_missing_sections_use_documented_defaults() {
        let config: Config = {
            let raw: serde_json::Value = serde_json::from_str(minimal_json()).unwrap();
            serde_json::from_value(raw).unwrap()
        };
        assert_eq!(config.connection.remote_port, 22);
        assert_eq!(config.connection.ssh_user, "root");
        assert_eq!(config.connection.compression, "lz4");
        assert_eq!(config.connection.video_codec, "h264");
        assert_eq!(config.performance.profile, Profile::Balanced);
        assert_eq!(config.performance.target_latency_ms, 50);
        assert_eq!(config.performance.frame_rate, 60);
        assert!(config.performance.enable_prediction);
        assert_eq!(config.performance.prediction_window_ms, 16);
        assert!(config.observability.enable_metrics);
        assert_eq!(config.observability.metrics_interval_ms, 1000);
        assert_eq!(config.observability.log_level, LogLevel::Info);
        assert_eq!(config.lens.lens_type, LensType::Auto);
        assert!(config.lens.fallback.is_empty());
    }

    #[test]
    fn test_missing_connection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "application": { "executable": "x" } }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("connection")));
    }

    #[test]
    fn test_missing_application_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "connection": { "remote_host": "x" } }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("application")));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, minimal_json()).unwrap();
        let mut config = Config::load(&path).unwrap();
        config.connection.bandwidth_limit = 10;

        let out_path = dir.path().join("out.json");
        config.save(&out_path).unwrap();
        let loaded = Config::load(&out_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, minimal_json()).unwrap();
        let config = Config::load(&path).unwrap();

        let mut modified = config.clone();
        modified.connection.remote_port = 2222;
        modified.save(&path).unwrap();

        let result = config.reload(&path).unwrap();
        assert_eq!(result.unwrap().connection.remote_port, 2222);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, minimal_json()).unwrap();
        let config = Config::load(&path).unwrap();
        config.save(&path).unwrap();

        assert!(config.reload(&path).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{{not valid}}").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_log_level_integer_encoding() {
        assert_eq!(LogLevel::Error.as_u8(), 0);
        assert_eq!(LogLevel::Warn.as_u8(), 1);
        assert_eq!(LogLevel::Info.as_u8(), 2);
        assert_eq!(LogLevel::Debug.as_u8(), 3);
        assert_eq!(LogLevel::Trace.as_u8(), 4);
    }
}
