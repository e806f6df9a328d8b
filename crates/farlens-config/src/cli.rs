//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::{LensType, LogLevel, Profile};

/// `farlens` command-line arguments.
///
/// CLI values override settings loaded from the configuration file.
#[derive(Parser, Debug)]
#[command(name = "farlens", about = "Publish a remote application as if it were local")]
pub struct CliArgs {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "telescope.json")]
    pub config: PathBuf,

    /// Override `connection.remote_host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Override `connection.remote_port`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Override `performance.profile`.
    #[arg(long)]
    pub profile: Option<Profile>,

    /// Override `lens.type`.
    #[arg(long)]
    pub lens: Option<LensType>,

    /// Override `observability.log_level`.
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Override `observability.metrics_file`.
    #[arg(long)]
    pub metrics_file: Option<String>,
}

impl clap::ValueEnum for Profile {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Profile::LowLatency,
            Profile::Balanced,
            Profile::HighQuality,
            Profile::BandwidthConstrained,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(match self {
            Profile::LowLatency => "low-latency",
            Profile::Balanced => "balanced",
            Profile::HighQuality => "high-quality",
            Profile::BandwidthConstrained => "bandwidth-constrained",
        }))
    }
}

impl clap::ValueEnum for LensType {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            LensType::Waypipe,
            LensType::Sunshine,
            LensType::Moonlight,
            LensType::Auto,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(match self {
            LensType::Waypipe => "waypipe",
            LensType::Sunshine => "sunshine",
            LensType::Moonlight => "moonlight",
            LensType::Auto => "auto",
        }))
    }
}

impl clap::ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_filter_str()))
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config. Only fields the user actually
    /// supplied on the command line are touched.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref host) = args.host {
            self.connection.remote_host = host.clone();
        }
        if let Some(port) = args.port {
            self.connection.remote_port = port;
        }
        if let Some(profile) = args.profile {
            self.apply_profile(profile);
        }
        if let Some(lens) = args.lens {
            self.lens.lens_type = lens;
        }
        if let Some(log_level) = args.log_level {
            self.observability.log_level = log_level;
        }
        if let Some(ref metrics_file) = args.metrics_file {
            self.observability.metrics_file = Some(metrics_file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApplicationConfig, ConnectionConfig, LensConfig, ObservabilityConfig, PerformanceConfig};
    use std::collections::HashMap;

    fn base_config() -> Config {
        Config {
            connection: ConnectionConfig {
                remote_host: "localhost".to_string(),
                remote_port: 22,
                ssh_user: "root".to_string(),
                ssh_key_path: None,
                compression: "lz4".to_string(),
                video_codec: "h264".to_string(),
                bandwidth_limit: 0,
            },
            application: ApplicationConfig {
                executable: "/usr/bin/echo".to_string(),
                args: Vec::new(),
                env: HashMap::new(),
                working_directory: None,
            },
            performance: PerformanceConfig::default(),
            observability: ObservabilityConfig::default(),
            lens: LensConfig::default(),
        }
    }

    fn empty_args() -> CliArgs {
        CliArgs {
            config: PathBuf::from("telescope.json"),
            host: None,
            port: None,
            profile: None,
            lens: None,
            log_level: None,
            metrics_file: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = base_config();
        let mut args = empty_args();
        args.host = Some("example.org".to_string());
        args.port = Some(2222);
        config.apply_cli_overrides(&args);
        assert_eq!(config.connection.remote_host, "example.org");
        assert_eq!(config.connection.remote_port, 2222);
        // untouched fields retain their original values
        assert_eq!(config.connection.ssh_user, "root");
    }

    #[test]
    fn test_cli_no_override_leaves_config_untouched() {
        let original = base_config();
        let mut config = base_config();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_profile_override_applies_preset() {
        let mut config = base_config();
        let mut args = empty_args();
        args.profile = Some(Profile::LowLatency);
        config.apply_cli_overrides(&args);
        assert_eq!(config.performance.frame_rate, 120);
        assert_eq!(config.connection.compression, "lz4");
    }
}
