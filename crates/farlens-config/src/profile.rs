//! Performance profile presets (§4.9).

use crate::config::{Config, Profile};

struct Preset {
    target_latency_ms: u32,
    frame_rate: u32,
    enable_prediction: bool,
    prediction_window_ms: u32,
    enable_scroll_smoothing: bool,
    compression: &'static str,
    video_codec: &'static str,
    bandwidth_limit: u32,
}

fn preset_for(profile: Profile) -> Preset {
    match profile {
        Profile::LowLatency => Preset {
            target_latency_ms: 16,
            frame_rate: 120,
            enable_prediction: true,
            prediction_window_ms: 16,
            enable_scroll_smoothing: true,
            compression: "lz4",
            video_codec: "h264",
            bandwidth_limit: 0,
        },
        Profile::Balanced => Preset {
            target_latency_ms: 50,
            frame_rate: 60,
            enable_prediction: true,
            prediction_window_ms: 16,
            enable_scroll_smoothing: true,
            compression: "lz4",
            video_codec: "h264",
            bandwidth_limit: 0,
        },
        Profile::HighQuality => Preset {
            target_latency_ms: 100,
            frame_rate: 60,
            enable_prediction: false,
            prediction_window_ms: 0,
            enable_scroll_smoothing: false,
            compression: "zstd",
            video_codec: "h265",
            bandwidth_limit: 0,
        },
        Profile::BandwidthConstrained => Preset {
            target_latency_ms: 100,
            frame_rate: 30,
            enable_prediction: true,
            prediction_window_ms: 33,
            enable_scroll_smoothing: true,
            compression: "zstd",
            video_codec: "h265",
            bandwidth_limit: 10,
        },
    }
}

impl Config {
    /// Overwrite compression, codec, frame rate, prediction window, smoothing
    /// flag, and bandwidth cap with the named preset's values.
    pub fn apply_profile(&mut self, profile: Profile) {
        let preset = preset_for(profile);
        self.performance.profile = profile;
        self.performance.target_latency_ms = preset.target_latency_ms;
        self.performance.frame_rate = preset.frame_rate;
        self.performance.enable_prediction = preset.enable_prediction;
        self.performance.prediction_window_ms = preset.prediction_window_ms;
        self.performance.enable_scroll_smoothing = preset.enable_scroll_smoothing;
        self.connection.compression = preset.compression.to_string();
        self.connection.video_codec = preset.video_codec.to_string();
        self.connection.bandwidth_limit = preset.bandwidth_limit;
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
                compression: "none".to_string(),
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

    #[test]
    fn test_low_latency_profile() {
        let mut config = base_config();
        config.apply_profile(Profile::LowLatency);
        assert_eq!(config.performance.target_latency_ms, 16);
        assert_eq!(config.performance.frame_rate, 120);
        assert_eq!(config.connection.compression, "lz4");
        assert_eq!(config.connection.video_codec, "h264");
        assert_eq!(config.connection.bandwidth_limit, 0);
    }

    #[test]
    fn test_bandwidth_constrained_profile() {
        let mut config = base_config();
        config.apply_profile(Profile::BandwidthConstrained);
        assert_eq!(config.performance.frame_rate, 30);
        assert_eq!(config.connection.compression, "zstd");
        assert_eq!(config.connection.video_codec, "h265");
        assert_eq!(config.connection.bandwidth_limit, 10);
    }

    #[test]
    fn test_high_quality_disables_prediction() {
        let mut config = base_config();
        config.apply_profile(Profile::HighQuality);
        assert!(!config.performance.enable_prediction);
        assert!(!config.performance.enable_scroll_smoothing);
        assert_eq!(config.performance.prediction_window_ms, 0);
    }

    #[test]
    fn test_profile_application_is_idempotent() {
        let mut config = base_config();
        config.apply_profile(Profile::Balanced);
        let once = config.clone();
        config.apply_profile(Profile::Balanced);
        assert_eq!(once, config);
    }
}
