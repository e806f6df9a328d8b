//! Configuration loading, CLI overrides, and profile presets.
//!
//! Settings persist to disk as JSON (§6 of the design notes). Supports CLI
//! overrides via clap and drift detection via `Config::reload`.

mod cli;
mod config;
mod error;
mod profile;

pub use cli::CliArgs;
pub use config::{
    ApplicationConfig, Config, ConnectionConfig, LensConfig, LensType, LogLevel,
    ObservabilityConfig, PerformanceConfig, Profile,
};
pub use error::ConfigError;
