//! Binary entry point: parses configuration, starts a session, and exits
//! with the contract in §6 ("Exit codes").
//!
//! The core is driven entirely by external display-server callbacks (§5);
//! this binary wires configuration and logging, starts the session, and
//! leaves event dispatch (surface commits, presentation, input) to that
//! external collaborator. What's here is the part owned by this crate:
//! config/CLI/logging and session start/stop.

use clap::Parser;

use farlens_config::{CliArgs, Config};
use farlens_session::SessionOrchestrator;

fn now_us() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

fn run() -> Result<(), i32> {
    let args = CliArgs::parse();

    let mut config = Config::load(&args.config).map_err(|err| {
        eprintln!("failed to load configuration: {err}");
        1
    })?;
    config.apply_cli_overrides(&args);

    farlens_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let mut orchestrator = SessionOrchestrator::new(config, now_us());
    orchestrator.start(now_us()).map_err(|err| {
        eprintln!("failed to start session: {err}");
        2
    })?;

    tracing::info!(
        lens = ?orchestrator.selected_lens(),
        "session started"
    );

    orchestrator.stop().map_err(|err| {
        eprintln!("failed to stop session cleanly: {err}");
        3
    })?;

    Ok(())
}

fn main() {
    match run() {
        Ok(()) => std::process::exit(0),
        Err(code) => std::process::exit(code),
    }
}
