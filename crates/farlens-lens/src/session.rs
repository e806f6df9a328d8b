//! Lens sessions (§4.6, §4.7): subprocess lifecycle for one transport.
//!
//! Each of the three transports shares one subprocess-lifecycle shape;
//! `std::process::Command::spawn` already performs the self-pipe
//! exec-failure handshake the source hand-rolls (§10), so `start` simply
//! surfaces `spawn`'s `Err` as an exec failure.

use std::process::{Child, Command};

use farlens_config::{Config, LensType};

use crate::argv::{protocol_forwarding_argv, video_high_motion_argv, video_low_latency_decode_argv};
use crate::error::LensError;

/// The registry's internal transport kinds (§4.6), resolved from the
/// config-facing [`LensType`] by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensKind {
    ProtocolForwarding,
    VideoHighMotion,
    VideoLowLatencyDecode,
}

/// Media/game executable substrings that steer `auto` toward the
/// high-motion video lens.
const AUTO_VIDEO_HINTS: &[&str] = &["mpv", "vlc", "ffmpeg", "game", "steam"];

/// Resolve a configured [`LensType`] to the registry kind that actually
/// implements it. `Auto` applies the executable-name heuristic.
pub fn resolve(lens_type: LensType, executable: &str) -> LensKind {
    match lens_type {
        LensType::Waypipe => LensKind::ProtocolForwarding,
        LensType::Sunshine => LensKind::VideoHighMotion,
        LensType::Moonlight => LensKind::VideoLowLatencyDecode,
        LensType::Auto => {
            if AUTO_VIDEO_HINTS.iter().any(|hint| executable.contains(hint)) {
                LensKind::VideoHighMotion
            } else {
                LensKind::ProtocolForwarding
            }
        }
    }
}

/// A placeholder metrics reading for a lens session. The source's three
/// implementations all return zeroed, timestamp-only metrics for now — none
/// queries its transport for a real reading yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensMetrics {
    pub timestamp_us: u64,
}

/// One running (or stopped) transport subprocess.
pub struct LensSession {
    kind: LensKind,
    child: Option<Child>,
    start_time_us: Option<u64>,
}

impl LensSession {
    /// Create a session for `kind`. Does not spawn anything yet.
    pub fn create(kind: LensKind) -> Self {
        Self {
            kind,
            child: None,
            start_time_us: None,
        }
    }

    pub fn kind(&self) -> LensKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Build the argv for this session's kind and spawn the transport.
    pub fn start(&mut self, config: &Config, now_us: u64) -> Result<(), LensError> {
        if self.child.is_some() {
            return Err(LensError::AlreadyRunning);
        }

        let (program, args) = match self.kind {
            LensKind::ProtocolForwarding => protocol_forwarding_argv(config),
            LensKind::VideoHighMotion => video_high_motion_argv(config),
            LensKind::VideoLowLatencyDecode => video_low_latency_decode_argv(config),
        };

        let mut command = Command::new(program);
        command.args(&args);
        for (key, value) in &config.application.env {
            command.env(key, value);
        }
        if let Some(working_directory) = &config.application.working_directory {
            command.current_dir(working_directory);
        }

        let child = command.spawn().map_err(|err| {
            tracing::warn!(program, ?err, "lens failed to spawn");
            LensError::Spawn(err)
        })?;
        tracing::info!(program, pid = child.id(), kind = ?self.kind, "lens started");
        self.child = Some(child);
        self.start_time_us = Some(now_us);
        Ok(())
    }

    /// Terminate the subprocess and wait synchronously. A no-op if not running.
    ///
    /// Uses `Child::kill` rather than the source's explicit `SIGTERM` — the
    /// standard library has no portable signal API, and no crate in this
    /// workspace's dependency stack adds one.
    pub fn stop(&mut self) -> Result<(), LensError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        child.kill().map_err(LensError::Signal)?;
        child.wait().map_err(LensError::Wait)?;
        tracing::info!(kind = ?self.kind, "lens stopped");
        self.start_time_us = None;
        Ok(())
    }

    /// Placeholder metrics reading; see [`LensMetrics`].
    pub fn get_metrics(&self, now_us: u64) -> LensMetrics {
        LensMetrics { timestamp_us: now_us }
    }
}
