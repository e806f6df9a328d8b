//! Session Orchestrator (§4.8): candidate-list lens selection, and the glue
//! wiring surface presentation callbacks to input reconciliation and
//! metrics recording.

use farlens_config::Config;
use farlens_input::{InputEvent, InputProxy};
use farlens_lens::{resolve, LensError, LensKind, LensSession};
use farlens_metrics::{Metrics, MetricsCollector};
use farlens_surface::{SurfaceId, SurfaceRegistry};

use crate::error::SessionError;

/// Build the ordered, de-duplicated candidate list for `start`: the
/// primary lens, its configured fallbacks, then protocol-forwarding as the
/// always-present terminal candidate.
fn candidate_list(config: &Config) -> Vec<LensKind> {
    let executable = &config.application.executable;
    let mut candidates = Vec::new();

    candidates.push(resolve(config.lens.lens_type, executable));
    for fallback in &config.lens.fallback {
        candidates.push(resolve(*fallback, executable));
    }
    candidates.push(LensKind::ProtocolForwarding);

    let mut deduped = Vec::with_capacity(candidates.len());
    for kind in candidates {
        if !deduped.contains(&kind) {
            deduped.push(kind);
        }
    }
    deduped
}

/// Owns the live lens session, the surface registry, the input proxy, and
/// the metrics collector for one published application.
pub struct SessionOrchestrator {
    config: Config,
    surfaces: SurfaceRegistry,
    input: InputProxy,
    metrics: Option<MetricsCollector>,
    active: Option<LensSession>,
    selected_lens: Option<LensKind>,
    running: bool,
}

impl SessionOrchestrator {
    pub fn new(config: Config, now_us: u64) -> Self {
        let input = InputProxy::new(
            config.performance.enable_prediction,
            config.performance.prediction_window_ms,
            config.performance.enable_scroll_smoothing,
            now_us,
        );
        Self {
            config,
            surfaces: SurfaceRegistry::new(),
            input,
            metrics: None,
            active: None,
            selected_lens: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn selected_lens(&self) -> Option<LensKind> {
        self.selected_lens
    }

    /// Register a new surface for frame-ID tracking.
    pub fn register_surface(&mut self) -> SurfaceId {
        self.surfaces.register()
    }

    /// Try each candidate lens in order, advancing past failures. On the
    /// first success, stamps the session as running and brings up metrics.
    pub fn start(&mut self, now_us: u64) -> Result<(), SessionError> {
        if self.running {
            return Err(SessionError::AlreadyRunning);
        }

        let mut last_error: Option<LensError> = None;
        for kind in candidate_list(&self.config) {
            let mut session = LensSession::create(kind);
            match session.start(&self.config, now_us) {
                Ok(()) => {
                    self.active = Some(session);
                    self.selected_lens = Some(kind);
                    last_error = None;
                    break;
                }
                Err(err) => {
                    tracing::warn!(?kind, ?err, "candidate lens failed to start, advancing");
                    last_error = Some(err);
                    continue;
                }
            }
        }

        let Some(err) = last_error else {
            tracing::info!(selected = ?self.selected_lens, "session started");
            self.running = true;
            self.metrics = MetricsCollector::init(
                self.config.observability.enable_metrics,
                self.config
                    .observability
                    .metrics_file
                    .as_ref()
                    .map(std::path::Path::new),
            )?;
            return Ok(());
        };

        Err(SessionError::AllCandidatesFailed(err))
    }

    /// Stop the active lens and tear down metrics.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if !self.running {
            return Err(SessionError::NotRunning);
        }
        if let Some(mut session) = self.active.take() {
            session.stop().map_err(SessionError::StopFailed)?;
        }
        tracing::info!("session stopped");
        self.metrics = None;
        self.running = false;
        self.selected_lens = None;
        Ok(())
    }

    /// Process one input event arriving for `surface`, allocating a fresh
    /// frame ID to pair the prediction with (per §9's resolved Open
    /// Question), and updating input-event metrics.
    pub fn process_input_event(
        &mut self,
        surface: SurfaceId,
        event: InputEvent,
        want_output: bool,
        now_us: u64,
    ) -> Option<InputEvent> {
        let frame_id = self.surfaces.generate_frame_id(surface, now_us);
        let predicted = event.kind.is_pointer_motion() && self.config.performance.enable_prediction;
        let output = self.input.process(event, frame_id, want_output);

        if let Some(metrics) = &mut self.metrics {
            metrics.record_input_event(predicted, false);
        }
        output
    }

    /// Handle a frame-presentation callback: compute latency via the
    /// surface registry, forward it to metrics, and retire the matching
    /// pending prediction.
    pub fn on_frame_presented(
        &mut self,
        surface: SurfaceId,
        frame_id: u64,
        ts_us: u64,
        actual: Option<&InputEvent>,
    ) {
        let result = self.surfaces.notify_frame_presented(surface, frame_id, ts_us);
        if let Some(metrics) = &mut self.metrics {
            metrics.record_frame(result.latency_ms, result.dropped, ts_us);
        }
        self.input.reconcile(frame_id, actual, ts_us);
        if let Some(metrics) = &mut self.metrics {
            metrics.record_input_event(false, true);
        }
    }

    /// Record a bandwidth sample from the active lens's transport. A no-op
    /// when metrics are disabled or the session has not started.
    pub fn record_bandwidth(&mut self, rx_bytes: u64, tx_bytes: u64, now_us: u64) {
        if let Some(metrics) = &mut self.metrics {
            metrics.record_bandwidth(rx_bytes, tx_bytes, now_us);
        }
    }

    /// The live metrics snapshot, or a zeroed one when metrics are disabled
    /// or not yet initialized.
    pub fn get_metrics(&self, now_us: u64) -> Metrics {
        self.metrics
            .as_ref()
            .map(MetricsCollector::snapshot)
            .unwrap_or_else(|| Metrics::zeroed(now_us))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
