//! Input Proxy (§4.3): the event entry point coordinating smoothing,
//! prediction, the pending-prediction list, and reconciliation.

use std::collections::VecDeque;

use crate::events::{EventKind, InputEvent};
use crate::predictor::Predictor;
use crate::reentrance::ReentranceGuard;
use crate::scroll::ScrollSmoother;

/// Pending predictions older than this are discarded by the staleness sweep.
pub const STALENESS_THRESHOLD_US: u64 = 1_000_000;
const MOTION_TOLERANCE: f64 = 0.1;

/// A prediction awaiting reconciliation, keyed by a caller-supplied frame ID.
///
/// Per the resolved Open Question (§9), `frame_id` is supplied by the caller
/// at `process` time — typically the next ID obtained from the surface
/// registry for the surface under the pointer — rather than allocated from a
/// private counter internal to the proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    pub frame_id: u64,
    pub predicted_event: InputEvent,
    pub created_at_us: u64,
}

/// A read-only snapshot of the proxy's prediction bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionState {
    pub enabled: bool,
    pub window_ms: u32,
    pub last_prediction_us: u64,
    pub events_predicted: u32,
    pub events_reconciled: u32,
}

/// Coordinates scroll smoothing, pointer-motion prediction, and
/// reconciliation for one input stream.
pub struct InputProxy {
    enable_prediction: bool,
    enable_scroll_smoothing: bool,
    window_ms: u32,
    scroll_smoother: ScrollSmoother,
    predictor: Predictor,
    pending: VecDeque<PendingPrediction>,
    events_predicted: u32,
    events_reconciled: u32,
    last_prediction_us: u64,
    /// Per-axis prediction error recorded on out-of-tolerance reconciliation.
    /// Reserved refinement hook (§9): not yet fed back into the predictor.
    pub last_prediction_error: Option<(f64, f64)>,
}

impl InputProxy {
    /// Create a proxy. `now_us` seeds the scroll smoother's internal clock.
    pub fn new(
        enable_prediction: bool,
        window_ms: u32,
        enable_scroll_smoothing: bool,
        now_us: u64,
    ) -> Self {
        Self {
            enable_prediction,
            enable_scroll_smoothing,
            window_ms,
            scroll_smoother: ScrollSmoother::new(now_us),
            predictor: Predictor::new(
                window_ms,
                crate::scroll::DEFAULT_SMOOTHING_FACTOR,
                crate::scroll::DEFAULT_VELOCITY_DECAY,
            ),
            pending: VecDeque::new(),
            events_predicted: 0,
            events_reconciled: 0,
            last_prediction_us: 0,
            last_prediction_error: None,
        }
    }

    /// Process one event. `frame_id` must be supplied by the caller for
    /// motion events the caller wants reconciled against a frame (typically
    /// the ID just returned by the surface registry's `generate_frame_id`).
    ///
    /// Returns an owned output event only for scroll (if smoothing produced
    /// one and `want_output`), predicted motion (if `want_output`), or any
    /// other event type passed through unchanged (if `want_output`). Button,
    /// key, and touch events are never tracked for reconciliation.
    pub fn process(
        &mut self,
        event: InputEvent,
        frame_id: u64,
        want_output: bool,
    ) -> Option<InputEvent> {
        let _guard = ReentranceGuard::enter();
        let timestamp_us = event.timestamp_us;

        match event.kind {
            EventKind::Scroll {
                dx,
                dy,
                discrete,
                discrete_dx,
                discrete_dy,
            } if self.enable_scroll_smoothing => {
                let (sx, sy) = self.scroll_smoother.process(timestamp_us, dx, dy, discrete);
                want_output.then(|| InputEvent {
                    timestamp_us,
                    kind: EventKind::Scroll {
                        dx: sx,
                        dy: sy,
                        discrete,
                        discrete_dx,
                        discrete_dy,
                    },
                })
            }
            EventKind::PointerMotion {
                dx,
                dy,
                absolute,
                x,
                y,
            } if self.enable_prediction => {
                let (pdx, pdy) = self
                    .predictor
                    .predict_pointer(timestamp_us as f64 / 1_000_000.0, dx, dy);
                let predicted_event = InputEvent {
                    timestamp_us: timestamp_us + self.window_ms as u64 * 1000,
                    kind: EventKind::PointerMotion {
                        dx: pdx,
                        dy: pdy,
                        absolute,
                        x,
                        y,
                    },
                };
                self.events_predicted += 1;
                self.last_prediction_us = timestamp_us;

                let output = want_output.then(|| predicted_event.clone());
                self.pending.push_front(PendingPrediction {
                    frame_id,
                    predicted_event,
                    created_at_us: timestamp_us,
                });
                output
            }
            other => want_output.then(|| InputEvent {
                timestamp_us,
                kind: other,
            }),
        }
    }

    /// Retire the pending prediction matching `frame_id`, if any, then run
    /// the staleness sweep. Always returns `true`: per §7 a missing frame
    /// record is a "dropped" bookkeeping case, not a failure.
    pub fn reconcile(&mut self, frame_id: u64, actual: Option<&InputEvent>, now_us: u64) -> bool {
        let _guard = ReentranceGuard::enter();

        if let Some(idx) = self.pending.iter().position(|p| p.frame_id == frame_id) {
            let pending = self.pending.remove(idx).expect("index just found by position");
            if let Some(actual_event) = actual {
                self.last_prediction_error =
                    Self::evaluate(&pending.predicted_event, actual_event);
                if self.last_prediction_error.is_some() {
                    tracing::debug!(frame_id, error = ?self.last_prediction_error, "prediction out of tolerance");
                }
            } else {
                self.last_prediction_error = None;
            }
        } else {
            tracing::debug!(frame_id, "reconcile with no matching pending prediction");
        }

        self.events_reconciled += 1;
        self.sweep_stale(now_us);
        true
    }

    /// Compare a predicted event against the actual one. Returns `Some(error)`
    /// only for out-of-tolerance pointer-motion mismatches; everything else —
    /// matching motion within tolerance, non-motion predictions, and
    /// mismatched types — is treated as correct.
    fn evaluate(predicted: &InputEvent, actual: &InputEvent) -> Option<(f64, f64)> {
        match (&predicted.kind, &actual.kind) {
            (
                EventKind::PointerMotion { dx: pdx, dy: pdy, .. },
                EventKind::PointerMotion { dx: adx, dy: ady, .. },
            ) => {
                let err_x = (pdx - adx).abs();
                let err_y = (pdy - ady).abs();
                if err_x < MOTION_TOLERANCE && err_y < MOTION_TOLERANCE {
                    None
                } else {
                    Some((err_x, err_y))
                }
            }
            _ => None,
        }
    }

    fn sweep_stale(&mut self, now_us: u64) {
        self.pending
            .retain(|p| now_us.saturating_sub(p.created_at_us) <= STALENESS_THRESHOLD_US);
    }

    /// Number of pending predictions awaiting reconciliation.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// A read-only snapshot of prediction bookkeeping.
    pub fn prediction_state(&self) -> PredictionState {
        PredictionState {
            enabled: self.enable_prediction,
            window_ms: self.window_ms,
            last_prediction_us: self.last_prediction_us,
            events_predicted: self.events_predicted,
            events_reconciled: self.events_reconciled,
        }
    }
}
