//! Input Proxy crate (§3–§4.3 of the design): scroll smoothing, pointer
//! motion prediction, and reconciliation bookkeeping.
//!
//! Deliberately independent of the surface-registry crate: the session
//! orchestrator owns the glue between `notify_frame_presented` and
//! `InputProxy::reconcile`.

mod events;
mod predictor;
mod proxy;
mod reentrance;
mod scroll;

pub use events::{EventKind, InputEvent};
pub use predictor::Predictor;
pub use proxy::{InputProxy, PendingPrediction, PredictionState, STALENESS_THRESHOLD_US};
pub use scroll::{ScrollSmoother, DEFAULT_SMOOTHING_FACTOR, DEFAULT_VELOCITY_DECAY};
