//! Error type for session orchestration.

use farlens_lens::LensError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is already running")]
    AlreadyRunning,
    #[error("session is not running")]
    NotRunning,
    #[error("all candidate lenses failed to start: {0}")]
    AllCandidatesFailed(#[source] LensError),
    #[error("failed to stop the active lens")]
    StopFailed(#[source] LensError),
    #[error(transparent)]
    Metrics(#[from] farlens_metrics::MetricsError),
}
