//! Error type for lens subprocess management.

#[derive(Debug, thiserror::Error)]
pub enum LensError {
    #[error("lens session is already running")]
    AlreadyRunning,
    #[error("failed to spawn transport process")]
    Spawn(#[source] std::io::Error),
    #[error("failed to wait for transport process to exit")]
    Wait(#[source] std::io::Error),
    #[error("failed to signal transport process")]
    Signal(#[source] std::io::Error),
}
