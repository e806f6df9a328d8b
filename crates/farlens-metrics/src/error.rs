//! Error type for the metrics collector.

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to open metrics file")]
    FileOpen(#[source] std::io::Error),
    #[error("failed to write metrics record")]
    Write(#[source] std::io::Error),
    #[error("failed to serialize metrics record")]
    Serialize(#[source] serde_json::Error),
}
