//! The metrics snapshot (§6): the live collector's current readings.

use serde::Serialize;

/// One point-in-time reading of all tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub timestamp_us: u64,
    pub end_to_end_latency_ms: u32,
    pub input_lag_ms: u32,
    pub frame_delay_ms: u32,
    pub frames_per_second: u32,
    pub frames_dropped: u32,
    pub frames_total: u32,
    pub bandwidth_rx_bps: u64,
    pub bandwidth_tx_bps: u64,
    pub input_events_predicted: u32,
    pub input_events_reconciled: u32,
    pub input_events_total: u32,
}

impl Metrics {
    /// A zeroed snapshot stamped with the given timestamp, returned when
    /// metrics are disabled or uninitialized.
    pub fn zeroed(timestamp_us: u64) -> Self {
        Self {
            timestamp_us,
            end_to_end_latency_ms: 0,
            input_lag_ms: 0,
            frame_delay_ms: 0,
            frames_per_second: 0,
            frames_dropped: 0,
            frames_total: 0,
            bandwidth_rx_bps: 0,
            bandwidth_tx_bps: 0,
            input_events_predicted: 0,
            input_events_reconciled: 0,
            input_events_total: 0,
        }
    }
}
