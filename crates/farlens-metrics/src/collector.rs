//! Metrics Collector (§4.5): frame, input, and bandwidth accounting, with
//! a sliding-window bandwidth average and newline-delimited JSON output.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MetricsError;
use crate::snapshot::Metrics;

/// The bandwidth averaging window. Matches the source's default of 1 second.
const BANDWIDTH_WINDOW_US: u64 = 1_000_000;

struct BandwidthSample {
    timestamp_us: u64,
    rx_bytes: u64,
    tx_bytes: u64,
}

/// Accumulates frame, input, and bandwidth metrics and periodically flushes
/// a snapshot to a metrics file as newline-delimited JSON.
pub struct MetricsCollector {
    metrics: Metrics,
    bandwidth_window_us: u64,
    samples: VecDeque<BandwidthSample>,
    total_rx_bytes: u64,
    total_tx_bytes: u64,
    last_frame_us: u64,
    writer: Option<BufWriter<std::fs::File>>,
}

impl MetricsCollector {
    /// Create a collector if metrics are enabled. Returns `Ok(None)` when
    /// `enable_metrics` is false — disabled metrics is not an error.
    pub fn init(
        enable_metrics: bool,
        metrics_file: Option<&Path>,
    ) -> Result<Option<Self>, MetricsError> {
        if !enable_metrics {
            return Ok(None);
        }

        let writer = match metrics_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(MetricsError::FileOpen)?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        tracing::info!(?metrics_file, "metrics collector initialized");

        Ok(Some(Self {
            metrics: Metrics::zeroed(0),
            bandwidth_window_us: BANDWIDTH_WINDOW_US,
            samples: VecDeque::new(),
            total_rx_bytes: 0,
            total_tx_bytes: 0,
            last_frame_us: 0,
            writer,
        }))
    }

    /// Record a frame presentation. Updates totals, drop count, delay, and
    /// an instantaneous FPS estimate from the inverse inter-arrival time.
    pub fn record_frame(&mut self, latency_ms: u32, dropped: bool, now_us: u64) {
        self.metrics.frames_total += 1;
        if dropped {
            self.metrics.frames_dropped += 1;
            tracing::debug!(now_us, "frame dropped");
        }
        self.metrics.frame_delay_ms = latency_ms;

        if self.last_frame_us > 0 {
            let dt_us = now_us.saturating_sub(self.last_frame_us);
            if dt_us > 0 {
                self.metrics.frames_per_second = (1_000_000 / dt_us) as u32;
            }
        }
        self.last_frame_us = now_us;
        self.metrics.timestamp_us = now_us;
    }

    /// Record one input event's prediction/reconciliation disposition.
    pub fn record_input_event(&mut self, predicted: bool, reconciled: bool) {
        self.metrics.input_events_total += 1;
        if predicted {
            self.metrics.input_events_predicted += 1;
        }
        if reconciled {
            self.metrics.input_events_reconciled += 1;
        }
    }

    /// Push a bandwidth sample, evict samples outside the averaging window,
    /// and recompute the windowed bits-per-second averages.
    pub fn record_bandwidth(&mut self, rx_bytes: u64, tx_bytes: u64, now_us: u64) {
        self.samples.push_back(BandwidthSample {
            timestamp_us: now_us,
            rx_bytes,
            tx_bytes,
        });
        self.total_rx_bytes += rx_bytes;
        self.total_tx_bytes += tx_bytes;

        let window_start_us = now_us.saturating_sub(self.bandwidth_window_us);
        while let Some(oldest) = self.samples.front() {
            if oldest.timestamp_us < window_start_us {
                let evicted = self.samples.pop_front().expect("front just peeked");
                self.total_rx_bytes -= evicted.rx_bytes;
                self.total_tx_bytes -= evicted.tx_bytes;
            } else {
                break;
            }
        }

        if !self.samples.is_empty() && self.bandwidth_window_us > 0 {
            self.metrics.bandwidth_rx_bps =
                self.total_rx_bytes * 8 * 1_000_000 / self.bandwidth_window_us;
            self.metrics.bandwidth_tx_bps =
                self.total_tx_bytes * 8 * 1_000_000 / self.bandwidth_window_us;
        }
    }

    /// Emit one newline-delimited JSON record of the current snapshot to the
    /// configured metrics file. A no-op when no file was configured.
    pub fn flush(&mut self) -> Result<(), MetricsError> {
        let Some(writer) = &mut self.writer else {
            return Ok(());
        };
        let line = serde_json::to_string(&self.metrics).map_err(MetricsError::Serialize)?;
        writeln!(writer, "{line}").map_err(MetricsError::Write)?;
        writer.flush().map_err(MetricsError::Write)?;
        tracing::trace!("metrics snapshot flushed");
        Ok(())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Metrics {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_metrics_yields_no_collector() {
        let collector = MetricsCollector::init(false, None).unwrap();
        assert!(collector.is_none());
    }

    #[test]
    fn test_frame_recording_tracks_totals_and_drops() {
        let mut collector = MetricsCollector::init(true, None).unwrap().unwrap();
        collector.record_frame(16, false, 1_000_000);
        collector.record_frame(0, true, 1_016_000);
        let snap = collector.snapshot();
        assert_eq!(snap.frames_total, 2);
        assert_eq!(snap.frames_dropped, 1);
        assert_eq!(snap.frames_per_second, 1_000_000 / 16_000);
    }

    #[test]
    fn test_input_event_counters() {
        let mut collector = MetricsCollector::init(true, None).unwrap().unwrap();
        collector.record_input_event(true, false);
        collector.record_input_event(false, true);
        collector.record_input_event(false, false);
        let snap = collector.snapshot();
        assert_eq!(snap.input_events_total, 3);
        assert_eq!(snap.input_events_predicted, 1);
        assert_eq!(snap.input_events_reconciled, 1);
    }

    #[test]
    fn test_bandwidth_window_evicts_old_samples() {
        let mut collector = MetricsCollector::init(true, None).unwrap().unwrap();
        collector.record_bandwidth(1000, 2000, 0);
        collector.record_bandwidth(1000, 2000, 2_000_000);
        let snap = collector.snapshot();
        // the first sample (at t=0) is outside the 1s window relative to t=2s
        assert_eq!(snap.bandwidth_rx_bps, 1000 * 8 * 1_000_000 / BANDWIDTH_WINDOW_US);
    }

    #[test]
    fn test_bandwidth_accumulates_within_window() {
        let mut collector = MetricsCollector::init(true, None).unwrap().unwrap();
        collector.record_bandwidth(1000, 2000, 0);
        collector.record_bandwidth(1000, 2000, 500_000);
        let snap = collector.snapshot();
        assert_eq!(snap.bandwidth_rx_bps, 2000 * 8 * 1_000_000 / BANDWIDTH_WINDOW_US);
    }

    #[test]
    fn test_flush_writes_one_ndjson_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        let mut collector = MetricsCollector::init(true, Some(&path)).unwrap().unwrap();
        collector.record_frame(5, false, 1_000);
        collector.flush().unwrap();
        collector.record_frame(6, false, 2_000);
        collector.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(parsed.get("frames_total").is_some());
        }
    }

    #[test]
    fn test_flush_without_file_is_a_no_op() {
        let mut collector = MetricsCollector::init(true, None).unwrap().unwrap();
        collector.record_frame(1, false, 1);
        assert!(collector.flush().is_ok());
    }
}
