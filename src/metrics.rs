//! Performance metrics and statistics tracking for the prediction service.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Metrics collector for the prediction service
pub struct PredictionMetrics {
    /// Total successful predictions served
    pub predictions_served: AtomicU64,
    /// Total failed prediction attempts (model absent or inference error)
    pub prediction_failures: AtomicU64,
    /// Prediction latencies (in microseconds)
    latencies_us: RwLock<Vec<u64>>,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Point-in-time summary of the collected metrics
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub predictions_served: u64,
    pub prediction_failures: u64,
    pub mean_latency_us: u64,
    pub p95_latency_us: u64,
    pub uptime_seconds: u64,
}

impl PredictionMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            prediction_failures: AtomicU64::new(0),
            latencies_us: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, latency: Duration) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut latencies) = self.latencies_us.write() {
            latencies.push(latency.as_micros() as u64);
            // Keep only the last 10000 for memory efficiency
            if latencies.len() > 10000 {
                latencies.drain(0..5000);
            }
        }
    }

    /// Record a failed prediction attempt
    pub fn record_failure(&self) {
        self.prediction_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a summary of the collected metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let (mean_latency_us, p95_latency_us) = match self.latencies_us.read() {
            Ok(latencies) if !latencies.is_empty() => {
                let mut sorted: Vec<u64> = latencies.clone();
                sorted.sort_unstable();

                let mean = sorted.iter().sum::<u64>() / sorted.len() as u64;
                let p95_idx = (sorted.len() as f64 * 0.95) as usize;
                let p95 = sorted[p95_idx.min(sorted.len() - 1)];

                (mean, p95)
            }
            _ => (0, 0),
        };

        MetricsSnapshot {
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            prediction_failures: self.prediction_failures.load(Ordering::Relaxed),
            mean_latency_us,
            p95_latency_us,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
