//! Render statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Statistics snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Frames rendered per second since the last snapshot
    pub fps: f64,

    /// Megabytes of raw output per second since the last snapshot
    pub mbytes_per_sec: f64,

    /// Total frames rendered
    pub total_frames: u64,

    /// Total bytes of raw output
    pub total_bytes: u64,

    /// Requests that failed validation
    pub rejected_configs: u64,

    /// Seconds since the collector was created
    pub uptime_secs: f64,
}

/// Thread-safe statistics collector
#[derive(Debug)]
pub struct Stats {
    start_time: Instant,
    last_snapshot_time: Mutex<Instant>,

    frames: AtomicU64,
    bytes: AtomicU64,
    rejected: AtomicU64,

    // values at the last snapshot, for rates
    last_frames: AtomicU64,
    last_bytes: AtomicU64,
}

impl Stats {
    /// Create new stats collector
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a rendered frame of `bytes` raw bytes
    pub fn record_frame(&self, bytes: u64) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a request rejected by validation
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        let now = Instant::now();
        let uptime = now.duration_since(self.start_time);

        let current_frames = self.frames.load(Ordering::Relaxed);
        let current_bytes = self.bytes.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);

        let mut last_time = match self.last_snapshot_time.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let elapsed = now.duration_since(*last_time);

        let (fps, mbytes_per_sec) = if elapsed >= Duration::from_millis(100) {
            let last_frames = self.last_frames.swap(current_frames, Ordering::Relaxed);
            let last_bytes = self.last_bytes.swap(current_bytes, Ordering::Relaxed);

            let frame_delta = current_frames.saturating_sub(last_frames);
            let byte_delta = current_bytes.saturating_sub(last_bytes);

            let secs = elapsed.as_secs_f64();
            *last_time = now;

            (
                frame_delta as f64 / secs,
                byte_delta as f64 / secs / 1_000_000.0,
            )
        } else {
            // too soon for a meaningful rate
            (0.0, 0.0)
        };

        StatsSnapshot {
            fps,
            mbytes_per_sec,
            total_frames: current_frames,
            total_bytes: current_bytes,
            rejected_configs: rejected,
            uptime_secs: uptime.as_secs_f64(),
        }
    }

}

impl Default for Stats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            last_snapshot_time: Mutex::new(Instant::now()),
            frames: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            last_frames: AtomicU64::new(0),
            last_bytes: AtomicU64::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_recording() {
        let stats = Stats::new();

        stats.record_frame(6_220_800);
        stats.record_frame(6_220_800);
        stats.record_rejected();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_frames, 2);
        assert_eq!(snapshot.total_bytes, 12_441_600);
        assert_eq!(snapshot.rejected_configs, 1);
    }

    #[test]
    fn test_stats_shared_across_threads() {
        let stats = Stats::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || stats.record_frame(10))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_frames, 4);
        assert_eq!(snapshot.total_bytes, 40);
    }
}
