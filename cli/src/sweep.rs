//! Concurrent render of every configuration in a request grid

use std::sync::Arc;

use anyhow::Result;
use colorbars::config::{PixelFormat, Resolution};
use colorbars::stats::{Stats, StatsSnapshot};
use colorbars::{raw, test_pattern, validate, Request};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Outcome of a sweep
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub rendered: u64,
    pub rejected: u64,
    pub advisories: u64,
    pub stats: StatsSnapshot,
}

/// Every resolution, compatibility variant, HDR mode, gamut and depth;
/// options not in the grid keep their defaults
pub fn request_grid() -> Vec<Request> {
    let mut requests = Vec::new();
    for resolution in Resolution::ALL {
        for compat in 0..3 {
            for hdr in 0..4 {
                for wcg in 0..2 {
                    let formats = if hdr == 0 {
                        [PixelFormat::Yuv444P10, PixelFormat::Yuv444P12]
                    } else {
                        [PixelFormat::Rgb30, PixelFormat::Rgb36]
                    };
                    for format in formats {
                        requests.push(Request {
                            resolution: Some(resolution.id()),
                            compatability: Some(compat),
                            hdr: Some(hdr),
                            wcg: Some(wcg),
                            pixelformat: Some(format.id()),
                            ..Default::default()
                        });
                    }
                }
            }
        }
    }
    requests
}

/// Validate and render `requests` on the blocking pool, at most `jobs` at a
/// time. Each task owns its buffer; only the counters are shared.
pub async fn run(requests: Vec<Request>, stats: Arc<Stats>, jobs: usize) -> Result<SweepReport> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = Vec::with_capacity(requests.len());

    for request in requests {
        let permit = Arc::clone(&permits).acquire_owned().await?;
        let stats = Arc::clone(&stats);
        tasks.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            match validate(&request) {
                Ok(validated) => {
                    let frame = test_pattern::generate_color_bars(&validated.config);
                    let size = raw::frame_size(frame.width(), frame.height());
                    stats.record_frame(size as u64);
                    debug!(config = ?validated.config, "sweep frame rendered");
                    Some(validated.advisories.len() as u64)
                }
                Err(e) => {
                    stats.record_rejected();
                    debug!("sweep request rejected: {}", e);
                    None
                }
            }
        }));
    }

    let mut report = SweepReport::default();
    for task in tasks {
        match task.await? {
            Some(advisories) => {
                report.rendered += 1;
                report.advisories += advisories;
            }
            None => report.rejected += 1,
        }
    }
    report.stats = stats.snapshot();

    info!(
        "Sweep done: {} rendered, {} rejected, {} advisories, {:.1} MB total",
        report.rendered,
        report.rejected,
        report.advisories,
        report.stats.total_bytes as f64 / 1_000_000.0
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_covers_every_resolution() {
        let grid = request_grid();
        assert_eq!(grid.len(), 10 * 3 * 4 * 2 * 2);
        for resolution in Resolution::ALL {
            assert!(grid.iter().any(|r| r.resolution == Some(resolution.id())));
        }
    }

    #[test]
    fn test_sweep_counts() {
        let requests = vec![
            Request { resolution: Some(0), ..Default::default() },
            Request { resolution: Some(1), halfline: Some(1), ..Default::default() },
            Request { resolution: Some(2), wcg: Some(1), ..Default::default() },
            Request { resolution: Some(2), hdr: Some(1), ..Default::default() },
        ];
        let stats = Stats::new();
        let report = tokio_test::block_on(run(requests, Arc::clone(&stats), 2)).unwrap();
        assert_eq!(report.rendered, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.stats.total_frames, 2);
        assert_eq!(report.stats.rejected_configs, 2);
        assert_eq!(
            report.stats.total_bytes,
            (raw::frame_size(720, 480) + raw::frame_size(720, 576)) as u64
        );
    }
}
