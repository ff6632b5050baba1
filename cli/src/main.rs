//! Colour bar generator command line
//!
//! Renders one SMPTE RP 219 / ITU-R BT.2111 colour bar frame to a raw
//! planar file with a JSON sidecar, or sweeps every configuration.

mod output;
mod sweep;

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use colorbars::config::PixelFormat;
use colorbars::stats::Stats;
use colorbars::{logging, ColorBars, Request};
use tracing::info;

/// SMPTE RP 219 / ITU-R BT.2111 colour bar generator
///
/// Request options take the same integer values a host passes; unset
/// options fall back to the `--config` file, then to the defaults.
#[derive(Parser, Debug)]
#[command(name = "colorbars")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON request file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 0 NTSC, 1 PAL, 2 720p, 3 1080p, 4 2K, 5 UHDTV1, 6 4K, 7 UHDTV2,
    /// 8 NTSC 4fsc, 9 PAL 4fsc
    #[arg(short, long)]
    resolution: Option<i64>,

    /// Format name (YUV444P10, YUV444P12, RGB30, RGB36) or packed id
    #[arg(short, long, value_parser = parse_pixel_format)]
    pixelformat: Option<i64>,

    /// 0 SDR, 1 HLG, 2 PQ, 3 PQ full range
    #[arg(long)]
    hdr: Option<i64>,

    /// Wide colour gamut (Rec.2020) for SDR
    #[arg(long)]
    wcg: Option<i64>,

    /// Width rounding variant 0, 1 or 2
    #[arg(long)]
    compatability: Option<i64>,

    /// Sub-black valley in the pluge row
    #[arg(long)]
    subblack: Option<i64>,

    /// Super-white peak in the pluge row
    #[arg(long)]
    superwhite: Option<i64>,

    /// 0 white, 1 -I/+Q, 2 +I, 3 75% white
    #[arg(long)]
    iq: Option<i64>,

    /// Half-line blanking (NTSC/PAL only)
    #[arg(long)]
    halfline: Option<i64>,

    /// Downstream filtering hint, recorded in the sidecar
    #[arg(long)]
    filter: Option<i64>,

    /// Raw planar output file; the sidecar is written next to it
    #[arg(short, long, default_value = "colorbars.raw")]
    output: PathBuf,

    /// Write RGB planes in G, B, R order for ffmpeg's gbrp formats
    #[arg(long)]
    gbr: bool,

    /// Render every resolution/variant/mode/depth concurrently, write nothing
    #[arg(long)]
    sweep: bool,

    /// Concurrent renders during a sweep (default: available cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also log to a timestamped file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn request(&self) -> Request {
        Request {
            resolution: self.resolution,
            pixelformat: self.pixelformat,
            hdr: self.hdr,
            wcg: self.wcg,
            compatability: self.compatability,
            subblack: self.subblack,
            superwhite: self.superwhite,
            iq: self.iq,
            halfline: self.halfline,
            filter: self.filter,
        }
    }
}

fn parse_pixel_format(value: &str) -> std::result::Result<i64, String> {
    let named = [
        PixelFormat::Yuv444P10,
        PixelFormat::Yuv444P12,
        PixelFormat::Rgb30,
        PixelFormat::Rgb36,
    ]
    .into_iter()
    .find(|f| f.name().eq_ignore_ascii_case(value));
    if let Some(format) = named {
        return Ok(format.id());
    }
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| format!("unknown pixel format '{}'", value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.log_dir {
        Some(dir) => {
            logging::init_logging(dir, "colorbars", &args.log_level)?;
        }
        None => logging::init_console_logging(&args.log_level),
    }

    info!("colorbars v{}", colorbars::VERSION);

    if args.sweep {
        let jobs = args
            .jobs
            .or_else(|| thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1);
        let rt = tokio::runtime::Runtime::new()?;
        let report = rt.block_on(sweep::run(sweep::request_grid(), Stats::new(), jobs))?;
        info!(
            "Sweep throughput: {:.1} frames/s, {:.1} MB/s over {:.1}s",
            report.stats.total_frames as f64 / report.stats.uptime_secs.max(f64::EPSILON),
            report.stats.total_bytes as f64
                / 1_000_000.0
                / report.stats.uptime_secs.max(f64::EPSILON),
            report.stats.uptime_secs
        );
        return Ok(());
    }

    let mut request = Request::default();
    if let Some(path) = &args.config {
        request = Request::from_json_file(path)
            .with_context(|| format!("reading request {}", path.display()))?;
    }
    let request = request.overlay(args.request());

    let bars = ColorBars::create(&request)?;
    let frame = bars.get_frame(0)?;
    let written = output::write_frame(&bars, &frame, &args.output, args.gbr)?;

    let info = bars.video_info();
    info!(
        "Wrote {} ({}x{} {}, {} bytes) and {}",
        args.output.display(),
        info.width,
        info.height,
        info.format.name(),
        written,
        output::sidecar_path(&args.output).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_format_names_and_ids() {
        assert_eq!(parse_pixel_format("yuv444p10"), Ok(0x300A_0000));
        assert_eq!(parse_pixel_format("RGB36"), Ok(0x200C_0000));
        assert_eq!(parse_pixel_format("0x300C0000"), Ok(0x300C_0000));
        assert_eq!(parse_pixel_format("805961728"), Ok(0x300A_0000));
        assert!(parse_pixel_format("nv12").is_err());
    }

    #[test]
    fn test_args_build_request() {
        let args = Args::parse_from(["colorbars", "-r", "5", "--wcg", "1", "-p", "YUV444P10"]);
        let request = args.request();
        assert_eq!(request.resolution, Some(5));
        assert_eq!(request.wcg, Some(1));
        assert_eq!(request.pixelformat, Some(0x300A_0000));
        assert_eq!(request.hdr, None);
        assert!(!args.sweep);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = Request { resolution: Some(0), halfline: Some(1), ..Default::default() };
        let args = Args::parse_from(["colorbars", "--resolution", "1"]);
        let merged = file.overlay(args.request());
        assert_eq!(merged.resolution, Some(1));
        assert_eq!(merged.halfline, Some(1));
    }
}
