//! Raw frame and JSON sidecar files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colorbars::config::FormatConfig;
use colorbars::props::{FrameProps, VideoInfo};
use colorbars::raw::{self, PlaneOrder};
use colorbars::{ColorBars, Frame};
use serde::Serialize;

/// Everything a reader needs to interpret the raw file
#[derive(Debug, Serialize)]
pub struct Sidecar<'a> {
    pub video: &'a VideoInfo,
    pub props: &'a FrameProps,
    pub config: &'a FormatConfig,
    pub advisories: Vec<String>,
    /// ffmpeg `-pix_fmt` matching the raw layout
    pub pix_fmt: &'static str,
    pub plane_order: &'static str,
}

/// `<output>.json` next to the raw file
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// Write the frame and its sidecar; returns the number of raw bytes
pub fn write_frame(bars: &ColorBars, frame: &Frame, output: &Path, gbr: bool) -> Result<usize> {
    let rgb = bars.config().pixel_format().is_rgb();
    let order = if gbr && rgb { PlaneOrder::Gbr } else { PlaneOrder::Native };
    let data = raw::encode_planar_le(&frame.buffer, order);
    fs::write(output, &data).with_context(|| format!("writing {}", output.display()))?;

    let sidecar = Sidecar {
        video: bars.video_info(),
        props: &frame.props,
        config: bars.config(),
        advisories: bars.advisories().iter().map(ToString::to_string).collect(),
        pix_fmt: raw::ffmpeg_pix_fmt(bars.config().pixel_format()),
        plane_order: match (order, rgb) {
            (PlaneOrder::Gbr, _) => "gbr",
            (PlaneOrder::Native, true) => "rgb",
            (PlaneOrder::Native, false) => "ycbcr",
        },
    };
    let path = sidecar_path(output);
    fs::write(&path, serde_json::to_string_pretty(&sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorbars::Request;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(sidecar_path(Path::new("out/bars.raw")), Path::new("out/bars.raw.json"));
    }

    #[test]
    fn test_write_frame() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pal.raw");
        let bars = ColorBars::create(&Request { resolution: Some(1), ..Default::default() }).unwrap();
        let frame = bars.get_frame(0).unwrap();

        let written = write_frame(&bars, &frame, &output, true).unwrap();
        assert_eq!(written, raw::frame_size(720, 576));
        assert_eq!(fs::metadata(&output).unwrap().len() as usize, written);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(sidecar_path(&output)).unwrap()).unwrap();
        assert_eq!(json["video"]["width"], 720);
        assert_eq!(json["props"]["_SARNum"], 12);
        assert_eq!(json["pix_fmt"], "yuv444p12le");
        assert_eq!(json["plane_order"], "ycbcr");
        assert_eq!(json["config"]["halfline"], false);
    }

    #[test]
    fn test_sidecar_lists_advisories() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("hdr.raw");
        let bars = ColorBars::create(&Request { hdr: Some(2), wcg: Some(1), ..Default::default() })
            .unwrap();
        let frame = bars.get_frame(0).unwrap();
        write_frame(&bars, &frame, &output, true).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(sidecar_path(&output)).unwrap()).unwrap();
        assert_eq!(json["plane_order"], "gbr");
        assert_eq!(json["pix_fmt"], "gbrp12le");
        assert_eq!(json["advisories"].as_array().unwrap().len(), 1);
    }
}
