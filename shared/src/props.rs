//! Frame properties and video info reported to the host
//!
//! Codes follow ITU-T H.273 as the host uses them (`_Matrix`, `_Primaries`,
//! `_Transfer`), with the host's own `_ColorRange` convention.

use serde::Serialize;

use crate::config::{ColorMode, FormatConfig, Gamut, HdrMode, PixelFormat, Resolution};

/// Sample range; the discriminants are the host's `_ColorRange` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    Full = 0,
    Limited = 1,
}

impl ColorRange {
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// Colorimetry tags attached to the rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameProps {
    #[serde(rename = "_Matrix")]
    pub matrix: i64,
    #[serde(rename = "_Primaries")]
    pub primaries: i64,
    #[serde(rename = "_Transfer")]
    pub transfer: i64,
    #[serde(rename = "_ColorRange")]
    pub color_range: ColorRange,
    #[serde(rename = "_SARNum")]
    pub sar_num: i64,
    #[serde(rename = "_SARDen")]
    pub sar_den: i64,
}

impl FrameProps {
    pub fn for_config(config: &FormatConfig) -> Self {
        let (matrix, primaries, transfer) = match (config.resolution(), config.color()) {
            (Resolution::Ntsc | Resolution::Ntsc4fsc, _) => (6, 6, 6),
            (Resolution::Pal | Resolution::Pal4fsc, _) => (5, 5, 6),
            (_, ColorMode::Sdr(Gamut::Bt709)) => (1, 1, 1),
            (_, ColorMode::Sdr(Gamut::Bt2020)) => (9, 9, 14),
            (_, ColorMode::Hdr(HdrMode::Hlg)) => (0, 9, 18),
            (_, ColorMode::Hdr(HdrMode::Pq | HdrMode::PqFullRange)) => (0, 9, 16),
        };
        let color_range = match config.color() {
            ColorMode::Hdr(HdrMode::PqFullRange) => ColorRange::Full,
            _ => ColorRange::Limited,
        };
        let (sar_num, sar_den) = match config.resolution() {
            Resolution::Ntsc => (10, 11),
            Resolution::Ntsc4fsc => (6, 7),
            Resolution::Pal => (12, 11),
            Resolution::Pal4fsc => (6_480_000, 7_803_169),
            _ => (1, 1),
        };
        Self {
            matrix,
            primaries,
            transfer,
            color_range,
            sar_num,
            sar_den,
        }
    }

    /// Host property names with their integer values
    pub fn entries(&self) -> [(&'static str, i64); 6] {
        [
            ("_Matrix", self.matrix),
            ("_Primaries", self.primaries),
            ("_Transfer", self.transfer),
            ("_ColorRange", self.color_range.code()),
            ("_SARNum", self.sar_num),
            ("_SARDen", self.sar_den),
        ]
    }
}

/// Clip description fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoInfo {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub format_id: i64,
    pub fps_num: i64,
    pub fps_den: i64,
    pub num_frames: usize,
}

impl VideoInfo {
    pub const FPS_NUM: i64 = 60_000;
    pub const FPS_DEN: i64 = 1_001;

    pub fn for_config(config: &FormatConfig) -> Self {
        let (width, height) = config.dimensions();
        Self {
            width,
            height,
            format: config.pixel_format(),
            format_id: config.pixel_format().id(),
            fps_num: Self::FPS_NUM,
            fps_den: Self::FPS_DEN,
            num_frames: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Request;
    use crate::validate::validate;

    fn props(request: Request) -> FrameProps {
        FrameProps::for_config(&validate(&request).unwrap().config)
    }

    #[test]
    fn test_sd_props() {
        let p = props(Request { resolution: Some(0), ..Default::default() });
        assert_eq!((p.matrix, p.primaries, p.transfer), (6, 6, 6));
        assert_eq!((p.sar_num, p.sar_den), (10, 11));
        let p = props(Request { resolution: Some(9), ..Default::default() });
        assert_eq!((p.matrix, p.primaries, p.transfer), (5, 5, 6));
        assert_eq!((p.sar_num, p.sar_den), (6_480_000, 7_803_169));
        assert_eq!(p.color_range, ColorRange::Limited);
    }

    #[test]
    fn test_hd_props() {
        let p = props(Request::default());
        assert_eq!((p.matrix, p.primaries, p.transfer), (1, 1, 1));
        assert_eq!((p.sar_num, p.sar_den), (1, 1));
        let p = props(Request { resolution: Some(6), wcg: Some(1), ..Default::default() });
        assert_eq!((p.matrix, p.primaries, p.transfer), (9, 9, 14));
    }

    #[test]
    fn test_hdr_props() {
        let p = props(Request { hdr: Some(1), ..Default::default() });
        assert_eq!((p.matrix, p.primaries, p.transfer), (0, 9, 18));
        let p = props(Request { hdr: Some(3), ..Default::default() });
        assert_eq!((p.matrix, p.primaries, p.transfer), (0, 9, 16));
        assert_eq!(p.color_range, ColorRange::Full);
        assert_eq!(p.entries()[3], ("_ColorRange", 0));
    }

    #[test]
    fn test_sidecar_names() {
        let json = serde_json::to_value(props(Request::default())).unwrap();
        assert_eq!(json["_Matrix"], 1);
        assert_eq!(json["_ColorRange"], "limited");
    }

    #[test]
    fn test_video_info() {
        let config = validate(&Request { resolution: Some(8), ..Default::default() })
            .unwrap()
            .config;
        let info = VideoInfo::for_config(&config);
        assert_eq!((info.width, info.height), (768, 480));
        assert_eq!(info.format_id, 0x300C_0000);
        assert_eq!((info.fps_num, info.fps_den, info.num_frames), (60_000, 1_001, 1));
    }
}
