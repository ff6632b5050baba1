//! Request parameters and the validated format configuration
//!
//! [`Request`] is what a host hands us: every option optional, raw integers.
//! [`FormatConfig`] is what the renderer consumes; it can only be obtained
//! through [`crate::validate::validate`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::{HdRaster, HdrRaster, Sampling};

/// Raw request parameters, named the way the host passes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Resolution class id (see [`Resolution`])
    pub resolution: Option<i64>,

    /// Packed host video-format id (see [`PixelFormat`])
    pub pixelformat: Option<i64>,

    /// 0 = SDR, 1 = HLG, 2 = PQ, 3 = PQ full range
    pub hdr: Option<i64>,

    /// Wide colour gamut (BT.2020) for SDR output
    pub wcg: Option<i64>,

    /// Legacy width-rounding variant, 0..=2
    pub compatability: Option<i64>,

    /// Sub-black valley in the pluge row
    pub subblack: Option<i64>,

    /// Super-white peak in the pluge row
    pub superwhite: Option<i64>,

    /// I/Q sub-pattern, 0..=3 (see [`IqMode`])
    pub iq: Option<i64>,

    /// Blank the leading half of the first and trailing half of the last line
    pub halfline: Option<i64>,

    /// Downstream filtering hint; carried through, never used by the renderer
    pub filter: Option<i64>,
}

impl Request {
    /// Load a request from a JSON file; absent keys stay unset
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns a request where every option set in `overrides` replaces ours
    pub fn overlay(self, overrides: Request) -> Request {
        Request {
            resolution: overrides.resolution.or(self.resolution),
            pixelformat: overrides.pixelformat.or(self.pixelformat),
            hdr: overrides.hdr.or(self.hdr),
            wcg: overrides.wcg.or(self.wcg),
            compatability: overrides.compatability.or(self.compatability),
            subblack: overrides.subblack.or(self.subblack),
            superwhite: overrides.superwhite.or(self.superwhite),
            iq: overrides.iq.or(self.iq),
            halfline: overrides.halfline.or(self.halfline),
            filter: overrides.filter.or(self.filter),
        }
    }
}

/// Resolution classes. The discriminants are the host-facing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Resolution {
    /// 525-line, 13.5 MHz sampling
    Ntsc = 0,
    /// 625-line, 13.5 MHz sampling
    Pal = 1,
    Hd720 = 2,
    Hd1080 = 3,
    Dci2k = 4,
    Uhdtv1 = 5,
    Dci4k = 6,
    Uhdtv2 = 7,
    /// 525-line, four times subcarrier sampling
    Ntsc4fsc = 8,
    /// 625-line, four times subcarrier sampling
    Pal4fsc = 9,
}

impl TryFrom<i64> for Resolution {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.id() == value)
            .ok_or(ConfigError::Resolution(value))
    }
}

impl Resolution {
    /// Every resolution class in id order
    pub const ALL: [Resolution; 10] = [
        Resolution::Ntsc,
        Resolution::Pal,
        Resolution::Hd720,
        Resolution::Hd1080,
        Resolution::Dci2k,
        Resolution::Uhdtv1,
        Resolution::Dci4k,
        Resolution::Uhdtv2,
        Resolution::Ntsc4fsc,
        Resolution::Pal4fsc,
    ];

    /// Host-facing id
    pub fn id(self) -> i64 {
        self as i64
    }

    /// 525/625-line systems, both samplings
    pub fn is_standard_definition(self) -> bool {
        matches!(
            self,
            Resolution::Ntsc | Resolution::Pal | Resolution::Ntsc4fsc | Resolution::Pal4fsc
        )
    }

    /// UHDTV1 and up (DCI 4K and UHDTV2 included)
    pub fn is_uhd(self) -> bool {
        matches!(self, Resolution::Uhdtv1 | Resolution::Dci4k | Resolution::Uhdtv2)
    }

    /// HD1080 and up
    pub fn is_1080_or_higher(self) -> bool {
        matches!(self, Resolution::Hd1080 | Resolution::Dci2k) || self.is_uhd()
    }

    /// Frame dimensions; only NTSC depends on the compatibility variant
    pub fn dimensions(self, compat: Compat) -> (usize, usize) {
        let ntsc_height = if compat == Compat::Rp219 { 480 } else { 486 };
        match self {
            Resolution::Ntsc => (720, ntsc_height),
            Resolution::Pal => (720, 576),
            Resolution::Hd720 => (1280, 720),
            Resolution::Hd1080 => (1920, 1080),
            Resolution::Dci2k => (2048, 1080),
            Resolution::Uhdtv1 => (3840, 2160),
            Resolution::Dci4k => (4096, 2160),
            Resolution::Uhdtv2 => (7680, 4320),
            Resolution::Ntsc4fsc => (768, ntsc_height),
            Resolution::Pal4fsc => (948, 576),
        }
    }

    /// The HD raster for this class, if it has one
    pub fn hd_raster(self) -> Option<HdRaster> {
        match self {
            Resolution::Hd720 => Some(HdRaster::Hd720),
            Resolution::Hd1080 => Some(HdRaster::Hd1080),
            Resolution::Dci2k => Some(HdRaster::Dci2k),
            Resolution::Uhdtv1 => Some(HdRaster::Uhdtv1),
            Resolution::Dci4k => Some(HdRaster::Dci4k),
            Resolution::Uhdtv2 => Some(HdRaster::Uhdtv2),
            _ => None,
        }
    }
}

/// Admissible pixel formats: planar 4:4:4 for SDR, planar RGB for HDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    Yuv444P10,
    Yuv444P12,
    Rgb30,
    Rgb36,
}

/// Packs a host video-format id the way the host does.
const fn video_format_id(family: i64, bits: i64) -> i64 {
    // integer samples, no subsampling
    (family << 28) | (bits << 16)
}

const FAMILY_RGB: i64 = 2;
const FAMILY_YUV: i64 = 3;

impl PixelFormat {
    /// Host-facing packed format id
    pub const fn id(self) -> i64 {
        match self {
            PixelFormat::Yuv444P10 => video_format_id(FAMILY_YUV, 10),
            PixelFormat::Yuv444P12 => video_format_id(FAMILY_YUV, 12),
            PixelFormat::Rgb30 => video_format_id(FAMILY_RGB, 10),
            PixelFormat::Rgb36 => video_format_id(FAMILY_RGB, 12),
        }
    }

    /// Look a format up by its packed id
    pub fn from_id(id: i64) -> Option<Self> {
        [
            PixelFormat::Yuv444P10,
            PixelFormat::Yuv444P12,
            PixelFormat::Rgb30,
            PixelFormat::Rgb36,
        ]
        .into_iter()
        .find(|f| f.id() == id)
    }

    pub fn depth(self) -> BitDepth {
        match self {
            PixelFormat::Yuv444P10 | PixelFormat::Rgb30 => BitDepth::Ten,
            PixelFormat::Yuv444P12 | PixelFormat::Rgb36 => BitDepth::Twelve,
        }
    }

    pub fn is_rgb(self) -> bool {
        matches!(self, PixelFormat::Rgb30 | PixelFormat::Rgb36)
    }

    /// Host preset name
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Yuv444P10 => "YUV444P10",
            PixelFormat::Yuv444P12 => "YUV444P12",
            PixelFormat::Rgb30 => "RGB30",
            PixelFormat::Rgb36 => "RGB36",
        }
    }
}

/// Sample bit depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    Ten,
    Twelve,
}

impl BitDepth {
    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Ten => 10,
            BitDepth::Twelve => 12,
        }
    }

    /// Largest representable sample value
    pub fn max_value(self) -> u16 {
        (1u16 << self.bits()) - 1
    }

    /// Table row for this depth
    pub(crate) fn index(self) -> usize {
        match self {
            BitDepth::Ten => 0,
            BitDepth::Twelve => 1,
        }
    }
}

/// SDR colour gamut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gamut {
    Bt709,
    Bt2020,
}

impl Gamut {
    pub(crate) fn index(self) -> usize {
        match self {
            Gamut::Bt709 => 0,
            Gamut::Bt2020 => 1,
        }
    }
}

/// HDR transfer and range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HdrMode {
    Hlg,
    Pq,
    PqFullRange,
}

impl HdrMode {
    /// Parse the host's `hdr` option; `Ok(None)` means SDR
    pub fn from_option(value: i64) -> Result<Option<Self>, ConfigError> {
        match value {
            0 => Ok(None),
            1 => Ok(Some(HdrMode::Hlg)),
            2 => Ok(Some(HdrMode::Pq)),
            3 => Ok(Some(HdrMode::PqFullRange)),
            other => Err(ConfigError::HdrMode(other)),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            HdrMode::Hlg => 0,
            HdrMode::Pq => 1,
            HdrMode::PqFullRange => 2,
        }
    }
}

/// Gamut and transfer of the output signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    Sdr(Gamut),
    Hdr(HdrMode),
}

impl ColorMode {
    pub fn is_hdr(self) -> bool {
        matches!(self, ColorMode::Hdr(_))
    }

    /// HDR always carries BT.2020 primaries
    pub fn is_wide_gamut(self) -> bool {
        !matches!(self, ColorMode::Sdr(Gamut::Bt709))
    }
}

/// Width-rounding variants reproduced from earlier generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compat {
    /// Analogue-derived widths with narrow side pillars
    Analog = 0,
    /// Even bar widths
    Even = 1,
    /// RP 219 example widths; no NTSC/PAL side pillars, 480-line NTSC
    Rp219 = 2,
}

impl TryFrom<i64> for Compat {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Compat::Analog),
            1 => Ok(Compat::Even),
            2 => Ok(Compat::Rp219),
            other => Err(ConfigError::Compatibility(other)),
        }
    }
}

impl Compat {
    pub const ALL: [Compat; 3] = [Compat::Analog, Compat::Even, Compat::Rp219];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Sub-pattern substituted into the second segment of rows 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IqMode {
    /// 100% white, 0% black
    None = 0,
    /// -I and +Q
    Both = 1,
    /// +I, 0% black
    PlusI = 2,
    /// 75% white, 0% black
    White = 3,
}

impl TryFrom<i64> for IqMode {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IqMode::None),
            1 => Ok(IqMode::Both),
            2 => Ok(IqMode::PlusI),
            3 => Ok(IqMode::White),
            other => Err(ConfigError::IqMode(other)),
        }
    }
}

impl IqMode {
    /// Modes that only exist for BT.709 colorimetry
    pub fn needs_bt709(self) -> bool {
        matches!(self, IqMode::Both | IqMode::PlusI)
    }
}

/// The layout branch a configuration renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Ntsc(Sampling),
    Pal(Sampling),
    Hd(HdRaster, Gamut),
    Hdr(HdrRaster, HdrMode),
}

/// A validated, immutable render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatConfig {
    pub(crate) resolution: Resolution,
    pub(crate) format: PixelFormat,
    pub(crate) color: ColorMode,
    pub(crate) compat: Compat,
    pub(crate) iq: IqMode,
    pub(crate) subblack: bool,
    pub(crate) superwhite: bool,
    pub(crate) halfline: bool,
    pub(crate) filter: bool,
    #[serde(skip)]
    pub(crate) family: Family,
}

impl FormatConfig {
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    pub fn depth(&self) -> BitDepth {
        self.format.depth()
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn compat(&self) -> Compat {
        self.compat
    }

    pub fn iq(&self) -> IqMode {
        self.iq
    }

    pub fn subblack(&self) -> bool {
        self.subblack
    }

    pub fn superwhite(&self) -> bool {
        self.superwhite
    }

    pub fn halfline(&self) -> bool {
        self.halfline
    }

    /// Post-filter hint for the host
    pub fn filter(&self) -> bool {
        self.filter
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// (width, height) of the frame this config renders
    pub fn dimensions(&self) -> (usize, usize) {
        self.resolution.dimensions(self.compat)
    }
}
