//! Request validation
//!
//! Turns a raw [`Request`] into a [`FormatConfig`] or names the illegal
//! combination. Legal but non-standard combinations are accepted and
//! reported as [`Advisory`] values, also logged at WARN level.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{
    ColorMode, Compat, Family, FormatConfig, Gamut, HdrMode, IqMode, PixelFormat, Request,
    Resolution,
};
use crate::error::{ConfigError, Result};
use crate::layout::{HdrRaster, Sampling};
use crate::{DEFAULT_COMPAT, DEFAULT_RESOLUTION};

/// Non-fatal findings; rendering proceeds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    #[error("wide color (Rec.2020) is implied by HDR, wcg is redundant")]
    RedundantWideGamut,

    #[error("I/Q sub-patterns are not part of the HDR pattern and are ignored")]
    IqWithHdr,

    #[error("wide color (Rec.2020) required with 8K/UHDTV2")]
    Uhdtv2NeedsWideGamut,

    #[error("-I/+Q and +I not valid with 8K/UHDTV2 systems")]
    Uhdtv2Iq,
}

/// A configuration that passed validation, with its advisories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub config: FormatConfig,
    pub advisories: Vec<Advisory>,
}

fn flag(value: Option<i64>, default: bool) -> bool {
    value.map_or(default, |v| v != 0)
}

fn pixel_format(id: Option<i64>, hdr: bool) -> std::result::Result<PixelFormat, ConfigError> {
    let Some(id) = id else {
        return Ok(if hdr {
            PixelFormat::Rgb36
        } else {
            PixelFormat::Yuv444P12
        });
    };
    match PixelFormat::from_id(id) {
        Some(format) if format.is_rgb() == hdr => Ok(format),
        _ if hdr => Err(ConfigError::HdrPixelFormat(id)),
        _ => Err(ConfigError::SdrPixelFormat(id)),
    }
}

/// I/Q mode used when the request leaves it out
pub fn default_iq(resolution: Resolution, hdr: bool) -> IqMode {
    if hdr || resolution.is_uhd() {
        IqMode::None
    } else {
        IqMode::Both
    }
}

fn family(resolution: Resolution, color: ColorMode) -> std::result::Result<Family, ConfigError> {
    match resolution {
        Resolution::Ntsc => return Ok(Family::Ntsc(Sampling::Rec601)),
        Resolution::Ntsc4fsc => return Ok(Family::Ntsc(Sampling::Fsc4)),
        Resolution::Pal => return Ok(Family::Pal(Sampling::Rec601)),
        Resolution::Pal4fsc => return Ok(Family::Pal(Sampling::Fsc4)),
        _ => {}
    }
    let raster = resolution
        .hd_raster()
        .ok_or(ConfigError::Resolution(resolution.id()))?;
    match color {
        ColorMode::Sdr(gamut) => Ok(Family::Hd(raster, gamut)),
        ColorMode::Hdr(mode) => HdrRaster::try_from(raster)
            .map(|raster| Family::Hdr(raster, mode))
            .map_err(|_| ConfigError::HdrResolution),
    }
}

/// Validate a request.
///
/// Checks run in a fixed order so the first illegal option is the one
/// reported: compatibility, resolution, HDR mode, pixel format, I/Q mode,
/// wide gamut, HDR, half-line blanking.
pub fn validate(request: &Request) -> Result<Validated> {
    let compat = match request.compatability {
        Some(value) => Compat::try_from(value)?,
        None => DEFAULT_COMPAT,
    };
    let resolution = match request.resolution {
        Some(value) => Resolution::try_from(value)?,
        None => DEFAULT_RESOLUTION,
    };
    let hdr = HdrMode::from_option(request.hdr.unwrap_or(0))?;
    let format = pixel_format(request.pixelformat, hdr.is_some())?;
    let explicit_iq = request.iq.map(IqMode::try_from).transpose()?;
    let iq = explicit_iq.unwrap_or_else(|| default_iq(resolution, hdr.is_some()));
    let wcg = flag(request.wcg, false);

    let mut advisories = Vec::new();
    let color = match hdr {
        Some(mode) => {
            if !resolution.is_1080_or_higher() {
                return Err(ConfigError::HdrResolution.into());
            }
            if wcg {
                advisories.push(Advisory::RedundantWideGamut);
            }
            if explicit_iq.is_some_and(|iq| iq != IqMode::None) {
                advisories.push(Advisory::IqWithHdr);
            }
            ColorMode::Hdr(mode)
        }
        None if wcg => {
            if !resolution.is_uhd() {
                return Err(ConfigError::WideGamutResolution.into());
            }
            if iq.needs_bt709() {
                return Err(ConfigError::WideGamutIq.into());
            }
            ColorMode::Sdr(Gamut::Bt2020)
        }
        None => ColorMode::Sdr(Gamut::Bt709),
    };

    let halfline = flag(request.halfline, false);
    if halfline && !resolution.is_standard_definition() {
        return Err(ConfigError::HalfLineResolution.into());
    }

    if resolution == Resolution::Uhdtv2 {
        if !color.is_wide_gamut() {
            advisories.push(Advisory::Uhdtv2NeedsWideGamut);
        }
        if !color.is_hdr() && iq.needs_bt709() {
            advisories.push(Advisory::Uhdtv2Iq);
        }
    }

    let config = FormatConfig {
        resolution,
        format,
        color,
        compat,
        iq,
        subblack: flag(request.subblack, true),
        superwhite: flag(request.superwhite, true),
        halfline,
        filter: flag(request.filter, true),
        family: family(resolution, color)?,
    };

    for advisory in &advisories {
        warn!("ColorBars: {}", advisory);
    }
    debug!(?config, "validated colour bar request");

    Ok(Validated { config, advisories })
}
