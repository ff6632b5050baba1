//! Colour bar renderer
//!
//! Each layout family is a [`BarPattern`] that paints a whole frame through
//! [`RowCursor`](crate::buffer::RowCursor) calls. Tables are resolved once
//! when the pattern is built. Painting performs no allocation and the band
//! pass writes every visible sample once; half-line blanking then
//! overwrites two runs.

mod hd;
mod hdr;
mod ntsc;
mod pal;

use tracing::debug;

use crate::buffer::{PixelBuffer, Planes};
use crate::config::{Family, FormatConfig};
use crate::layout::HalfLine;
use crate::palette::Triplet;

pub use hd::HdBars;
pub use hdr::HdrBars;
pub use ntsc::NtscBars;
pub use pal::PalBars;

/// A frame layout that can paint itself
pub trait BarPattern {
    /// Paint every visible sample of `planes`
    fn paint(&self, planes: &mut Planes<'_>);
}

/// Pattern selected by a configuration's family
#[derive(Debug)]
pub enum Pattern {
    Ntsc(NtscBars),
    Pal(PalBars),
    Hd(HdBars),
    Hdr(HdrBars),
}

impl Pattern {
    pub fn for_config(config: &FormatConfig) -> Self {
        match config.family() {
            Family::Ntsc(sampling) => Pattern::Ntsc(NtscBars::new(config, sampling)),
            Family::Pal(sampling) => Pattern::Pal(PalBars::new(config, sampling)),
            Family::Hd(raster, gamut) => Pattern::Hd(HdBars::new(config, raster, gamut)),
            Family::Hdr(raster, mode) => Pattern::Hdr(HdrBars::new(config, raster, mode)),
        }
    }
}

impl BarPattern for Pattern {
    fn paint(&self, planes: &mut Planes<'_>) {
        match self {
            Pattern::Ntsc(p) => p.paint(planes),
            Pattern::Pal(p) => p.paint(planes),
            Pattern::Hd(p) => p.paint(planes),
            Pattern::Hdr(p) => p.paint(planes),
        }
    }
}

/// Blank the start of the first line and the end of the last line
fn blank_half_lines(planes: &mut Planes<'_>, runs: HalfLine, value: Triplet) {
    let width = planes.width();
    let last = planes.height() - 1;
    planes.overwrite(0, 0..runs.leading, value);
    planes.overwrite(last, width - runs.trailing..width, value);
}

/// Render the pattern for `config` into caller-provided planes.
///
/// The planes must match the configuration's dimensions.
pub fn render(config: &FormatConfig, planes: &mut Planes<'_>) {
    debug_assert_eq!((planes.width(), planes.height()), config.dimensions());
    debug!(
        family = ?config.family(),
        width = planes.width(),
        height = planes.height(),
        "rendering colour bars"
    );
    Pattern::for_config(config).paint(planes);
}

/// Generate a colour bar frame into a fresh buffer
pub fn generate_color_bars(config: &FormatConfig) -> PixelBuffer {
    let (width, height) = config.dimensions();
    let mut buffer = PixelBuffer::new(width, height);
    render(config, &mut buffer.planes_mut());
    buffer
}
