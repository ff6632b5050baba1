//! 525-line bars: colour bars, reversed blue bars, -I/white/+Q and pluge

use super::{blank_half_lines, BarPattern};
use crate::buffer::Planes;
use crate::config::FormatConfig;
use crate::layout::{self, HalfLine, NtscLayout, Sampling};
use crate::palette::{self, NtscPalette, Triplet};

#[derive(Debug)]
pub struct NtscBars {
    layout: &'static NtscLayout,
    palette: &'static NtscPalette,
    bands: [usize; 3],
    half_line: Option<(HalfLine, Triplet)>,
}

impl NtscBars {
    pub fn new(config: &FormatConfig, sampling: Sampling) -> Self {
        let depth = config.depth();
        Self {
            layout: layout::ntsc(sampling, config.compat()),
            palette: palette::ntsc(depth),
            bands: layout::ntsc_bands(config.compat()),
            half_line: config
                .halfline()
                .then(|| (layout::half_line(true, sampling), palette::blanking(depth))),
        }
    }
}

impl BarPattern for NtscBars {
    fn paint(&self, planes: &mut Planes<'_>) {
        let [top, middle, bottom] = self.bands;
        let (layout, palette) = (self.layout, self.palette);

        planes.paint_rows(0..top, |row| row.fill_bars(&layout.bars, &palette.bars));
        planes.paint_rows(top..top + middle, |row| {
            row.fill_bars(&layout.bars, &palette.reversed)
        });
        planes.paint_rows(top + middle..top + middle + bottom, |row| {
            row.fill_bars(&layout.lower, &palette.lower)
        });

        if let Some((runs, value)) = self.half_line {
            blank_half_lines(planes, runs, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Request;
    use crate::test_pattern::generate_color_bars;
    use crate::test_pattern::tests::config;

    #[test]
    fn test_band_boundaries() {
        // RP 219 compatibility: 480 lines split 320/40/120, no side pillars
        let c = config(Request { resolution: Some(0), ..Default::default() });
        let buf = generate_color_bars(&c);
        assert_eq!((buf.width(), buf.height()), (720, 480));
        // 75% grey then yellow in the top band
        assert_eq!(buf.triplet(0, 0), [2884, 2048, 2048]);
        assert_eq!(buf.triplet(104, 319), [2584, 704, 2267]);
        // blue starts the reversed band
        assert_eq!(buf.triplet(0, 320), [556, 3392, 1829]);
        // -I starts the bottom band
        assert_eq!(buf.triplet(0, 360), [256, 2532, 1520]);
        assert_eq!(buf.triplet(719, 479), [256, 2048, 2048]);
    }

    #[test]
    fn test_analog_pillars_and_height() {
        let c = config(Request {
            resolution: Some(8),
            compatability: Some(0),
            pixelformat: Some(0x300A_0000),
            ..Default::default()
        });
        let buf = generate_color_bars(&c);
        assert_eq!((buf.width(), buf.height()), (768, 486));
        assert_eq!(buf.triplet(6, 0), [64, 512, 512]);
        assert_eq!(buf.triplet(7, 0), [721, 512, 512]);
        assert_eq!(buf.triplet(767, 485), [64, 512, 512]);
    }

    #[test]
    fn test_4fsc_half_lines() {
        let c = config(Request { resolution: Some(8), halfline: Some(1), ..Default::default() });
        let buf = generate_color_bars(&c);
        assert!((0..330).all(|x| buf.triplet(x, 0) == [256, 2048, 2048]));
        assert_eq!(buf.triplet(330, 0), [1799, 1158, 923]);
        assert!((330..768).all(|x| buf.triplet(x, 479) == [256, 2048, 2048]));
    }
}
