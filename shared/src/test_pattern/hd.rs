//! HD/UHD SDR bars (SMPTE RP 219-1)
//!
//! Six bands: 7/12 colour bars, then one twelfth each for the cyan/white
//! row, the yellow/ramp/red row and three pluge rows. The middle pluge row
//! carries the sub-black valley and super-white peak.

use super::BarPattern;
use crate::buffer::{Planes, RowCursor};
use crate::config::{FormatConfig, Gamut, IqMode};
use crate::layout::{self, HdLayout, HdRaster};
use crate::palette::{self, HdPalette, Triplet, PEAK, RAMP_END, RAMP_START, VALLEY};

#[derive(Debug)]
pub struct HdBars {
    layout: &'static HdLayout,
    palette: &'static HdPalette,
    pluge: &'static [Triplet; 13],
    iq: IqMode,
    subblack: bool,
    superwhite: bool,
}

impl HdBars {
    pub fn new(config: &FormatConfig, raster: HdRaster, gamut: Gamut) -> Self {
        Self {
            layout: layout::hd(raster, config.compat()),
            palette: palette::hd(gamut, config.depth()),
            pluge: palette::pluge(config.depth()),
            iq: config.iq(),
            subblack: config.subblack(),
            superwhite: config.superwhite(),
        }
    }

    fn second_row(&self, row: &mut RowCursor<'_>) {
        let (bars, second) = (&self.layout.bars, &self.palette.second);
        row.fill(bars[0], second[0]);
        row.fill(bars[1], self.palette.second_sub(self.iq));
        row.fill_bars(&bars[2..], &second[2..9]);
    }

    fn third_row(&self, row: &mut RowCursor<'_>) {
        let (bars, third) = (&self.layout.bars, &self.palette.third);
        row.fill(bars[0], third[0]);
        row.fill(bars[1], self.palette.third_sub(self.iq));

        let run: usize = bars[RAMP_START..=RAMP_END].iter().sum();
        let rise = third[RAMP_END][0] - third[RAMP_START][0];
        row.luma_ramp(run, third[RAMP_START], f32::from(rise) / run as f32);

        row.fill_bars(&bars[RAMP_END + 1..], &third[RAMP_END + 1..9]);
    }

    fn pluge_row(&self, row: &mut RowCursor<'_>) {
        let (widths, pluge) = (&self.layout.pluge, self.pluge);
        row.fill_bars(widths, &pluge[..11]);
    }

    fn excursion_row(&self, row: &mut RowCursor<'_>) {
        let (widths, pluge) = (&self.layout.pluge, self.pluge);
        row.fill(widths[0], pluge[0]);
        excursion(row, widths[1], pluge[1], pluge[VALLEY][0], self.subblack);
        excursion(row, widths[2], pluge[2], pluge[PEAK][0], self.superwhite);
        row.fill_bars(&widths[3..], &pluge[3..11]);
    }
}

/// V-shaped luma excursion from `base` to `extreme` and back over `width`.
///
/// The first half steps away from `base`; the second half restarts at
/// `extreme` and steps back. A disabled excursion is flat `base`. With an
/// odd width the second half is one sample longer.
fn excursion(row: &mut RowCursor<'_>, width: usize, base: Triplet, extreme: u16, enabled: bool) {
    let half = width / 2;
    let depth = f32::from(base[0].abs_diff(extreme));
    let slope = f32::from(u8::from(enabled)) * depth / half as f32;
    let outward = if extreme < base[0] { -slope } else { slope };

    row.luma_ramp(half, base, outward);
    let turn = if enabled { extreme } else { base[0] };
    row.luma_ramp(width - half, [turn, base[1], base[2]], -outward);
}

impl BarPattern for HdBars {
    fn paint(&self, planes: &mut Planes<'_>) {
        let bands = layout::hd_bands(planes.height());
        let mut top = 0;
        for (band, height) in bands.into_iter().enumerate() {
            let rows = top..top + height;
            match band {
                0 => planes.paint_rows(rows, |row| {
                    row.fill_bars(&self.layout.bars, &self.palette.bars)
                }),
                1 => planes.paint_rows(rows, |row| self.second_row(row)),
                2 => planes.paint_rows(rows, |row| self.third_row(row)),
                4 => planes.paint_rows(rows, |row| self.excursion_row(row)),
                _ => planes.paint_rows(rows, |row| self.pluge_row(row)),
            }
            top += height;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::PixelBuffer;
    use crate::config::Request;
    use crate::test_pattern::generate_color_bars;
    use crate::test_pattern::tests::config;

    fn hd1080_10bit(extra: Request) -> PixelBuffer {
        let base = Request { pixelformat: Some(0x300A_0000), ..Default::default() };
        generate_color_bars(&config(base.overlay(extra)))
    }

    // 1080 lines: bands start at 0, 630, 720, 810, 900, 990
    const ROW2: usize = 630;
    const ROW3: usize = 720;
    const ROW4B: usize = 900;

    #[test]
    fn test_top_band() {
        let buf = hd1080_10bit(Request::default());
        assert_eq!(buf.triplet(0, 0), [414, 512, 512]);
        assert_eq!(buf.triplet(236, 629), [721, 512, 512]);
        assert_eq!(buf.triplet(1919, 0), [414, 512, 512]);
        // no half-line blanking on HD rasters
        assert_eq!(buf.triplet(0, 1079), [195, 512, 512]);
        assert_eq!(buf.triplet(1919, 1079), [195, 512, 512]);
    }

    #[test]
    fn test_iq_substitution() {
        let both = hd1080_10bit(Request { iq: Some(1), ..Default::default() });
        assert_eq!(both.triplet(0, ROW2), [754, 615, 64]);
        assert_eq!(both.triplet(236, ROW2), [244, 612, 395]);
        assert_eq!(both.triplet(236, ROW3), [141, 697, 606]);

        let plus_i = hd1080_10bit(Request { iq: Some(2), ..Default::default() });
        assert_eq!(plus_i.triplet(236, ROW2), [245, 412, 629]);
        assert_eq!(plus_i.triplet(236, ROW3), [64, 512, 512]);

        let none = hd1080_10bit(Request { iq: Some(0), ..Default::default() });
        assert_eq!(none.triplet(236, ROW2), [940, 512, 512]);
    }

    #[test]
    fn test_luma_ramp() {
        // compat 2 at 1080: ramp spans 206+206+204+206+206 = 1028 samples from x = 446
        let buf = hd1080_10bit(Request::default());
        let slope = 876.0f32 / 1028.0;
        assert_eq!(buf.triplet(446, ROW3), [64, 512, 512]);
        assert_eq!(buf.sample(0, 447, ROW3), (64.0 + slope) as u16);
        assert_eq!(buf.sample(0, 446 + 1027, ROW3), (64.0 + 1027.0 * slope) as u16);
        assert_eq!(buf.sample(1, 1000, ROW3), 512);
        // 100% white follows the ramp
        assert_eq!(buf.triplet(1474, ROW3), [940, 512, 512]);
        let ramp = &buf.row(0, ROW3)[446..1474];
        assert!(ramp.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_excursions() {
        // sub-black occupies 312 samples from x = 236, super-white 412 from x = 548
        let buf = hd1080_10bit(Request::default());
        assert_eq!(buf.sample(0, 236, ROW4B), 64);
        assert!(buf.sample(0, 236 + 155, ROW4B) < 8);
        assert_eq!(buf.sample(0, 236 + 156, ROW4B), 4);
        assert_eq!(buf.sample(0, 548, ROW4B), 940);
        assert_eq!(buf.sample(0, 548 + 206, ROW4B), 1019);
        assert!(buf.sample(0, 548 + 205, ROW4B) > 1015);
        assert_eq!(buf.sample(1, 600, ROW4B), 512);
        // neighbouring pluge rows stay flat
        assert_eq!(buf.sample(0, 236 + 156, ROW4B - 1), 64);
    }

    #[test]
    fn test_excursions_disabled() {
        let buf = hd1080_10bit(Request { subblack: Some(0), superwhite: Some(0), ..Default::default() });
        assert!(buf.row(0, ROW4B)[236..548].iter().all(|&y| y == 64));
        assert!(buf.row(0, ROW4B)[548..960].iter().all(|&y| y == 940));
    }

    #[test]
    fn test_wide_gamut_bars() {
        let c = config(Request { resolution: Some(5), wcg: Some(1), ..Default::default() });
        let buf = generate_color_bars(&c);
        assert_eq!(buf.triplet(472 + 420, 0), [2728, 704, 2156]);
        assert_eq!(buf.triplet(472, 1260), [3760, 2048, 2048]);
    }
}
