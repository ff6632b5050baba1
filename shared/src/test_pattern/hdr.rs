//! HDR bars (ITU-R BT.2111), R'G'B' output

use super::BarPattern;
use crate::buffer::{Planes, RowCursor};
use crate::config::{FormatConfig, HdrMode};
use crate::layout::{self, BarRow, HdrRaster};
use crate::palette::{self, HdrPalette, Triplet};

#[derive(Debug)]
pub struct HdrBars {
    bars: &'static BarRow,
    stair: &'static [usize; 15],
    ramp_run: usize,
    palette: &'static HdrPalette,
}

fn grey(level: u16) -> Triplet {
    [level; 3]
}

impl HdrBars {
    pub fn new(config: &FormatConfig, raster: HdrRaster, mode: HdrMode) -> Self {
        let depth = config.depth();
        Self {
            bars: &layout::hd(raster.into(), config.compat()).bars,
            stair: layout::hdr_stair(raster, config.compat()),
            ramp_run: layout::hdr_ramp_run(raster, depth),
            palette: palette::hdr(mode, depth),
        }
    }

    /// Seven bars between 40% grey sides
    fn framed(&self, row: &mut RowCursor<'_>, values: &[Triplet; 7]) {
        let grey40 = self.palette.grey40;
        row.fill(self.bars[0], grey40);
        row.fill_bars(&self.bars[1..8], values);
        row.fill(self.bars[8], grey40);
    }

    fn stair_row(&self, row: &mut RowCursor<'_>) {
        let black = grey(self.palette.black);
        row.fill(self.stair[0], black);
        for (&width, &level) in self.stair[1..14].iter().zip(&self.palette.stair) {
            row.fill(width, grey(level));
        }
        row.fill(self.stair[14], black);
    }

    fn ramp_row(&self, row: &mut RowCursor<'_>, width: usize) {
        let (low, high) = (self.palette.ramp_low(), self.palette.ramp_high());
        let run = self.ramp_run;
        let lead = (width - run) / 2;
        row.fill(lead, grey(low));
        row.grey_ramp(run, low, f32::from(high - low) / run as f32);
        row.fill(width - lead - run, grey(high));
    }
}

impl BarPattern for HdrBars {
    fn paint(&self, planes: &mut Planes<'_>) {
        let width = planes.width();
        let palette = self.palette;
        let bands = layout::hdr_bands(planes.height());
        let mut top = 0;
        for (band, height) in bands.into_iter().enumerate() {
            let rows = top..top + height;
            match band {
                0 => planes.paint_rows(rows, |row| self.framed(row, &palette.bars100)),
                1 => planes.paint_rows(rows, |row| self.framed(row, &palette.bars75)),
                2 => planes.paint_rows(rows, |row| self.stair_row(row)),
                3 => planes.paint_rows(rows, |row| self.ramp_row(row, width)),
                _ => planes.paint_rows(rows, |row| self.framed(row, &palette.bars709)),
            }
            top += height;
        }
    }
}
