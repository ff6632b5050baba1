//! 625-line bars: one full-height band of 100/0/75/0 bars

use super::{blank_half_lines, BarPattern};
use crate::buffer::Planes;
use crate::config::FormatConfig;
use crate::layout::{self, HalfLine, Sampling};
use crate::palette::{self, Triplet};

#[derive(Debug)]
pub struct PalBars {
    widths: &'static [usize; 10],
    values: &'static [Triplet; 10],
    half_line: Option<(HalfLine, Triplet)>,
}

impl PalBars {
    pub fn new(config: &FormatConfig, sampling: Sampling) -> Self {
        let depth = config.depth();
        Self {
            widths: layout::pal(sampling, config.compat()),
            values: palette::pal(depth),
            half_line: config
                .halfline()
                .then(|| (layout::half_line(false, sampling), palette::blanking(depth))),
        }
    }
}

impl BarPattern for PalBars {
    fn paint(&self, planes: &mut Planes<'_>) {
        let (widths, values) = (self.widths, self.values);
        let height = planes.height();
        planes.paint_rows(0..height, |row| row.fill_bars(widths, values));
        if let Some((runs, value)) = self.half_line {
            blank_half_lines(planes, runs, value);
        }
    }
}
