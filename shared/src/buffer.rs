//! Planar sample buffers and the row cursor the renderer writes through

use std::ops::Range;

use crate::error::{Error, Result};
use crate::palette::Triplet;

/// Three owned planes of 16-bit samples with a shared stride
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    planes: [Vec<u16>; 3],
}

impl PixelBuffer {
    /// Zeroed buffer with stride equal to width
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, width, 0)
    }

    /// Zeroed buffer with row padding
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self> {
        if stride < width {
            return Err(Error::other(format!(
                "stride {} is narrower than width {}",
                stride, width
            )));
        }
        Ok(Self::filled(width, height, stride, 0))
    }

    /// Buffer with every sample, padding included, set to `value`
    pub fn filled(width: usize, height: usize, stride: usize, value: u16) -> Self {
        let len = stride * height;
        Self {
            width,
            height,
            stride,
            planes: [vec![value; len], vec![value; len], vec![value; len]],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per row, padding included
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whole plane, padding included
    pub fn plane(&self, plane: usize) -> &[u16] {
        &self.planes[plane]
    }

    /// Visible samples of one row
    pub fn row(&self, plane: usize, y: usize) -> &[u16] {
        let start = y * self.stride;
        &self.planes[plane][start..start + self.width]
    }

    pub fn sample(&self, plane: usize, x: usize, y: usize) -> u16 {
        self.planes[plane][y * self.stride + x]
    }

    /// All three samples at one position
    pub fn triplet(&self, x: usize, y: usize) -> Triplet {
        [self.sample(0, x, y), self.sample(1, x, y), self.sample(2, x, y)]
    }

    /// Mutable view for the renderer
    pub fn planes_mut(&mut self) -> Planes<'_> {
        let [a, b, c] = &mut self.planes;
        Planes {
            width: self.width,
            height: self.height,
            stride: self.stride,
            planes: [a.as_mut_slice(), b.as_mut_slice(), c.as_mut_slice()],
        }
    }
}

/// Borrowed mutable planes, possibly owned by a host
#[derive(Debug)]
pub struct Planes<'a> {
    width: usize,
    height: usize,
    stride: usize,
    planes: [&'a mut [u16]; 3],
}

impl<'a> Planes<'a> {
    /// Wrap host-owned plane memory. Every plane must hold `stride * height`
    /// samples; the last row may omit its padding.
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        planes: [&'a mut [u16]; 3],
    ) -> Result<Self> {
        if stride < width {
            return Err(Error::other(format!(
                "stride {} is narrower than width {}",
                stride, width
            )));
        }
        let needed = if height == 0 { 0 } else { stride * (height - 1) + width };
        if let Some(short) = planes.iter().position(|p| p.len() < needed) {
            return Err(Error::other(format!(
                "plane {} holds {} samples, {} needed",
                short,
                planes[short].len(),
                needed
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            planes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cursor at the start of row `y`
    pub fn row(&mut self, y: usize) -> RowCursor<'_> {
        let start = y * self.stride;
        let end = start + self.width;
        let [a, b, c] = &mut self.planes;
        RowCursor {
            rows: [&mut a[start..end], &mut b[start..end], &mut c[start..end]],
            x: 0,
        }
    }

    /// Paint each row of `rows` left to right with `paint`.
    ///
    /// Every row must be painted to its last sample.
    pub fn paint_rows(&mut self, rows: Range<usize>, mut paint: impl FnMut(&mut RowCursor<'_>)) {
        let width = self.width;
        for y in rows {
            let mut cursor = self.row(y);
            paint(&mut cursor);
            debug_assert_eq!(cursor.position(), width, "row {} not fully painted", y);
        }
    }

    /// Overwrite `span` of row `y` with one value
    pub fn overwrite(&mut self, y: usize, span: Range<usize>, value: Triplet) {
        let start = y * self.stride;
        for (plane, sample) in self.planes.iter_mut().zip(value) {
            plane[start + span.start..start + span.end].fill(sample);
        }
    }
}

/// Region writer for one row: every call paints the next `width` samples.
#[derive(Debug)]
pub struct RowCursor<'r> {
    rows: [&'r mut [u16]; 3],
    x: usize,
}

/// Ramp sample: computed in `f32` and truncated toward zero
#[inline]
pub fn ramp_sample(base: u16, i: usize, slope: f32) -> u16 {
    (f32::from(base) + i as f32 * slope) as u16
}

impl RowCursor<'_> {
    /// Samples painted so far
    pub fn position(&self) -> usize {
        self.x
    }

    /// Flat run
    pub fn fill(&mut self, width: usize, value: Triplet) {
        let span = self.x..self.x + width;
        for (row, sample) in self.rows.iter_mut().zip(value) {
            row[span.clone()].fill(sample);
        }
        self.x = span.end;
    }

    /// Consecutive flat runs, one per width/value pair
    pub fn fill_bars(&mut self, widths: &[usize], values: &[Triplet]) {
        debug_assert_eq!(widths.len(), values.len());
        for (&width, &value) in widths.iter().zip(values) {
            self.fill(width, value);
        }
    }

    /// Ramp on the first plane only; the other planes hold `value`'s samples
    pub fn luma_ramp(&mut self, width: usize, value: Triplet, slope: f32) {
        let [luma, cb, cr] = &mut self.rows;
        for i in 0..width {
            luma[self.x + i] = ramp_sample(value[0], i, slope);
        }
        cb[self.x..self.x + width].fill(value[1]);
        cr[self.x..self.x + width].fill(value[2]);
        self.x += width;
    }

    /// Ramp with equal samples on every plane
    pub fn grey_ramp(&mut self, width: usize, base: u16, slope: f32) {
        for i in 0..width {
            let sample = ramp_sample(base, i, slope);
            for row in self.rows.iter_mut() {
                row[self.x + i] = sample;
            }
        }
        self.x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_paints_in_order() {
        let mut buf = PixelBuffer::new(6, 2);
        let mut planes = buf.planes_mut();
        planes.paint_rows(0..2, |row| {
            row.fill(2, [1, 2, 3]);
            row.luma_ramp(4, [10, 20, 30], 1.5);
        });
        assert_eq!(buf.row(0, 1), &[1, 1, 10, 11, 13, 14]);
        assert_eq!(buf.row(1, 1), &[2, 2, 20, 20, 20, 20]);
    }

    #[test]
    fn test_ramp_truncates() {
        // 64 + 3 * 0.99 = 66.97 truncates to 66, rounding would give 67
        assert_eq!(ramp_sample(64, 3, 0.99), 66);
        assert_eq!(ramp_sample(64, 5, -1.5), 56);
    }

    #[test]
    fn test_stride_padding_untouched() {
        let mut buf = PixelBuffer::with_stride(3, 2, 5).unwrap();
        buf.planes_mut().paint_rows(0..2, |row| row.fill(3, [7, 7, 7]));
        assert_eq!(buf.plane(0), &[7, 7, 7, 0, 0, 7, 7, 7, 0, 0]);
        assert!(PixelBuffer::with_stride(4, 1, 3).is_err());
    }

    #[test]
    fn test_host_planes_checked() {
        let mut a = vec![0u16; 8];
        let mut b = vec![0u16; 8];
        let mut c = vec![0u16; 7];
        let err = Planes::new(4, 2, 4, [&mut a[..], &mut b[..], &mut c[..]]).unwrap_err();
        assert!(err.to_string().contains("plane 2"));
    }

    #[test]
    fn test_overwrite_span() {
        let mut buf = PixelBuffer::new(4, 1);
        buf.planes_mut().overwrite(0, 1..3, [9, 8, 7]);
        assert_eq!(buf.triplet(1, 0), [9, 8, 7]);
        assert_eq!(buf.triplet(3, 0), [0, 0, 0]);
    }
}
