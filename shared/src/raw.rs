//! Raw planar output
//!
//! Planes are written one after another as little-endian 16-bit samples
//! with no header and no row padding, the layout ffmpeg calls
//! `yuv444p10le` / `yuv444p12le` / `gbrp10le` / `gbrp12le`. HDR frames
//! hold R'G'B' in plane order R, G, B; ffmpeg's `gbrp` expects G, B, R,
//! which [`PlaneOrder::Gbr`] produces.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::buffer::PixelBuffer;
use crate::config::PixelFormat;
use crate::error::{Error, Result};

/// Order the planes are written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneOrder {
    /// Buffer order: Y, Cb, Cr or R, G, B
    #[default]
    Native,
    /// G, B, R for RGB frames, as `gbrp*` readers expect
    Gbr,
}

impl PlaneOrder {
    fn indices(self) -> [usize; 3] {
        match self {
            PlaneOrder::Native => [0, 1, 2],
            PlaneOrder::Gbr => [1, 2, 0],
        }
    }
}

/// ffmpeg `-pix_fmt` name for a raw file of this format
pub fn ffmpeg_pix_fmt(format: PixelFormat) -> &'static str {
    match format {
        PixelFormat::Yuv444P10 => "yuv444p10le",
        PixelFormat::Yuv444P12 => "yuv444p12le",
        PixelFormat::Rgb30 => "gbrp10le",
        PixelFormat::Rgb36 => "gbrp12le",
    }
}

/// Encoded size in bytes of a frame
pub fn frame_size(width: usize, height: usize) -> usize {
    width * height * 3 * 2
}

/// Pack the visible samples of every plane
pub fn encode_planar_le(buffer: &PixelBuffer, order: PlaneOrder) -> Bytes {
    let mut buf = BytesMut::with_capacity(frame_size(buffer.width(), buffer.height()));
    for plane in order.indices() {
        for y in 0..buffer.height() {
            for &sample in buffer.row(plane, y) {
                buf.put_u16_le(sample);
            }
        }
    }
    buf.freeze()
}

/// Read a raw frame back into a buffer
pub fn decode_planar_le(
    mut data: Bytes,
    width: usize,
    height: usize,
    order: PlaneOrder,
) -> Result<PixelBuffer> {
    let expected = frame_size(width, height);
    if data.remaining() != expected {
        return Err(Error::other(format!(
            "raw frame holds {} bytes, {}x{} needs {}",
            data.remaining(),
            width,
            height,
            expected
        )));
    }

    let mut samples: [Vec<u16>; 3] = Default::default();
    for plane in order.indices() {
        samples[plane] = (0..width * height).map(|_| data.get_u16_le()).collect();
    }
    let mut buffer = PixelBuffer::new(width, height);
    let mut planes = buffer.planes_mut();
    for y in 0..height {
        let mut row = planes.row(y);
        for x in 0..width {
            let i = y * width + x;
            row.fill(1, [samples[0][i], samples[1][i], samples[2][i]]);
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Request;
    use crate::test_pattern::generate_color_bars;
    use crate::validate::validate;

    #[test]
    fn test_layout_little_endian() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.planes_mut().paint_rows(0..1, |row| {
            row.fill(1, [0x0102, 0x0304, 0x0506]);
            row.fill(1, [0x0A0B, 0x0C0D, 0x0E0F]);
        });
        let bytes = encode_planar_le(&buffer, PlaneOrder::Native);
        assert_eq!(
            &bytes[..],
            &[0x02, 0x01, 0x0B, 0x0A, 0x04, 0x03, 0x0D, 0x0C, 0x06, 0x05, 0x0F, 0x0E]
        );
        let gbr = encode_planar_le(&buffer, PlaneOrder::Gbr);
        assert_eq!(&gbr[..4], &[0x04, 0x03, 0x0D, 0x0C]);
    }

    #[test]
    fn test_padding_dropped() {
        let mut buffer = PixelBuffer::with_stride(3, 2, 8).unwrap();
        buffer.planes_mut().paint_rows(0..2, |row| row.fill(3, [1, 2, 3]));
        let bytes = encode_planar_le(&buffer, PlaneOrder::Native);
        assert_eq!(bytes.len(), frame_size(3, 2));
    }

    #[test]
    fn test_rendered_frame_reads_back() {
        let config = validate(&Request { hdr: Some(1), ..Default::default() })
            .unwrap()
            .config;
        let frame = generate_color_bars(&config);
        let bytes = encode_planar_le(&frame, PlaneOrder::Gbr);
        let back = decode_planar_le(bytes, 1920, 1080, PlaneOrder::Gbr).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_short_input_rejected() {
        let err = decode_planar_le(Bytes::from_static(&[0; 10]), 2, 1, PlaneOrder::Native);
        assert!(err.is_err());
    }

    #[test]
    fn test_pix_fmt_names() {
        assert_eq!(ffmpeg_pix_fmt(PixelFormat::Yuv444P10), "yuv444p10le");
        assert_eq!(ffmpeg_pix_fmt(PixelFormat::Rgb36), "gbrp12le");
    }
}
