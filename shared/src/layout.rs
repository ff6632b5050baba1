//! Bar widths and band heights
//!
//! Every width row sums to the frame width of its raster and every set of
//! band heights sums to the frame height. Rows are selected by raster and
//! [`Compat`] variant; the enums make out-of-table lookups unrepresentable.

use crate::config::{BitDepth, Compat};

/// Sampling of a 525/625-line system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// 13.5 MHz, 720 active samples
    Rec601,
    /// Four times colour subcarrier
    Fsc4,
}

/// HD and UHD rasters (SDR family)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdRaster {
    Hd720,
    Hd1080,
    Dci2k,
    Uhdtv1,
    Dci4k,
    Uhdtv2,
}

/// Rasters that can carry the HDR pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdrRaster {
    Hd1080,
    Dci2k,
    Uhdtv1,
    Dci4k,
    Uhdtv2,
}

impl TryFrom<HdRaster> for HdrRaster {
    type Error = HdRaster;

    fn try_from(raster: HdRaster) -> Result<Self, Self::Error> {
        match raster {
            HdRaster::Hd720 => Err(raster),
            HdRaster::Hd1080 => Ok(HdrRaster::Hd1080),
            HdRaster::Dci2k => Ok(HdrRaster::Dci2k),
            HdRaster::Uhdtv1 => Ok(HdrRaster::Uhdtv1),
            HdRaster::Dci4k => Ok(HdrRaster::Dci4k),
            HdRaster::Uhdtv2 => Ok(HdrRaster::Uhdtv2),
        }
    }
}

impl From<HdrRaster> for HdRaster {
    fn from(raster: HdrRaster) -> Self {
        match raster {
            HdrRaster::Hd1080 => HdRaster::Hd1080,
            HdrRaster::Dci2k => HdRaster::Dci2k,
            HdrRaster::Uhdtv1 => HdRaster::Uhdtv1,
            HdrRaster::Dci4k => HdRaster::Dci4k,
            HdrRaster::Uhdtv2 => HdRaster::Uhdtv2,
        }
    }
}

/// Side pillar, seven bars, side pillar
pub type BarRow = [usize; 9];

/// 525-line bar rows
#[derive(Debug)]
pub struct NtscLayout {
    /// Rows 1 and 2
    pub bars: BarRow,
    /// Row 3: side, -I, white, +Q, black, three pluge steps, black, side
    pub lower: [usize; 10],
}

/// HD/UHD bar rows
#[derive(Debug)]
pub struct HdLayout {
    /// Rows 1 to 3
    pub bars: BarRow,
    /// Rows 4a to 4c
    pub pluge: [usize; 11],
}

/// Samples blanked by the half-line pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfLine {
    /// From the start of the first line
    pub leading: usize,
    /// Up to the end of the last line
    pub trailing: usize,
}

const NTSC: [[NtscLayout; 3]; 2] = [
    // 720 samples
    [
        NtscLayout {
            bars: [4, 101, 102, 102, 102, 102, 102, 101, 4],
            lower: [4, 127, 128, 127, 128, 34, 34, 34, 100, 4],
        },
        NtscLayout {
            bars: [4, 102, 102, 102, 100, 102, 102, 102, 4],
            lower: [4, 126, 128, 126, 128, 34, 34, 34, 102, 4],
        },
        NtscLayout {
            bars: [0, 104, 102, 102, 102, 104, 102, 104, 0],
            lower: [0, 128, 130, 128, 128, 34, 34, 34, 104, 0],
        },
    ],
    // 768 samples
    [
        NtscLayout {
            bars: [7, 107, 108, 108, 108, 108, 108, 107, 7],
            lower: [7, 135, 134, 135, 134, 36, 36, 36, 108, 7],
        },
        NtscLayout {
            bars: [7, 108, 108, 108, 106, 108, 108, 108, 7],
            lower: [7, 134, 136, 134, 136, 36, 36, 36, 106, 7],
        },
        NtscLayout {
            bars: [0, 110, 110, 110, 108, 110, 110, 110, 0],
            lower: [0, 137, 138, 137, 138, 36, 36, 36, 110, 0],
        },
    ],
];

// [compat]: 525-line system has 486 lines (480 for RP 219 compatibility)
const NTSC_HEIGHTS: [[usize; 3]; 3] = [[324, 41, 121], [324, 40, 122], [320, 40, 120]];

const PAL: [[[usize; 10]; 3]; 2] = [
    // 720 samples
    [
        [9, 87, 88, 88, 88, 88, 88, 88, 87, 9],
        [8, 88, 88, 88, 88, 88, 88, 88, 88, 8],
        [0, 90, 90, 90, 90, 90, 90, 90, 90, 0],
    ],
    // 948 samples
    [
        [13, 115, 115, 116, 115, 115, 116, 115, 115, 13],
        [10, 116, 116, 116, 116, 116, 116, 116, 116, 10],
        [0, 118, 119, 118, 119, 118, 119, 118, 119, 0],
    ],
];

const HD: [[HdLayout; 3]; 6] = [
    // 720
    [
        HdLayout {
            bars: [160, 137, 137, 137, 138, 137, 137, 137, 160],
            pluge: [160, 206, 274, 115, 46, 45, 46, 46, 45, 137, 160],
        },
        HdLayout {
            bars: [160, 138, 136, 138, 136, 138, 136, 138, 160],
            pluge: [160, 206, 274, 116, 46, 44, 46, 46, 44, 138, 160],
        },
        HdLayout {
            bars: [156, 142, 136, 138, 136, 138, 136, 142, 156],
            pluge: [156, 210, 274, 116, 46, 44, 46, 46, 44, 142, 156],
        },
    ],
    // 1080
    [
        HdLayout {
            bars: [240, 205, 206, 206, 206, 206, 206, 205, 240],
            pluge: [240, 309, 411, 171, 69, 68, 69, 68, 69, 206, 240],
        },
        HdLayout {
            bars: [240, 206, 206, 206, 204, 206, 206, 206, 240],
            pluge: [240, 308, 412, 170, 68, 70, 68, 70, 68, 206, 240],
        },
        HdLayout {
            bars: [236, 210, 206, 206, 204, 206, 206, 210, 236],
            pluge: [236, 312, 412, 170, 68, 70, 68, 70, 68, 210, 236],
        },
    ],
    // 2K
    [
        HdLayout {
            bars: [304, 205, 206, 206, 206, 206, 206, 205, 304],
            pluge: [304, 309, 411, 171, 69, 68, 69, 68, 69, 206, 304],
        },
        HdLayout {
            bars: [304, 206, 206, 206, 204, 206, 206, 206, 304],
            pluge: [304, 308, 412, 170, 68, 70, 68, 70, 68, 206, 304],
        },
        HdLayout {
            bars: [300, 210, 206, 206, 204, 206, 206, 210, 300],
            pluge: [300, 312, 412, 170, 68, 70, 68, 70, 68, 210, 300],
        },
    ],
    // UHD
    [
        HdLayout {
            bars: [480, 410, 412, 412, 412, 412, 412, 410, 480],
            pluge: [480, 618, 822, 342, 138, 136, 138, 136, 138, 412, 480],
        },
        HdLayout {
            bars: [480, 412, 412, 412, 408, 412, 412, 412, 480],
            pluge: [480, 616, 824, 340, 136, 140, 136, 140, 136, 412, 480],
        },
        HdLayout {
            bars: [472, 420, 412, 412, 408, 412, 412, 420, 472],
            pluge: [472, 624, 824, 340, 136, 140, 136, 140, 136, 420, 472],
        },
    ],
    // 4K
    [
        HdLayout {
            bars: [608, 410, 412, 412, 412, 412, 412, 410, 608],
            pluge: [608, 618, 822, 342, 138, 136, 138, 136, 138, 412, 608],
        },
        HdLayout {
            bars: [608, 412, 412, 412, 408, 412, 412, 412, 608],
            pluge: [608, 616, 824, 340, 136, 140, 136, 140, 136, 412, 608],
        },
        HdLayout {
            bars: [600, 420, 412, 412, 408, 412, 412, 420, 600],
            pluge: [600, 624, 824, 340, 136, 140, 136, 140, 136, 420, 600],
        },
    ],
    // 8K
    [
        HdLayout {
            bars: [960, 820, 824, 824, 824, 824, 824, 820, 960],
            pluge: [960, 1236, 1644, 684, 276, 272, 276, 272, 276, 824, 960],
        },
        HdLayout {
            bars: [960, 824, 824, 824, 816, 824, 824, 824, 960],
            pluge: [960, 1232, 1648, 680, 272, 280, 272, 280, 272, 824, 960],
        },
        HdLayout {
            bars: [944, 840, 824, 824, 816, 824, 824, 840, 944],
            pluge: [944, 1248, 1648, 680, 272, 280, 272, 280, 272, 840, 944],
        },
    ],
];

// Black side, 13 grey steps, black side
const HDR_STAIR: [[[usize; 15]; 3]; 5] = [
    // 1080
    [
        [240, 110, 111, 111, 111, 111, 111, 110, 111, 111, 111, 111, 111, 110, 240],
        [240, 110, 111, 111, 111, 111, 111, 110, 111, 111, 111, 111, 111, 110, 240],
        [236, 111, 111, 111, 111, 112, 112, 112, 112, 112, 111, 111, 111, 111, 236],
    ],
    // 2K
    [
        [304, 110, 111, 111, 111, 111, 111, 110, 111, 111, 111, 111, 111, 110, 304],
        [304, 110, 111, 111, 111, 111, 111, 110, 111, 111, 111, 111, 111, 110, 304],
        [300, 111, 111, 111, 111, 112, 112, 112, 112, 112, 111, 111, 111, 111, 300],
    ],
    // UHD
    [
        [480, 221, 221, 221, 222, 222, 222, 222, 222, 222, 222, 221, 221, 221, 480],
        [480, 221, 221, 221, 222, 222, 222, 222, 222, 222, 222, 221, 221, 221, 480],
        [472, 222, 223, 223, 223, 223, 223, 222, 223, 223, 223, 223, 223, 222, 472],
    ],
    // 4K
    [
        [608, 221, 221, 221, 222, 222, 222, 222, 222, 222, 222, 221, 221, 221, 608],
        [608, 221, 221, 221, 222, 222, 222, 222, 222, 222, 222, 221, 221, 221, 608],
        [600, 222, 223, 223, 223, 223, 223, 222, 223, 223, 223, 223, 223, 222, 600],
    ],
    // 8K
    [
        [960, 443, 443, 443, 443, 443, 443, 444, 443, 443, 443, 443, 443, 443, 960],
        [960, 443, 443, 443, 443, 443, 443, 444, 443, 443, 443, 443, 443, 443, 960],
        [944, 445, 445, 445, 446, 446, 446, 446, 446, 446, 446, 445, 445, 445, 944],
    ],
];

// [raster][depth]: pixels spanned by the -7%..109% ramp
const HDR_RAMP: [[usize; 2]; 5] = [
    [1015, 1016],
    [1015, 1016],
    [2030, 2032],
    [2030, 2032],
    [4060, 4063],
];

fn sampling_index(sampling: Sampling) -> usize {
    match sampling {
        Sampling::Rec601 => 0,
        Sampling::Fsc4 => 1,
    }
}

fn hd_index(raster: HdRaster) -> usize {
    match raster {
        HdRaster::Hd720 => 0,
        HdRaster::Hd1080 => 1,
        HdRaster::Dci2k => 2,
        HdRaster::Uhdtv1 => 3,
        HdRaster::Dci4k => 4,
        HdRaster::Uhdtv2 => 5,
    }
}

fn hdr_index(raster: HdrRaster) -> usize {
    hd_index(raster.into()) - 1
}

/// 525-line bar rows
pub fn ntsc(sampling: Sampling, compat: Compat) -> &'static NtscLayout {
    &NTSC[sampling_index(sampling)][compat.index()]
}

/// Heights of the three 525-line bands
pub fn ntsc_bands(compat: Compat) -> [usize; 3] {
    NTSC_HEIGHTS[compat.index()]
}

/// 625-line bar row: side, eight bars, side
pub fn pal(sampling: Sampling, compat: Compat) -> &'static [usize; 10] {
    &PAL[sampling_index(sampling)][compat.index()]
}

/// HD/UHD bar rows
pub fn hd(raster: HdRaster, compat: Compat) -> &'static HdLayout {
    &HD[hd_index(raster)][compat.index()]
}

/// Heights of the six HD bands: 7/12 then five times 1/12
pub fn hd_bands(height: usize) -> [usize; 6] {
    let twelfth = height / 12;
    [twelfth * 7, twelfth, twelfth, twelfth, twelfth, twelfth]
}

/// HDR grey-scale row
pub fn hdr_stair(raster: HdrRaster, compat: Compat) -> &'static [usize; 15] {
    &HDR_STAIR[hdr_index(raster)][compat.index()]
}

/// Pixel run of the HDR grey ramp
pub fn hdr_ramp_run(raster: HdrRaster, depth: BitDepth) -> usize {
    HDR_RAMP[hdr_index(raster)][depth.index()]
}

/// Heights of the five HDR bands: 1/12, 1/2, 1/12, 1/12, 1/4
pub fn hdr_bands(height: usize) -> [usize; 5] {
    let twelfth = height / 12;
    [twelfth, twelfth * 6, twelfth, twelfth, twelfth * 3]
}

/// Half-line blanking runs, measured from the half-line point of the
/// analogue line relative to the start of the digital active line.
pub fn half_line(ntsc: bool, sampling: Sampling) -> HalfLine {
    let (leading, trailing) = match (ntsc, sampling) {
        (true, Sampling::Rec601) => (307, 413),
        (true, Sampling::Fsc4) => (330, 438),
        (false, Sampling::Rec601) => (300, 420),
        (false, Sampling::Fsc4) => (397, 551),
    };
    HalfLine { leading, trailing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Resolution;

    const HD_RASTERS: [(HdRaster, Resolution); 6] = [
        (HdRaster::Hd720, Resolution::Hd720),
        (HdRaster::Hd1080, Resolution::Hd1080),
        (HdRaster::Dci2k, Resolution::Dci2k),
        (HdRaster::Uhdtv1, Resolution::Uhdtv1),
        (HdRaster::Dci4k, Resolution::Dci4k),
        (HdRaster::Uhdtv2, Resolution::Uhdtv2),
    ];

    #[test]
    fn test_ntsc_rows_fill_the_line() {
        for (sampling, res) in [
            (Sampling::Rec601, Resolution::Ntsc),
            (Sampling::Fsc4, Resolution::Ntsc4fsc),
        ] {
            for compat in Compat::ALL {
                let (width, height) = res.dimensions(compat);
                let layout = ntsc(sampling, compat);
                assert_eq!(layout.bars.iter().sum::<usize>(), width, "{res:?} {compat:?}");
                assert_eq!(layout.lower.iter().sum::<usize>(), width, "{res:?} {compat:?}");
                assert_eq!(ntsc_bands(compat).iter().sum::<usize>(), height);
            }
        }
    }

    #[test]
    fn test_pal_rows_fill_the_line() {
        for (sampling, res) in [
            (Sampling::Rec601, Resolution::Pal),
            (Sampling::Fsc4, Resolution::Pal4fsc),
        ] {
            for compat in Compat::ALL {
                let (width, _) = res.dimensions(compat);
                assert_eq!(pal(sampling, compat).iter().sum::<usize>(), width);
            }
        }
    }

    #[test]
    fn test_hd_rows_fill_the_frame() {
        for (raster, res) in HD_RASTERS {
            for compat in Compat::ALL {
                let (width, height) = res.dimensions(compat);
                let layout = hd(raster, compat);
                assert_eq!(layout.bars.iter().sum::<usize>(), width, "{res:?} {compat:?}");
                assert_eq!(layout.pluge.iter().sum::<usize>(), width, "{res:?} {compat:?}");
                assert_eq!(hd_bands(height).iter().sum::<usize>(), height);
            }
        }
    }

    #[test]
    fn test_hdr_rows_fill_the_frame() {
        for (raster, res) in HD_RASTERS {
            let Ok(hdr) = HdrRaster::try_from(raster) else {
                assert_eq!(raster, HdRaster::Hd720);
                continue;
            };
            for compat in Compat::ALL {
                let (width, height) = res.dimensions(compat);
                assert_eq!(hdr_stair(hdr, compat).iter().sum::<usize>(), width);
                assert_eq!(hdr_bands(height).iter().sum::<usize>(), height);
                // stair sides line up with the bar sides
                assert_eq!(hdr_stair(hdr, compat)[0], hd(raster, compat).bars[0]);
            }
            for depth in [BitDepth::Ten, BitDepth::Twelve] {
                assert!(hdr_ramp_run(hdr, depth) < res.dimensions(Compat::Rp219).0);
            }
        }
    }

    #[test]
    fn test_half_line_runs_cover_one_line() {
        assert_eq!(half_line(true, Sampling::Rec601), HalfLine { leading: 307, trailing: 413 });
        for (ntsc, sampling, width) in [
            (true, Sampling::Rec601, 720),
            (true, Sampling::Fsc4, 768),
            (false, Sampling::Rec601, 720),
            (false, Sampling::Fsc4, 948),
        ] {
            let runs = half_line(ntsc, sampling);
            assert_eq!(runs.leading + runs.trailing, width);
        }
    }
}
