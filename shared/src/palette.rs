//! Sample values for every bar
//!
//! SDR values are Y'CbCr triplets from SMPTE RP 219-1 (HD/UHD) and
//! SMPTE EG 1 / EBU bars (525/625-line). HDR values are R'G'B' triplets
//! following ITU-R BT.2111 with BT.2100 quantisation. Tables are indexed by
//! [`BitDepth`] (and [`Gamut`] or [`HdrMode`]) through the lookup functions.

use crate::config::{BitDepth, Gamut, HdrMode, IqMode};

/// One sample per plane: Y'CbCr for SDR, R'G'B' for HDR
pub type Triplet = [u16; 3];

/// 525-line palette
#[derive(Debug)]
pub struct NtscPalette {
    /// 0% black, 75% grey, yellow, cyan, green, magenta, red, blue, 0% black
    pub bars: [Triplet; 9],
    /// 0% black, 75% blue, black, magenta, black, cyan, black, grey, black
    pub reversed: [Triplet; 9],
    /// 0% black, -I, 100% white, +Q, 0% black, -4%, 0%, +4%, 0%, 0% black.
    /// -I and +Q are invalid if converted to RGB.
    pub lower: [Triplet; 10],
}

/// HD/UHD palette for one gamut
#[derive(Debug)]
pub struct HdPalette {
    /// 40% grey, 75% white, yellow, cyan, green, magenta, red, blue, 40% grey
    pub bars: [Triplet; 9],
    /// 100% cyan, 100% white, 75% white x6, 100% blue, then the -I, +I and
    /// 75% white substitutes for segment 1
    pub second: [Triplet; 12],
    /// 100% yellow, 0% black x5, 100% white x2, 100% red, then the +Q
    /// substitute for segment 1
    pub third: [Triplet; 10],
}

/// HDR palette for one transfer/range and depth
#[derive(Debug)]
pub struct HdrPalette {
    pub grey40: Triplet,
    /// White, yellow, cyan, green, magenta, red, blue
    pub bars100: [Triplet; 7],
    pub bars75: [Triplet; 7],
    /// Sides of the grey-scale row
    pub black: u16,
    /// -7%, 0%, 10%, 20% ... 100%, 109%
    pub stair: [u16; 13],
    /// 75% BT.709 bars carried in BT.2020, same order as `bars75`
    pub bars709: [Triplet; 7],
}

impl HdrPalette {
    /// Lowest level of the grey ramp
    pub fn ramp_low(&self) -> u16 {
        self.stair[0]
    }

    /// Highest level of the grey ramp
    pub fn ramp_high(&self) -> u16 {
        self.stair[12]
    }
}

/// Segment of [`HdPalette::second`] holding 100% white
pub const WHITE100: usize = 1;
/// Segment of [`HdPalette::third`] holding 0% black
pub const BLACK: usize = 1;
/// First ramp segment of [`HdPalette::third`]
pub const RAMP_START: usize = 2;
/// Segment of [`HdPalette::third`] holding the ramp's top level
pub const RAMP_END: usize = 6;
const IQ_OFFSET: usize = 8;

/// Pluge index of the sub-black valley level
pub const VALLEY: usize = 11;
/// Pluge index of the super-white peak level
pub const PEAK: usize = 12;

const NTSC: [NtscPalette; 2] = [
    NtscPalette {
        bars: [
            [64, 512, 512],
            [721, 512, 512],
            [646, 176, 567],
            [525, 625, 176],
            [450, 289, 231],
            [335, 735, 793],
            [260, 399, 848],
            [139, 848, 457],
            [64, 512, 512],
        ],
        reversed: [
            [64, 512, 512],
            [139, 848, 457],
            [64, 512, 512],
            [335, 735, 793],
            [64, 512, 512],
            [525, 625, 176],
            [64, 512, 512],
            [721, 512, 512],
            [64, 512, 512],
        ],
        lower: [
            [64, 512, 512],
            [64, 633, 380],
            [940, 512, 512],
            [64, 698, 598],
            [64, 512, 512],
            [29, 512, 512],
            [64, 512, 512],
            [99, 512, 512],
            [64, 512, 512],
            [64, 512, 512],
        ],
    },
    NtscPalette {
        bars: [
            [256, 2048, 2048],
            [2884, 2048, 2048],
            [2584, 704, 2267],
            [2098, 2502, 704],
            [1799, 1158, 923],
            [1341, 2938, 3173],
            [1042, 1594, 3392],
            [556, 3392, 1829],
            [256, 2048, 2048],
        ],
        reversed: [
            [256, 2048, 2048],
            [556, 3392, 1829],
            [256, 2048, 2048],
            [1341, 2938, 3173],
            [256, 2048, 2048],
            [2098, 2502, 704],
            [256, 2048, 2048],
            [2884, 2048, 2048],
            [256, 2048, 2048],
        ],
        lower: [
            [256, 2048, 2048],
            [256, 2532, 1520],
            [3760, 2048, 2048],
            [256, 2793, 2391],
            [256, 2048, 2048],
            [116, 2048, 2048],
            [256, 2048, 2048],
            [396, 2048, 2048],
            [256, 2048, 2048],
            [256, 2048, 2048],
        ],
    },
];

// 0% black, 100% white, 75% yellow, cyan, green, magenta, red, blue, 0% black x2
const PAL: [[Triplet; 10]; 2] = [
    [
        [64, 512, 512],
        [940, 512, 512],
        [646, 176, 567],
        [525, 625, 176],
        [450, 289, 231],
        [335, 735, 793],
        [260, 399, 848],
        [139, 848, 457],
        [64, 512, 512],
        [64, 512, 512],
    ],
    [
        [256, 2048, 2048],
        [3760, 2048, 2048],
        [2584, 704, 2267],
        [2098, 2502, 704],
        [1799, 1158, 923],
        [1341, 2938, 3173],
        [1042, 1594, 3392],
        [556, 3392, 1829],
        [256, 2048, 2048],
        [256, 2048, 2048],
    ],
];

// [gamut][depth]; -I/+I/+Q do not exist in BT.2020 and are left at zero
const HD: [[HdPalette; 2]; 2] = [
    [
        HdPalette {
            bars: [
                [414, 512, 512],
                [721, 512, 512],
                [674, 176, 543],
                [581, 589, 176],
                [534, 253, 207],
                [251, 771, 817],
                [204, 435, 848],
                [111, 848, 481],
                [414, 512, 512],
            ],
            second: [
                [754, 615, 64],
                [940, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [127, 960, 471],
                [244, 612, 395],
                [245, 412, 629],
                [721, 512, 512],
            ],
            third: [
                [877, 64, 553],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [940, 512, 512],
                [940, 512, 512],
                [250, 409, 960],
                [141, 697, 606],
            ],
        },
        HdPalette {
            bars: [
                [1658, 2048, 2048],
                [2884, 2048, 2048],
                [2694, 704, 2171],
                [2325, 2356, 704],
                [2136, 1012, 827],
                [1004, 3084, 3269],
                [815, 1740, 3392],
                [446, 3392, 1925],
                [1658, 2048, 2048],
            ],
            second: [
                [3015, 2459, 256],
                [3760, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [509, 3840, 1884],
                [976, 2448, 1580],
                [982, 1648, 2516],
                [2884, 2048, 2048],
            ],
            third: [
                [3507, 256, 2212],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [3760, 2048, 2048],
                [3760, 2048, 2048],
                [1001, 1637, 3840],
                [564, 2787, 2425],
            ],
        },
    ],
    [
        HdPalette {
            bars: [
                [414, 512, 512],
                [721, 512, 512],
                [682, 176, 539],
                [548, 606, 176],
                [509, 270, 203],
                [276, 754, 821],
                [237, 418, 848],
                [103, 848, 485],
                [414, 512, 512],
            ],
            second: [
                [710, 637, 64],
                [940, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [721, 512, 512],
                [116, 960, 476],
                [0, 0, 0],
                [0, 0, 0],
                [721, 512, 512],
            ],
            third: [
                [888, 64, 548],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [64, 512, 512],
                [940, 512, 512],
                [940, 512, 512],
                [294, 387, 960],
                [0, 0, 0],
            ],
        },
        HdPalette {
            bars: [
                [1658, 2048, 2048],
                [2884, 2048, 2048],
                [2728, 704, 2156],
                [2194, 2423, 704],
                [2038, 1079, 812],
                [1102, 3017, 3284],
                [946, 1673, 3392],
                [412, 3392, 1940],
                [1658, 2048, 2048],
            ],
            second: [
                [2839, 2548, 256],
                [3760, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [2884, 2048, 2048],
                [464, 3840, 1904],
                [0, 0, 0],
                [0, 0, 0],
                [2884, 2048, 2048],
            ],
            third: [
                [3552, 256, 2192],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [256, 2048, 2048],
                [3760, 2048, 2048],
                [3760, 2048, 2048],
                [1177, 1548, 3840],
                [0, 0, 0],
            ],
        },
    ],
];

// 15% grey, 0% black, 100% white, 0% black, -2%, 0%, +2%, 0%, +4%, 0% black,
// 15% grey, sub-black valley, super-white peak
const PLUGE: [[Triplet; 13]; 2] = [
    [
        [195, 512, 512],
        [64, 512, 512],
        [940, 512, 512],
        [64, 512, 512],
        [46, 512, 512],
        [64, 512, 512],
        [82, 512, 512],
        [64, 512, 512],
        [99, 512, 512],
        [64, 512, 512],
        [195, 512, 512],
        [4, 512, 512],
        [1019, 512, 512],
    ],
    [
        [782, 2048, 2048],
        [256, 2048, 2048],
        [3760, 2048, 2048],
        [256, 2048, 2048],
        [186, 2048, 2048],
        [256, 2048, 2048],
        [326, 2048, 2048],
        [256, 2048, 2048],
        [396, 2048, 2048],
        [256, 2048, 2048],
        [782, 2048, 2048],
        [16, 2048, 2048],
        [4079, 2048, 2048],
    ],
];

/// White, yellow, cyan, green, magenta, red, blue at `high` over `low`
const fn primaries(high: u16, low: u16) -> [Triplet; 7] {
    [
        [high, high, high],
        [high, high, low],
        [low, high, high],
        [low, high, low],
        [high, low, high],
        [high, low, low],
        [low, low, high],
    ]
}

const fn grey(level: u16) -> Triplet {
    [level, level, level]
}

// [mode][depth]
const HDR: [[HdrPalette; 2]; 3] = [
    // HLG, narrow range
    [
        HdrPalette {
            grey40: grey(414),
            bars100: primaries(940, 64),
            bars75: primaries(721, 64),
            black: 64,
            stair: [4, 64, 152, 239, 327, 414, 502, 590, 677, 765, 852, 940, 1019],
            bars709: [
                [721, 721, 721],
                [713, 719, 316],
                [538, 709, 718],
                [512, 706, 296],
                [651, 286, 705],
                [639, 269, 164],
                [227, 147, 702],
            ],
        },
        HdrPalette {
            grey40: grey(1658),
            bars100: primaries(3760, 256),
            bars75: primaries(2884, 256),
            black: 256,
            stair: [16, 256, 606, 957, 1307, 1658, 2008, 2358, 2709, 3059, 3410, 3760, 4075],
            bars709: [
                [2884, 2884, 2884],
                [2853, 2876, 1265],
                [2152, 2835, 2873],
                [2048, 2826, 1183],
                [2603, 1142, 2820],
                [2554, 1077, 656],
                [906, 590, 2808],
            ],
        },
    ],
    // PQ, narrow range
    [
        HdrPalette {
            grey40: grey(414),
            bars100: primaries(940, 64),
            bars75: primaries(721, 64),
            black: 64,
            stair: [4, 64, 152, 239, 327, 414, 502, 590, 677, 765, 852, 940, 1019],
            bars709: [
                [721, 721, 721],
                [717, 720, 511],
                [627, 714, 719],
                [616, 713, 496],
                [683, 489, 712],
                [677, 476, 361],
                [436, 334, 710],
            ],
        },
        HdrPalette {
            grey40: grey(1658),
            bars100: primaries(3760, 256),
            bars75: primaries(2884, 256),
            black: 256,
            stair: [16, 256, 606, 957, 1307, 1658, 2008, 2358, 2709, 3059, 3410, 3760, 4075],
            bars709: [
                [2884, 2884, 2884],
                [2867, 2880, 2046],
                [2510, 2857, 2878],
                [2463, 2852, 1986],
                [2732, 1955, 2849],
                [2706, 1902, 1443],
                [1746, 1338, 2842],
            ],
        },
    ],
    // PQ, full range: -7% and 109% clip to the code range
    [
        HdrPalette {
            grey40: grey(409),
            bars100: primaries(1023, 0),
            bars75: primaries(767, 0),
            black: 0,
            stair: [0, 0, 102, 205, 307, 409, 512, 614, 716, 818, 921, 1023, 1023],
            bars709: [
                [767, 767, 767],
                [762, 766, 522],
                [658, 759, 765],
                [644, 758, 505],
                [723, 496, 757],
                [715, 481, 346],
                [435, 316, 755],
            ],
        },
        HdrPalette {
            grey40: grey(1638),
            bars100: primaries(4095, 0),
            bars75: primaries(3071, 0),
            black: 0,
            stair: [0, 0, 410, 819, 1228, 1638, 2048, 2457, 2866, 3276, 3686, 4095, 4095],
            bars709: [
                [3071, 3071, 3071],
                [3051, 3066, 2091],
                [2634, 3039, 3064],
                [2580, 3034, 2021],
                [2893, 1985, 3030],
                [2864, 1924, 1387],
                [1741, 1264, 3022],
            ],
        },
    ],
];

pub fn ntsc(depth: BitDepth) -> &'static NtscPalette {
    &NTSC[depth.index()]
}

pub fn pal(depth: BitDepth) -> &'static [Triplet; 10] {
    &PAL[depth.index()]
}

pub fn hd(gamut: Gamut, depth: BitDepth) -> &'static HdPalette {
    &HD[gamut.index()][depth.index()]
}

pub fn pluge(depth: BitDepth) -> &'static [Triplet; 13] {
    &PLUGE[depth.index()]
}

pub fn hdr(mode: HdrMode, depth: BitDepth) -> &'static HdrPalette {
    &HDR[mode.index()][depth.index()]
}

/// Black luma with mid-scale chroma, used for half-line blanking
pub fn blanking(depth: BitDepth) -> Triplet {
    ntsc(depth).bars[0]
}

impl HdPalette {
    /// Segment 1 of the second row for the given I/Q mode
    pub fn second_sub(&self, iq: IqMode) -> Triplet {
        match iq {
            IqMode::None => self.second[WHITE100],
            other => self.second[other as usize + IQ_OFFSET],
        }
    }

    /// Segment 1 of the third row for the given I/Q mode
    pub fn third_sub(&self, iq: IqMode) -> Triplet {
        match iq {
            IqMode::Both => self.third[IqMode::Both as usize + IQ_OFFSET],
            _ => self.third[BLACK],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPTHS: [BitDepth; 2] = [BitDepth::Ten, BitDepth::Twelve];

    fn within(t: &Triplet, depth: BitDepth) -> bool {
        t.iter().all(|&s| s <= depth.max_value())
    }

    #[test]
    fn test_every_value_fits_its_depth() {
        for depth in DEPTHS {
            let n = ntsc(depth);
            assert!(n.bars.iter().chain(&n.reversed).chain(&n.lower).all(|t| within(t, depth)));
            assert!(pal(depth).iter().all(|t| within(t, depth)));
            assert!(pluge(depth).iter().all(|t| within(t, depth)));
            for gamut in [Gamut::Bt709, Gamut::Bt2020] {
                let p = hd(gamut, depth);
                assert!(p.bars.iter().chain(&p.second).chain(&p.third).all(|t| within(t, depth)));
            }
            for mode in [HdrMode::Hlg, HdrMode::Pq, HdrMode::PqFullRange] {
                let p = hdr(mode, depth);
                assert!(p.bars100.iter().chain(&p.bars75).chain(&p.bars709).all(|t| within(t, depth)));
                assert!(p.stair.iter().all(|&s| s <= depth.max_value()));
            }
        }
    }

    #[test]
    fn test_twelve_bit_tracks_ten_bit() {
        // 12-bit values are the 10-bit values scaled by four, give or take rounding
        let ten = hd(Gamut::Bt709, BitDepth::Ten);
        let twelve = hd(Gamut::Bt709, BitDepth::Twelve);
        for (a, b) in ten.bars.iter().zip(&twelve.bars) {
            for (x, y) in a.iter().zip(b) {
                assert!((i32::from(*x) * 4 - i32::from(*y)).abs() <= 4, "{x} vs {y}");
            }
        }
    }

    #[test]
    fn test_iq_substitutes() {
        let p = hd(Gamut::Bt709, BitDepth::Ten);
        assert_eq!(p.second_sub(IqMode::None), [940, 512, 512]);
        assert_eq!(p.second_sub(IqMode::Both), [244, 612, 395]);
        assert_eq!(p.second_sub(IqMode::PlusI), [245, 412, 629]);
        assert_eq!(p.second_sub(IqMode::White), [721, 512, 512]);
        assert_eq!(p.third_sub(IqMode::Both), [141, 697, 606]);
        assert_eq!(p.third_sub(IqMode::White), [64, 512, 512]);
    }

    #[test]
    fn test_hdr_white_preserved_in_709_bars() {
        for depth in DEPTHS {
            for mode in [HdrMode::Hlg, HdrMode::Pq, HdrMode::PqFullRange] {
                let p = hdr(mode, depth);
                assert_eq!(p.bars709[0], p.bars75[0]);
                assert!(p.ramp_low() < p.ramp_high());
            }
        }
    }

    #[test]
    fn test_blanking_level() {
        assert_eq!(blanking(BitDepth::Ten), [64, 512, 512]);
        assert_eq!(blanking(BitDepth::Twelve), [256, 2048, 2048]);
    }
}
