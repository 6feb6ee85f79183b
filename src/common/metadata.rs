use std::fmt::{Display, Error, Formatter};
use std::ops::{Deref, Not};

use crate::common::codec::Mode;
use crate::common::error::{QRError, QRResult};
use crate::common::mask::MaskPattern;

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(pub(crate) usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        if matches!(version, 1..=40) {
            Ok(Self(version))
        } else {
            Err(QRError::InvalidVersion)
        }
    }

    pub const fn width(self) -> usize {
        debug_assert!(matches!(self.0, 1..=40), "Invalid version");
        self.0 * 4 + 17
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        debug_assert!(matches!(self.0, 1..=40), "Invalid version");
        let band = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
            Mode::Eci => [0, 0, 0][band],
            Mode::Kanji => [8, 10, 12][band],
        }
    }

    // Count of modules available to the encoding region, i.e. everything the
    // function patterns, format info and version info don't claim. Version 1
    // has no alignment patterns, hence the fixed value.
    pub fn total_modules(self) -> usize {
        debug_assert!(matches!(self.0, 1..=40), "Invalid version");
        let v = self.0;
        if v == 1 {
            return 208;
        }
        let width = self.width();
        let align = v / 7 + 2;
        width * width
            - 192
            - (align * align - 3) * 25
            - 2 * (4 * v + 1)
            + (align - 2) * 10
            - 31
            - if v >= 7 { 36 } else { 0 }
    }

    pub fn total_codewords(self) -> usize {
        self.total_modules() >> 3
    }

    // Modules left over once whole codewords are placed; always light.
    pub fn remainder_bits(self) -> usize {
        self.total_modules() - (self.total_codewords() << 3)
    }

    pub fn ecc_per_block(self, ec_level: ECLevel) -> usize {
        EC_CODEWORDS_PER_BLOCK[ec_level as usize][self.0] as usize
    }

    pub fn ec_block_count(self, ec_level: ECLevel) -> usize {
        EC_BLOCKS[ec_level as usize][self.0] as usize
    }

    pub fn data_codewords(self, ec_level: ECLevel) -> usize {
        self.total_codewords() - self.ec_block_count(ec_level) * self.ecc_per_block(ec_level)
    }

    pub fn data_bit_capacity(self, ec_level: ECLevel) -> usize {
        self.data_codewords(ec_level) << 3
    }

    // Short/long block geometry as (short size, short count, long size, long
    // count), short blocks first. Data codewords only, the ecc tail excluded.
    pub fn data_codewords_per_block(self, ec_level: ECLevel) -> (usize, usize, usize, usize) {
        let total = self.total_codewords();
        let block_count = self.ec_block_count(ec_level);
        let ec_len = self.ecc_per_block(ec_level);
        let short_len = total / block_count;
        let long_count = total % block_count;
        (short_len - ec_len, block_count - long_count, short_len - ec_len + 1, long_count)
    }

    // How many characters of the given mode fit at this version and level.
    pub fn char_capacity(self, mode: Mode, ec_level: ECLevel) -> usize {
        let bits = self.data_bit_capacity(ec_level) - self.char_cnt_bits(mode) - self.mode_bits();
        match mode {
            Mode::Numeric => {
                (bits / 10) * 3
                    + match bits % 10 {
                        r if r > 6 => 2,
                        r if r > 3 => 1,
                        _ => 0,
                    }
            }
            Mode::Alphanumeric => (bits / 11) * 2 + if bits % 11 > 5 { 1 } else { 0 },
            Mode::Byte => bits >> 3,
            Mode::Eci | Mode::Kanji => unreachable!("Mode is never selected"),
        }
    }

    // Alignment pattern track positions, row and column alike. The spacing
    // walks back from the far edge in even steps; the residual slack lands in
    // the gap after the first track.
    pub fn alignment_pattern(self) -> Vec<i16> {
        debug_assert!(matches!(self.0, 1..=40), "Invalid version");
        let v = self.0;
        if v == 1 {
            return vec![];
        }
        let intervals = v / 7 + 1;
        let distance = 4 * v + 4;
        let step = distance.div_ceil(intervals * 2) * 2;
        let mut tracks = Vec::with_capacity(intervals + 1);
        tracks.push(6);
        for i in 0..intervals {
            tracks.push((distance + 6 - (intervals - 1 - i) * step) as i16);
        }
        tracks
    }

    // 18-bit version info: the version in the high 6 bits, a (18, 6) Golay
    // remainder over generator 0x1F25 in the low 12.
    pub fn info(self) -> u32 {
        debug_assert!(matches!(self.0, 7..=40), "No version info below version 7");
        let version = self.0 as u32;
        let mut rem = version;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
        }
        version << 12 | rem
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // The 2-bit code carried in the format info field; not the enum order.
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 1,
            Self::M => 0,
            Self::Q => 3,
            Self::H => 2,
        }
    }
}

impl TryFrom<u8> for ECLevel {
    type Error = QRError;
    fn try_from(value: u8) -> QRResult<Self> {
        match value {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Format information
//------------------------------------------------------------------------------

// 15-bit format info: level bits and mask pattern in the high 5 bits, a
// BCH(15, 5) remainder over generator 0x537 in the low 10, the whole field
// xored with 0x5412 so an all-zero field cannot occur.
pub fn generate_format_info(ec_level: ECLevel, mask_pattern: MaskPattern) -> u32 {
    let data = ec_level.format_bits() << 3 | *mask_pattern as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    (data << 10 | rem) ^ FORMAT_INFO_MASK
}

// Metadata
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mode: Mode,
    pub mask_pattern: Option<MaskPattern>,
}

impl Metadata {
    pub fn new(
        version: Version,
        ec_level: ECLevel,
        mode: Mode,
        mask_pattern: Option<MaskPattern>,
    ) -> Self {
        Self { version, ec_level, mode, mask_pattern }
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self.mask_pattern {
            Some(m) => write!(
                f,
                "{{ Version: {}, Ec level: {:?}, Mode: {:?}, Mask: {} }}",
                *self.version, self.ec_level, self.mode, *m
            ),
            None => write!(
                f,
                "{{ Version: {}, Ec level: {:?}, Mode: {:?}, Mask: None }}",
                *self.version, self.ec_level, self.mode
            ),
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_INFO_MASK: u32 = 0x5412;

// Format info placement, most significant bit first. Main copy hugs the
// top-left finder; the side copy splits between the top-right and bottom-left
// finders. Negative coordinates wrap from the far edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

// Version info placement, most significant bit first: a 3x6 block above the
// bottom-left finder and its transpose beside the top-right finder.
pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

// Error correction codewords per block, indexed [level][version]. Version
// index 0 is a -1 placeholder so versions index directly.
pub(crate) static EC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Version:
    //    1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Low
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // Medium
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Quartile
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // High
];

// Number of error correction blocks, indexed [level][version], same
// placeholder convention.
pub(crate) static EC_BLOCKS: [[i8; 41]; 4] = [
    // Version:
    //   1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2,  4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // Low
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5,  5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // Medium
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8,  8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Quartile
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8,  8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // High
];


#[cfg(test)]
mod format_info_tests {
    use super::{generate_format_info, ECLevel};
    use crate::common::mask::MaskPattern;

    // Published 15-bit format info fields, indexed by the 5-bit data field.
    static FORMAT_INFOS: [u32; 32] = [
        0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa,
        0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255,
        0x0d0c, 0x083b, 0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
    ];

    #[test]
    fn test_generate_format_info() {
        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for m in 0..8 {
                let data = ecl.format_bits() << 3 | m as u32;
                let info = generate_format_info(ecl, MaskPattern::new(m));
                assert_eq!(info, FORMAT_INFOS[data as usize], "{ecl:?} mask {m}");
            }
        }
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(ECLevel::L.format_bits(), 1);
        assert_eq!(ECLevel::M.format_bits(), 0);
        assert_eq!(ECLevel::Q.format_bits(), 3);
        assert_eq!(ECLevel::H.format_bits(), 2);
    }

    #[test]
    fn test_ec_level_try_from() {
        assert_eq!(ECLevel::try_from(0), Ok(ECLevel::L));
        assert_eq!(ECLevel::try_from(3), Ok(ECLevel::H));
        assert!(ECLevel::try_from(4).is_err());
    }
}
