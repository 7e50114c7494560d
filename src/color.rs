/// YUV color space (matrix coefficients) used for the RGB to YUV transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// YUV Rec. ITU-R BT.601-7 625
    #[default]
    BT601,

    /// YUV Rec. ITU-R BT.709-6
    BT709,
}

/// Color description of an image
///
/// Only relevant for the NV21 side, RGB images ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorInfo {
    pub space: ColorSpace,

    /// If the image uses either full or standard range
    ///
    /// - full range (0 - 255)
    /// - standard range Y (16 - 235), U & V (16 - 240)
    pub full_range: bool,
}

impl ColorInfo {
    /// BT.601 standard range, what Android camera pipelines expect from NV21
    pub const BT601_LIMITED: Self = Self {
        space: ColorSpace::BT601,
        full_range: false,
    };

    pub(crate) fn rgb_to_yuv(&self) -> &'static RgbToYuv {
        match (self.space, self.full_range) {
            (ColorSpace::BT601, false) => &BT601_LIMITED,
            (ColorSpace::BT601, true) => &BT601_FULL,
            (ColorSpace::BT709, false) => &BT709_LIMITED,
            (ColorSpace::BT709, true) => &BT709_FULL,
        }
    }
}

/// 8 bit fixed point RGB to YUV matrix
///
/// Rows are `[r, g, b]` weights scaled by 256. The U and V rows sum to zero so gray
/// maps to neutral chroma.
#[derive(Debug)]
pub(crate) struct RgbToYuv {
    pub(crate) y: [i32; 3],
    pub(crate) u: [i32; 3],
    pub(crate) v: [i32; 3],
    pub(crate) y_offset: i32,
}

const CHROMA_OFFSET: i32 = 128;

impl RgbToYuv {
    #[inline(always)]
    pub(crate) fn luma(&self, r: u8, g: u8, b: u8) -> u8 {
        clamp(dot(&self.y, r, g, b) + self.y_offset)
    }

    /// Returns `(u, v)`
    #[inline(always)]
    pub(crate) fn chroma(&self, r: u8, g: u8, b: u8) -> (u8, u8) {
        (
            clamp(dot(&self.u, r, g, b) + CHROMA_OFFSET),
            clamp(dot(&self.v, r, g, b) + CHROMA_OFFSET),
        )
    }
}

#[inline(always)]
fn dot(row: &[i32; 3], r: u8, g: u8, b: u8) -> i32 {
    (row[0] * i32::from(r) + row[1] * i32::from(g) + row[2] * i32::from(b) + 128) >> 8
}

#[inline(always)]
fn clamp(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

pub(crate) static BT601_LIMITED: RgbToYuv = RgbToYuv {
    y: [66, 129, 25],
    u: [-38, -74, 112],
    v: [112, -94, -18],
    y_offset: 16,
};

pub(crate) static BT601_FULL: RgbToYuv = RgbToYuv {
    y: [77, 150, 29],
    u: [-43, -85, 128],
    v: [128, -107, -21],
    y_offset: 0,
};

pub(crate) static BT709_LIMITED: RgbToYuv = RgbToYuv {
    y: [47, 157, 16],
    u: [-26, -86, 112],
    v: [112, -102, -10],
    y_offset: 16,
};

pub(crate) static BT709_FULL: RgbToYuv = RgbToYuv {
    y: [54, 183, 19],
    u: [-29, -99, 128],
    v: [128, -116, -12],
    y_offset: 0,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> [&'static RgbToYuv; 4] {
        [&BT601_LIMITED, &BT601_FULL, &BT709_LIMITED, &BT709_FULL]
    }

    #[test]
    fn chroma_rows_sum_to_zero() {
        for m in all() {
            assert_eq!(m.u.iter().sum::<i32>(), 0);
            assert_eq!(m.v.iter().sum::<i32>(), 0);
        }
    }

    #[test]
    fn limited_range_black_and_white() {
        for m in [&BT601_LIMITED, &BT709_LIMITED] {
            assert_eq!(m.luma(0, 0, 0), 16);
            assert_eq!(m.luma(255, 255, 255), 235);
            assert_eq!(m.chroma(255, 255, 255), (128, 128));
        }
    }

    #[test]
    fn full_range_gray_is_identity() {
        for m in [&BT601_FULL, &BT709_FULL] {
            for g in [0u8, 1, 64, 127, 128, 200, 255] {
                assert_eq!(m.luma(g, g, g), g);
                assert_eq!(m.chroma(g, g, g), (128, 128));
            }
        }
    }

    #[test]
    fn bt601_limited_primaries() {
        let m = &BT601_LIMITED;

        assert_eq!(m.luma(255, 0, 0), 82);
        assert_eq!(m.chroma(255, 0, 0), (90, 240));

        assert_eq!(m.luma(0, 255, 0), 144);
        assert_eq!(m.chroma(0, 255, 0), (54, 34));

        assert_eq!(m.luma(0, 0, 255), 41);
        assert_eq!(m.chroma(0, 0, 255), (240, 110));
    }

    #[test]
    fn default_is_bt601_limited() {
        assert_eq!(ColorInfo::default(), ColorInfo::BT601_LIMITED);
    }
}
