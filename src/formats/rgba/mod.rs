mod read;

pub(crate) use read::RgbaReader;

/// One source pixel, alpha is dropped on load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RgbPixel {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl RgbPixel {
    /// Build a pixel from the first three loaded bytes, swapping R and B for BGRA memory order
    #[inline(always)]
    pub(crate) fn from_loaded<const REVERSE: bool>(c0: u8, c1: u8, c2: u8) -> Self {
        if REVERSE {
            Self {
                r: c2,
                g: c1,
                b: c0,
            }
        } else {
            Self {
                r: c0,
                g: c1,
                b: c2,
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RgbBlock {
    pub(crate) px00: RgbPixel,
    pub(crate) px01: RgbPixel,
    pub(crate) px10: RgbPixel,
    pub(crate) px11: RgbPixel,
}

impl RgbBlock {
    /// Truncating box average of the four pixels, used for 4:2:0 chroma
    #[inline(always)]
    pub(crate) fn average(&self) -> RgbPixel {
        #[inline(always)]
        fn avg(a: u8, b: u8, c: u8, d: u8) -> u8 {
            ((u16::from(a) + u16::from(b) + u16::from(c) + u16::from(d)) / 4) as u8
        }

        let RgbBlock {
            px00,
            px01,
            px10,
            px11,
        } = self;

        RgbPixel {
            r: avg(px00.r, px01.r, px10.r, px11.r),
            g: avg(px00.g, px01.g, px10.g, px11.g),
            b: avg(px00.b, px01.b, px10.b, px11.b),
        }
    }
}

pub(crate) trait RgbSrc {
    fn read(&mut self, x: usize, y: usize) -> RgbBlock;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_swaps_red_and_blue() {
        assert_eq!(
            RgbPixel::from_loaded::<true>(1, 2, 3),
            RgbPixel { r: 3, g: 2, b: 1 }
        );
        assert_eq!(
            RgbPixel::from_loaded::<false>(1, 2, 3),
            RgbPixel { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn average_truncates() {
        let px = |v| RgbPixel { r: v, g: v, b: v };

        let block = RgbBlock {
            px00: px(255),
            px01: px(255),
            px10: px(255),
            px11: px(254),
        };

        assert_eq!(block.average(), px(254));
    }
}
