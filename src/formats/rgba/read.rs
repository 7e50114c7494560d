use super::{RgbBlock, RgbPixel, RgbSrc};
use crate::planes::read_planes;
use crate::{ConvertError, ImageRef, ImageRefExt};

/// Reads 2x2 blocks out of a single interleaved 4 byte per pixel plane
pub(crate) struct RgbaReader<'a, const REVERSE: bool> {
    rgba: &'a [u8],

    rgba_stride: usize,
}

impl<'a, const REVERSE: bool> RgbaReader<'a, REVERSE> {
    pub(crate) fn new(src: &'a dyn ImageRef) -> Result<Self, ConvertError> {
        src.bounds_check()?;

        let [(rgba, rgba_stride)] = read_planes(src.planes())?;

        Ok(Self { rgba, rgba_stride })
    }

    #[inline(always)]
    fn pixel(&self, offset: usize) -> RgbPixel {
        let px = &self.rgba[offset..offset + 4];

        RgbPixel::from_loaded::<REVERSE>(px[0], px[1], px[2])
    }
}

impl<const REVERSE: bool> RgbSrc for RgbaReader<'_, REVERSE> {
    #[inline(always)]
    fn read(&mut self, x: usize, y: usize) -> RgbBlock {
        let rgba00offset = y * self.rgba_stride + x * 4;
        let rgba10offset = (y + 1) * self.rgba_stride + x * 4;

        RgbBlock {
            px00: self.pixel(rgba00offset),
            px01: self.pixel(rgba00offset + 4),
            px10: self.pixel(rgba10offset),
            px11: self.pixel(rgba10offset + 4),
        }
    }
}
