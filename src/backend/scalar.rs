use super::ColorConverter;
use crate::formats::{Nv21Writer, RgbaReader};
use crate::{ConvertError, ImageMut, ImageRef, PixelFormat, verify_input};

/// Portable reference converter
///
/// Uses 8 bit fixed point BT.601/BT.709 coefficients and a truncating 2x2 box average
/// for the chroma plane. Slower than [`SimdConverter`](super::SimdConverter) but fully
/// deterministic across targets, which makes it the baseline for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarConverter;

impl ColorConverter for ScalarConverter {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn rgba_to_nv21(&self, src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), ConvertError> {
        verify_input(src, &*dst)?;

        match src.format() {
            PixelFormat::RGBA => Nv21Writer::write(dst, RgbaReader::<false>::new(src)?),
            PixelFormat::BGRA => Nv21Writer::write(dst, RgbaReader::<true>::new(src)?),
            PixelFormat::NV21 => Err(ConvertError::UnsupportedConversion {
                src: src.format(),
                dst: dst.format(),
            }),
        }
    }
}
