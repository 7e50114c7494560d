use super::ColorConverter;
use crate::planes::{read_planes, read_planes_mut};
use crate::{ColorInfo, ColorSpace, ConvertError, ImageMut, ImageRef, PixelFormat, verify_input};
use yuvutils_rs::{
    BufferStoreMut, YuvBiPlanarImageMut, YuvRange, YuvStandardMatrix, bgra_to_yuv_nv21,
    rgba_to_yuv_nv21,
};

/// Converter backed by the SIMD (SSE/AVX2/NEON) kernels of `yuvutils-rs`
///
/// Chroma may differ from [`ScalarConverter`](super::ScalarConverter) by a rounding step on
/// frames with detail, solid areas convert to the same values within ±1.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimdConverter;

impl ColorConverter for SimdConverter {
    fn name(&self) -> &'static str {
        "yuvutils"
    }

    fn rgba_to_nv21(&self, src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), ConvertError> {
        verify_input(src, &*dst)?;

        let format = src.format();
        let width = to_u32(dst.width())?;
        let height = to_u32(dst.height())?;
        let (range, matrix) = yuv_params(dst.color());

        let [(rgba, rgba_stride)] = read_planes(src.planes())?;
        let [(y, y_stride), (vu, vu_stride)] = read_planes_mut(dst.planes_mut())?;

        let mut image = YuvBiPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(y),
            y_stride: to_u32(y_stride)?,
            uv_plane: BufferStoreMut::Borrowed(vu),
            uv_stride: to_u32(vu_stride)?,
            width,
            height,
        };

        let rgba_stride = to_u32(rgba_stride)?;

        let result = match format {
            PixelFormat::RGBA => rgba_to_yuv_nv21(&mut image, rgba, rgba_stride, range, matrix),
            PixelFormat::BGRA => bgra_to_yuv_nv21(&mut image, rgba, rgba_stride, range, matrix),
            PixelFormat::NV21 => {
                return Err(ConvertError::UnsupportedConversion {
                    src: format,
                    dst: PixelFormat::NV21,
                });
            }
        };

        result.map_err(|e| ConvertError::Backend(e.to_string()))
    }
}

fn yuv_params(color: ColorInfo) -> (YuvRange, YuvStandardMatrix) {
    let range = if color.full_range {
        YuvRange::Full
    } else {
        YuvRange::Limited
    };

    let matrix = match color.space {
        ColorSpace::BT601 => YuvStandardMatrix::Bt601,
        ColorSpace::BT709 => YuvStandardMatrix::Bt709,
    };

    (range, matrix)
}

fn to_u32(v: usize) -> Result<u32, ConvertError> {
    u32::try_from(v).map_err(|_| ConvertError::DimensionsOverflow)
}
