//! C ABI entry points
//!
//! The caller owns both buffers. They are only borrowed for the duration of the call and no
//! pointer is retained afterwards.

use crate::{ConvertError, ImageError, PixelFormat, convert_rgba_to_nv21, verify_dimensions};
use std::slice;

/// Conversion succeeded
pub const NV21_OK: i32 = 0;
/// `rgba` or `nv21` was null
pub const NV21_ERR_NULL: i32 = -1;
/// Width or height not positive, odd or too large
pub const NV21_ERR_DIMENSIONS: i32 = -2;
/// One of the buffers is shorter than the dimensions require
pub const NV21_ERR_BUFFER_TOO_SMALL: i32 = -3;
/// Any other conversion failure
pub const NV21_ERR_CONVERT: i32 = -4;

/// Number of bytes an NV21 frame of the given dimensions occupies, 0 if the dimensions are invalid
#[unsafe(no_mangle)]
pub extern "C" fn nv21_buffer_size(width: i32, height: i32) -> usize {
    match dimensions(width, height) {
        Ok((width, height)) => PixelFormat::NV21.buffer_size(width, height),
        Err(_) => 0,
    }
}

/// Convert a packed RGBA frame (memory byte order R, G, B, A) into a packed NV21 frame
///
/// Returns [`NV21_OK`] or one of the `NV21_ERR_*` codes. Nothing is written on error.
///
/// # Safety
///
/// - `rgba` must be valid for reads of `rgba_len` bytes
/// - `nv21` must be valid for writes of `nv21_len` bytes
/// - the two regions must not overlap and must not be mutated by anyone else during the call
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nv21_convert_rgba(
    rgba: *const u8,
    rgba_len: usize,
    width: i32,
    height: i32,
    nv21: *mut u8,
    nv21_len: usize,
) -> i32 {
    log::trace!("nv21_convert_rgba {width}x{height}, rgba {rgba_len} bytes, nv21 {nv21_len} bytes");

    if rgba.is_null() || nv21.is_null() {
        log::error!("nv21_convert_rgba called with a null buffer");
        return NV21_ERR_NULL;
    }

    let result = dimensions(width, height).and_then(|(width, height)| {
        // Safety: upheld by the caller, see the function documentation
        let (rgba, nv21) = unsafe {
            (
                slice::from_raw_parts(rgba, rgba_len),
                slice::from_raw_parts_mut(nv21, nv21_len),
            )
        };

        convert_rgba_to_nv21(rgba, width, height, nv21)
    });

    match result {
        Ok(()) => NV21_OK,
        Err(e) => {
            log::error!("nv21_convert_rgba failed: {e}");
            status_code(&e)
        }
    }
}

fn dimensions(width: i32, height: i32) -> Result<(usize, usize), ConvertError> {
    // Negative values map to 0 so they are reported like any other non positive dimension
    let width = usize::try_from(width).unwrap_or(0);
    let height = usize::try_from(height).unwrap_or(0);

    verify_dimensions(width, height)?;

    Ok((width, height))
}

pub(crate) fn status_code(err: &ConvertError) -> i32 {
    match err {
        ConvertError::InvalidDimensions { .. }
        | ConvertError::OddDimensions { .. }
        | ConvertError::DimensionsOverflow
        | ConvertError::MismatchedDimensions { .. }
        | ConvertError::Image(ImageError::InvalidDimensions | ImageError::DimensionsOverflow) => {
            NV21_ERR_DIMENSIONS
        }
        ConvertError::BufferTooSmall { .. }
        | ConvertError::BoundsCheck(_)
        | ConvertError::Image(ImageError::BoundsCheck(_)) => NV21_ERR_BUFFER_TOO_SMALL,
        ConvertError::UnsupportedConversion { .. }
        | ConvertError::Image(ImageError::InvalidNumberOfStrides { .. })
        | ConvertError::InvalidNumberOfPlanes(_)
        | ConvertError::Backend(_) => NV21_ERR_CONVERT,
    }
}
