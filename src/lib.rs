//! Convert RGBA frames into NV21 (Y plane followed by an interleaved VU plane, 4:2:0).
//!
//! The conversion itself lives behind the [`ColorConverter`] trait: [`SimdConverter`] hands
//! the frame to the SIMD kernels of `yuvutils-rs`, [`ScalarConverter`] is the portable
//! reference. Foreign callers go through the thin adapters in [`ffi`] (C ABI) and, with the
//! `jni` feature, `jvm` (the `NV21Converter.convertRgbaToNv21` native method).
//!
//! ```
//! let (width, height) = (4, 2);
//! let rgba = vec![0u8; width * height * 4];
//! let mut nv21 = vec![0u8; nv21_bridge::PixelFormat::NV21.buffer_size(width, height)];
//!
//! nv21_bridge::convert_rgba_to_nv21(&rgba, width, height, &mut nv21).unwrap();
//!
//! assert!(nv21[..8].iter().all(|&y| y == 16));
//! assert!(nv21[8..].iter().all(|&c| c == 128));
//! ```

use util::{StrictApi, checked_frame_bytes};

pub use backend::{ColorConverter, ScalarConverter, default_converter};
#[cfg(feature = "simd")]
pub use backend::SimdConverter;
pub use color::{ColorInfo, ColorSpace};
pub use image::{BufferKind, Image, ImageError};
pub use image_traits::{ImageMut, ImageRef, ImageRefExt};
#[cfg(feature = "multi-thread")]
pub use multi_thread::{convert_multi_thread, convert_multi_thread_with};
pub use pixel_format::{BoundsCheckError, PixelFormat};
pub use planes::{AnySlice, InvalidNumberOfPlanesError, infer, infer_nv21};

mod backend;
mod color;
pub mod ffi;
mod formats;
mod image;
mod image_traits;
#[cfg(feature = "jni")]
pub mod jvm;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pixel_format;
mod plane_decs;
mod planes;
mod util;

/// Everything that can go wrong when converting a frame
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("width and height must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("4:2:0 sub sampling requires even dimensions, got {width}x{height}")]
    OddDimensions { width: usize, height: usize },

    #[error("image dimensions overflow the addressable size")]
    DimensionsOverflow,

    #[error(
        "source is {src_width}x{src_height} but destination is {dst_width}x{dst_height}"
    )]
    MismatchedDimensions {
        src_width: usize,
        src_height: usize,
        dst_width: usize,
        dst_height: usize,
    },

    #[error("cannot convert {src:?} to {dst:?}")]
    UnsupportedConversion { src: PixelFormat, dst: PixelFormat },

    #[error("{format:?} buffer too small, expected at least {minimum} bytes, but got {got}")]
    BufferTooSmall {
        format: PixelFormat,
        minimum: usize,
        got: usize,
    },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),

    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("conversion backend failed: {0}")]
    Backend(String),
}

/// Check that width and height are usable for a 4:2:0 frame
pub fn verify_dimensions(width: usize, height: usize) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidDimensions { width, height });
    }

    if width % 2 != 0 || height % 2 != 0 {
        return Err(ConvertError::OddDimensions { width, height });
    }

    if checked_frame_bytes(width, height).is_none() {
        return Err(ConvertError::DimensionsOverflow);
    }

    Ok(())
}

/// Verify that the input values are all valid and safe to move on to
pub fn verify_input(
    src: &(impl ImageRef + ?Sized),
    dst: &(impl ImageRef + ?Sized),
) -> Result<(), ConvertError> {
    if !src.format().is_rgb() || dst.format() != PixelFormat::NV21 {
        return Err(ConvertError::UnsupportedConversion {
            src: src.format(),
            dst: dst.format(),
        });
    }

    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(ConvertError::MismatchedDimensions {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    verify_dimensions(dst.width(), dst.height())?;

    src.bounds_check()?;
    dst.bounds_check()?;

    Ok(())
}

/// Convert `src` into `dst` with the [`default_converter`]
pub fn convert(src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), ConvertError> {
    convert_with(default_converter(), src, dst)
}

/// Convert `src` into `dst` with the given converter
pub fn convert_with(
    converter: &dyn ColorConverter,
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
) -> Result<(), ConvertError> {
    log::debug!(
        "converting {}x{} {:?} to {:?} with {}",
        src.width(),
        src.height(),
        src.format(),
        dst.format(),
        converter.name()
    );

    converter.rgba_to_nv21(src, dst)
}

/// Convert a packed RGBA buffer (memory byte order R, G, B, A) into a packed NV21 buffer
///
/// `rgba` must hold at least `width * height * 4` bytes, `nv21` at least
/// [`PixelFormat::NV21.buffer_size(width, height)`](PixelFormat::buffer_size) bytes.
/// Only the first `buffer_size` bytes of `nv21` are written. Uses BT.601 standard range.
pub fn convert_rgba_to_nv21(
    rgba: &[u8],
    width: usize,
    height: usize,
    nv21: &mut [u8],
) -> Result<(), ConvertError> {
    convert_packed(PixelFormat::RGBA, rgba, width, height, nv21)
}

/// Same as [`convert_rgba_to_nv21`] for any packed source format
pub fn convert_packed(
    format: PixelFormat,
    src: &[u8],
    width: usize,
    height: usize,
    nv21: &mut [u8],
) -> Result<(), ConvertError> {
    verify_dimensions(width, height)?;

    if !format.is_rgb() {
        return Err(ConvertError::UnsupportedConversion {
            src: format,
            dst: PixelFormat::NV21,
        });
    }

    let src_size = format.buffer_size(width, height);
    if src.len() < src_size {
        return Err(ConvertError::BufferTooSmall {
            format,
            minimum: src_size,
            got: src.len(),
        });
    }

    let dst_size = PixelFormat::NV21.buffer_size(width, height);
    if nv21.len() < dst_size {
        return Err(ConvertError::BufferTooSmall {
            format: PixelFormat::NV21,
            minimum: dst_size,
            got: nv21.len(),
        });
    }

    let color = ColorInfo::BT601_LIMITED;

    let src = Image::from_buffer(format, &src[..src_size], None, width, height, color)?;
    let mut dst = Image::from_buffer(
        PixelFormat::NV21,
        &mut nv21[..dst_size],
        None,
        width,
        height,
        color,
    )?;

    convert(&src, &mut dst)
}
