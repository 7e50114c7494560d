use crate::{ConvertError, ImageMut, ImageRef};

mod scalar;
#[cfg(feature = "simd")]
mod simd;

pub use scalar::ScalarConverter;
#[cfg(feature = "simd")]
pub use simd::SimdConverter;

/// An RGBA to NV21 conversion routine
///
/// Implementations are stateless and may be called from multiple threads at once,
/// as long as every call gets its own destination. Each implementation validates its
/// inputs with [`verify_input`](crate::verify_input) before touching any plane.
pub trait ColorConverter: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Convert `src` (RGBA or BGRA) into `dst` (NV21) using the color info of `dst`
    fn rgba_to_nv21(&self, src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), ConvertError>;
}

/// The converter used by [`convert`](crate::convert)
///
/// [`SimdConverter`] when the `simd` feature is enabled, [`ScalarConverter`] otherwise.
#[cfg(feature = "simd")]
pub fn default_converter() -> &'static dyn ColorConverter {
    &SimdConverter
}

/// The converter used by [`convert`](crate::convert)
#[cfg(not(feature = "simd"))]
pub fn default_converter() -> &'static dyn ColorConverter {
    &ScalarConverter
}
