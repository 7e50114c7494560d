use crate::{BoundsCheckError, ColorInfo, PixelFormat};

/// Read access to a frame, the source side of every conversion
///
/// # Safety
///
/// Values returned must always be the same every call. Converters index the planes
/// after a single bounds check, a frame that changes its planes or dimensions
/// between calls makes that check meaningless.
pub unsafe trait ImageRef {
    /// Layout of the planes, RGBA/BGRA for sources and NV21 for destinations
    fn format(&self) -> PixelFormat;

    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Every plane with its stride in bytes, in the order of the format
    ///
    /// NV21 yields the Y plane first, then the interleaved VU plane.
    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_>;

    /// Matrix and range the YUV samples are (or will be) encoded with
    fn color(&self) -> ColorInfo;
}

/// Write access to a frame, the destination side of every conversion
///
/// # Safety
///
/// Same as [`ImageRef`], `planes_mut` must yield the same planes as `planes`.
pub unsafe trait ImageMut: ImageRef {
    /// Mutable counterpart of [`ImageRef::planes`]
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_>;
}

/// Checks shared by every [`ImageRef`]
pub trait ImageRefExt: ImageRef {
    /// Verify that strides and plane lengths cover `width`x`height` of the format
    ///
    /// Runs before any converter touches a plane.
    fn bounds_check(&self) -> Result<(), BoundsCheckError> {
        self.format()
            .bounds_check(self.planes(), self.width(), self.height())
    }
}

impl<T: ImageRef + ?Sized> ImageRefExt for T {}

unsafe impl<T: ImageRef> ImageRef for &T {
    fn format(&self) -> PixelFormat {
        <T as ImageRef>::format(self)
    }

    fn width(&self) -> usize {
        <T as ImageRef>::width(self)
    }

    fn height(&self) -> usize {
        <T as ImageRef>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        <T as ImageRef>::planes(self)
    }

    fn color(&self) -> ColorInfo {
        <T as ImageRef>::color(self)
    }
}

unsafe impl<T: ImageRef> ImageRef for &mut T {
    fn format(&self) -> PixelFormat {
        <T as ImageRef>::format(self)
    }

    fn width(&self) -> usize {
        <T as ImageRef>::width(self)
    }

    fn height(&self) -> usize {
        <T as ImageRef>::height(self)
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        <T as ImageRef>::planes(self)
    }

    fn color(&self) -> ColorInfo {
        <T as ImageRef>::color(self)
    }
}

unsafe impl<T: ImageMut> ImageMut for &mut T {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        <T as ImageMut>::planes_mut(self)
    }
}
