use crate::{
    BoundsCheckError, ColorInfo, ImageMut, ImageRef, ImageRefExt, PixelFormat, checked_frame_bytes,
    infer,
};

/// Basic wrapper around any image, implementing the [`ImageRef`] and [`ImageMut`] trait
#[derive(Debug, Clone)]
pub struct Image<S> {
    format: PixelFormat,
    buffer: BufferKind<S>,
    strides: Vec<usize>,
    width: usize,
    height: usize,

    color: ColorInfo,
}

#[derive(Debug, Clone)]
pub enum BufferKind<S> {
    Whole(S),
    Split(Vec<S>),
}

/// Everything that can go wrong when constructing an [`Image`]
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("image dimensions overflow the addressable size")]
    DimensionsOverflow,

    #[error("expected {expected} strides, got {got}")]
    InvalidNumberOfStrides { expected: usize, got: usize },

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

impl Image<Vec<u8>> {
    /// Allocate a zeroed image with packed strides
    ///
    /// # Panics
    ///
    /// If the buffer size of `format` at `width`x`height` overflows `usize`.
    pub fn blank(format: PixelFormat, width: usize, height: usize, color: ColorInfo) -> Self {
        Self {
            format,
            buffer: BufferKind::Whole(vec![0u8; format.buffer_size(width, height)]),
            strides: format.packed_strides(width),
            width,
            height,
            color,
        }
    }
}

impl<S> Image<S>
where
    Image<S>: ImageRef,
{
    pub fn from_buffer(
        format: PixelFormat,
        buffer: S,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, ImageError> {
        Self::new(
            format,
            BufferKind::Whole(buffer),
            strides,
            width,
            height,
            color,
        )
    }

    pub fn from_planes(
        format: PixelFormat,
        planes: Vec<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, ImageError> {
        Self::new(
            format,
            BufferKind::Split(planes),
            strides,
            width,
            height,
            color,
        )
    }

    fn new(
        format: PixelFormat,
        buffer: BufferKind<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions);
        }

        // Bounds every packed stride and plane size computed below
        if checked_frame_bytes(width, height).is_none() {
            return Err(ImageError::DimensionsOverflow);
        }

        let strides = strides.unwrap_or_else(|| format.packed_strides(width));

        let expected = format.plane_desc().len();
        if strides.len() != expected {
            return Err(ImageError::InvalidNumberOfStrides {
                expected,
                got: strides.len(),
            });
        }

        let this = Self {
            format,
            buffer,
            strides,
            width,
            height,
            color,
        };

        this.bounds_check()?;

        Ok(this)
    }
}

impl<S> Image<S> {
    pub fn buffer(&self) -> &BufferKind<S> {
        &self.buffer
    }

    pub fn into_buffer(self) -> BufferKind<S> {
        self.buffer
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }
}

unsafe impl<S: AsRef<[u8]>> ImageRef for Image<S> {
    fn format(&self) -> PixelFormat {
        self.format
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        match &self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_ref(),
                    self.width,
                    self.height,
                    Some(&self.strides),
                )
                .into_iter()
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter()
                    .map(|p| p.as_ref())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
    fn color(&self) -> ColorInfo {
        self.color
    }
}

unsafe impl<S: AsRef<[u8]> + AsMut<[u8]>> ImageMut for Image<S> {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        match &mut self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_mut(),
                    self.width,
                    self.height,
                    Some(&self.strides),
                )
                .into_iter()
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter_mut()
                    .map(|plane| plane.as_mut())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_nv21_has_packed_layout() {
        let image = Image::blank(PixelFormat::NV21, 4, 2, ColorInfo::default());

        assert_eq!(image.strides(), &[4, 4]);

        let sizes: Vec<usize> = image.planes().map(|(p, _)| p.len()).collect();
        assert_eq!(sizes, vec![8, 4]);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let buf = [0u8; 16];

        let err = Image::from_buffer(PixelFormat::RGBA, &buf[..], None, 0, 2, ColorInfo::default())
            .unwrap_err();

        assert!(matches!(err, ImageError::InvalidDimensions));
    }

    #[test]
    fn short_buffer_fails_bounds_check() {
        let buf = [0u8; 15];

        let err = Image::from_buffer(PixelFormat::RGBA, &buf[..], None, 2, 2, ColorInfo::default())
            .unwrap_err();

        assert!(matches!(
            err,
            ImageError::BoundsCheck(BoundsCheckError::InvalidPlaneSize { .. })
        ));
    }

    #[test]
    fn wrong_number_of_strides() {
        let buf = [0u8; 6];

        let err = Image::from_buffer(
            PixelFormat::NV21,
            &buf[..],
            Some(vec![2]),
            2,
            2,
            ColorInfo::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ImageError::InvalidNumberOfStrides {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let buf = [0u8; 16];

        let err = Image::from_buffer(
            PixelFormat::RGBA,
            &buf[..],
            None,
            usize::MAX / 2,
            2,
            ColorInfo::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ImageError::DimensionsOverflow));
    }

    #[test]
    fn overflowing_stride_is_rejected() {
        let buf = [0u8; 16];

        let err = Image::from_buffer(
            PixelFormat::RGBA,
            &buf[..],
            Some(vec![usize::MAX]),
            2,
            2,
            ColorInfo::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ImageError::BoundsCheck(BoundsCheckError::InvalidPlaneSize {
                minimum: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    fn overflowing_luma_stride_is_rejected() {
        let buf = [0u8; 6];

        let err = Image::from_buffer(
            PixelFormat::NV21,
            &buf[..],
            Some(vec![usize::MAX, 2]),
            2,
            2,
            ColorInfo::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ImageError::BoundsCheck(BoundsCheckError::InvalidPlaneSize { plane: 0, .. })
        ));
    }

    #[test]
    fn into_buffer_returns_the_backing_buffer() {
        let image = Image::from_buffer(
            PixelFormat::NV21,
            vec![7u8; 6],
            None,
            2,
            2,
            ColorInfo::default(),
        )
        .unwrap();

        let BufferKind::Whole(buf) = image.into_buffer() else {
            panic!("expected a whole buffer");
        };

        assert_eq!(buf, vec![7u8; 6]);
    }

    #[test]
    fn split_planes() {
        let y = vec![0u8; 4];
        let vu = vec![0u8; 2];

        let image = Image::from_planes(
            PixelFormat::NV21,
            vec![y, vu],
            None,
            2,
            2,
            ColorInfo::default(),
        )
        .unwrap();

        assert!(matches!(image.buffer(), BufferKind::Split(planes) if planes.len() == 2));
    }
}
