use crate::{InvalidNumberOfPlanesError, StrictApi as _, plane_decs::*, planes::read_planes};

/// Supported pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// Single interleaved plane, memory byte order R, G, B, A
    ///
    /// This is the layout libyuv calls `ABGR` (it names formats by little endian word order).
    RGBA,

    /// Single interleaved plane, memory byte order B, G, R, A
    ///
    /// Matches packed `0xAARRGGBB` integers stored little endian, e.g. Android `Bitmap.getPixels`.
    BGRA,

    /// Y plane followed by an interleaved VU plane, 4:2:0 sub sampling, 8 bits per sample
    NV21,
}

impl PixelFormat {
    /// Calculate the required buffer size given the [`PixelFormat`] self and image dimensions (in pixel width, height).
    ///
    /// # Panics
    ///
    /// If the size overflows `usize`, see [`verify_dimensions`](crate::verify_dimensions).
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        let mut size = 0usize;

        for plane in self.plane_desc() {
            size = size.strict_add_(plane.packed_stride(width).strict_mul_(plane.rows(height)));
        }

        size
    }

    /// Calculate the strides of an image in a packed buffer
    pub fn packed_strides(self, width: usize) -> Vec<usize> {
        self.plane_desc()
            .iter()
            .map(|desc| desc.packed_stride(width))
            .collect()
    }

    /// Check if the given planes+strides are valid for dimensions
    #[deny(clippy::arithmetic_side_effects)]
    pub fn bounds_check<'a>(
        self,
        planes: impl Iterator<Item = (&'a [u8], usize)>,
        width: usize,
        height: usize,
    ) -> Result<(), BoundsCheckError> {
        fn bounds_check<const N: usize>(
            planes: [PlaneDesc; N],
            got: [(&[u8], usize); N],
            width: usize,
            height: usize,
        ) -> Result<(), BoundsCheckError> {
            for (i, (plane, (slice, stride))) in planes.into_iter().zip(got).enumerate() {
                // Ensure stride is not smaller than the width would allow
                let Some(min_stride) = plane.checked_packed_stride(width) else {
                    return Err(BoundsCheckError::InvalidStride {
                        plane: i,
                        minimum: usize::MAX,
                        got: stride,
                    });
                };

                if min_stride > stride {
                    return Err(BoundsCheckError::InvalidStride {
                        plane: i,
                        minimum: min_stride,
                        got: stride,
                    });
                }

                // The last row only needs to be as long as the packed stride
                let rows = plane.rows(height);
                let min_len = match rows {
                    0 => Some(0),
                    rows => stride
                        .checked_mul(rows.strict_sub_(1))
                        .and_then(|len| len.checked_add(min_stride)),
                };

                // A length that doesn't fit in usize can't be satisfied by any slice
                let min_len = min_len.unwrap_or(usize::MAX);

                if min_len > slice.len() {
                    return Err(BoundsCheckError::InvalidPlaneSize {
                        plane: i,
                        minimum: min_len,
                        got: slice.len(),
                    });
                }
            }

            Ok(())
        }

        match self {
            PixelFormat::RGBA | PixelFormat::BGRA => {
                bounds_check(RGBA_PLANES, read_planes(planes)?, width, height)
            }
            PixelFormat::NV21 => bounds_check(NV21_PLANES, read_planes(planes)?, width, height),
        }
    }

    /// If the format stores RGB(A) samples
    pub fn is_rgb(&self) -> bool {
        matches!(self, PixelFormat::RGBA | PixelFormat::BGRA)
    }

    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        match self {
            PixelFormat::RGBA | PixelFormat::BGRA => &RGBA_PLANES,
            PixelFormat::NV21 => &NV21_PLANES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsCheckError {
    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sizes() {
        assert_eq!(PixelFormat::RGBA.buffer_size(2, 2), 16);
        assert_eq!(PixelFormat::BGRA.buffer_size(1920, 1080), 1920 * 1080 * 4);
        assert_eq!(PixelFormat::NV21.buffer_size(2, 2), 6);
        assert_eq!(PixelFormat::NV21.buffer_size(1920, 1080), 1920 * 1080 * 3 / 2);

        // Odd dimensions round the chroma plane up
        assert_eq!(PixelFormat::NV21.buffer_size(3, 3), 9 + 2 * 2 * 2);
    }

    #[test]
    fn packed_strides() {
        assert_eq!(PixelFormat::RGBA.packed_strides(640), vec![2560]);
        assert_eq!(PixelFormat::NV21.packed_strides(640), vec![640, 640]);
    }

    #[test]
    fn bounds_check_rejects_short_vu_plane() {
        let y = [0u8; 16];
        let vu = [0u8; 7];

        let err = PixelFormat::NV21
            .bounds_check([(&y[..], 4), (&vu[..], 4)].into_iter(), 4, 4)
            .unwrap_err();

        assert!(matches!(
            err,
            BoundsCheckError::InvalidPlaneSize {
                plane: 1,
                minimum: 8,
                got: 7
            }
        ));
    }

    #[test]
    fn bounds_check_rejects_small_stride() {
        let rgba = [0u8; 64];

        let err = PixelFormat::RGBA
            .bounds_check([(&rgba[..], 8)].into_iter(), 4, 4)
            .unwrap_err();

        assert!(matches!(
            err,
            BoundsCheckError::InvalidStride {
                plane: 0,
                minimum: 16,
                got: 8
            }
        ));
    }

    #[test]
    fn bounds_check_missing_plane() {
        let y = [0u8; 16];

        let err = PixelFormat::NV21
            .bounds_check([(&y[..], 4)].into_iter(), 4, 4)
            .unwrap_err();

        assert!(matches!(err, BoundsCheckError::InvalidNumberOfPlanes(_)));
    }

    #[test]
    fn bounds_check_rejects_overflowing_stride() {
        let rgba = [0u8; 16];

        let err = PixelFormat::RGBA
            .bounds_check([(&rgba[..], usize::MAX)].into_iter(), 2, 2)
            .unwrap_err();

        assert!(matches!(
            err,
            BoundsCheckError::InvalidPlaneSize {
                plane: 0,
                minimum: usize::MAX,
                got: 16
            }
        ));
    }

    #[test]
    fn bounds_check_rejects_overflowing_width() {
        let rgba = [0u8; 16];

        let err = PixelFormat::RGBA
            .bounds_check([(&rgba[..], 16)].into_iter(), usize::MAX / 2, 2)
            .unwrap_err();

        assert!(matches!(
            err,
            BoundsCheckError::InvalidStride {
                plane: 0,
                minimum: usize::MAX,
                got: 16
            }
        ));
    }

    #[test]
    fn bounds_check_accepts_padded_stride() {
        // Last row doesn't need the padding
        let rgba = [0u8; 24 + 16];

        PixelFormat::RGBA
            .bounds_check([(&rgba[..], 24)].into_iter(), 4, 2)
            .unwrap();
    }
}
