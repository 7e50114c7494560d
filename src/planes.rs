use crate::{
    PixelFormat, StrictApi as _,
    plane_decs::{NV21_PLANES, PlaneDesc},
};
use std::mem::MaybeUninit;

#[derive(Debug, thiserror::Error)]
#[error("got invalid number of planes, expected {expected} but only got {got}")]
pub struct InvalidNumberOfPlanesError {
    pub expected: usize,
    pub got: usize,
}

pub(crate) fn read_planes<'a, const N: usize>(
    mut iter: impl Iterator<Item = (&'a [u8], usize)>,
) -> Result<[(&'a [u8], usize); N], InvalidNumberOfPlanesError> {
    let mut out: [(&'a [u8], usize); N] = [(&[], 0); N];

    for (i, out) in out.iter_mut().enumerate() {
        *out = iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?;
    }

    Ok(out)
}

pub(crate) fn read_planes_mut<'a, const N: usize>(
    mut iter: impl Iterator<Item = (&'a mut [u8], usize)>,
) -> Result<[(&'a mut [u8], usize); N], InvalidNumberOfPlanesError> {
    let mut out: [MaybeUninit<(&'a mut [u8], usize)>; N] = [const { MaybeUninit::uninit() }; N];

    for (i, out) in out.iter_mut().enumerate() {
        out.write(iter.next().ok_or(InvalidNumberOfPlanesError {
            expected: N,
            got: i,
        })?);
    }

    // Safety: every element was written above, the loop returns early otherwise
    Ok(out.map(|plane| unsafe { plane.assume_init() }))
}

/// Infer the planes for an image in the given format using the given dimensions and strides
///
/// A buffer that is too small yields truncated planes, which the bounds check of [`PixelFormat`] rejects.
pub fn infer<S: AnySlice>(
    format: PixelFormat,
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> Vec<S> {
    match format {
        PixelFormat::RGBA | PixelFormat::BGRA => vec![buf],
        PixelFormat::NV21 => infer_nv21(buf, width, height, strides).into(),
    }
}

#[deny(clippy::arithmetic_side_effects)]
fn infer_impl<const N: usize, S: AnySlice>(
    plane_decs: [PlaneDesc; N],
    mut buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> [S; N] {
    // Infer default strides for a packed buffer
    let strides: [usize; N] = match strides.and_then(|s| <[usize; N]>::try_from(s).ok()) {
        Some(strides) => strides,
        None => plane_decs.map(|desc| desc.checked_packed_stride(width).unwrap_or(usize::MAX)),
    };

    let mut out: [MaybeUninit<S>; N] = [const { MaybeUninit::uninit() }; N];

    for (i, ((desc, stride), out)) in plane_decs
        .into_iter()
        .zip(strides)
        .zip(out.iter_mut())
        .enumerate()
    {
        // The last plane keeps whatever trails it
        if i.strict_add_(1) == N {
            out.write(core::mem::take(&mut buf));
            break;
        }

        // Saturate, the bounds check reports strides that don't fit
        let split_at = desc.rows(height).saturating_mul(stride).min(buf.slice_len());

        let (prev, rem) = buf.slice_split_at(split_at);

        out.write(prev);
        buf = rem;
    }

    // Safety: every element was written in the loop above
    out.map(|p| unsafe { p.assume_init() })
}

/// Infer the Y and VU planes for a full NV21 image using the given dimensions
pub fn infer_nv21<S: AnySlice>(
    buf: S,
    width: usize,
    height: usize,
    strides: Option<&[usize]>,
) -> [S; 2] {
    infer_impl(NV21_PLANES, buf, width, height, strides)
}

/// Helper trait implemented on &[T] and &mut [T]
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[T] and &mut [T].\n\
               When using or Vec<T> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
}

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for &[T] {}
    impl<T> Sealed for &mut [T] {}
}

impl<T> AnySlice for &[T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }
}

impl<T> AnySlice for &mut [T] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }
}
