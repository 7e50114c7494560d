use crate::StrictApi as _;

/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Not used by the conversion itself, only utility functions.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,

    /// Bytes per sample, 4 for a packed RGBA pixel, 2 for a VU pair
    pub(crate) bytes_per_sample: usize,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width).strict_mul_(self.bytes_per_sample)
    }

    pub(crate) fn checked_packed_stride(&self, width: usize) -> Option<usize> {
        self.width_op.op(width).checked_mul(self.bytes_per_sample)
    }

    pub(crate) fn rows(&self, height: usize) -> usize {
        self.height_op.op(height)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    /// Round up, a half sized chroma plane still covers the last odd row/column
    DivCeil(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::DivCeil(rhs) => lhs.div_ceil(rhs),
            Op::Identity => lhs,
        }
    }
}

pub(crate) const NV21_PLANES: [PlaneDesc; 2] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::DivCeil(2),
        height_op: Op::DivCeil(2),
        bytes_per_sample: 2,
    },
];

pub(crate) const RGBA_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
    bytes_per_sample: 4,
}];
