/// Overflow checked arithmetic which panics instead of wrapping
///
/// Stand-in for the unstable `strict_*` integer methods.
pub(crate) trait StrictApi: Sized {
    fn strict_add_(self, rhs: Self) -> Self;
    fn strict_sub_(self, rhs: Self) -> Self;
    fn strict_mul_(self, rhs: Self) -> Self;
}

impl StrictApi for usize {
    #[track_caller]
    fn strict_add_(self, rhs: Self) -> Self {
        self.checked_add(rhs).expect("attempt to add with overflow")
    }

    #[track_caller]
    fn strict_sub_(self, rhs: Self) -> Self {
        self.checked_sub(rhs)
            .expect("attempt to subtract with overflow")
    }

    #[track_caller]
    fn strict_mul_(self, rhs: Self) -> Self {
        self.checked_mul(rhs)
            .expect("attempt to multiply with overflow")
    }
}

/// `width * height * 4`, the largest product any plane computation performs
pub(crate) fn checked_frame_bytes(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(4)
}
