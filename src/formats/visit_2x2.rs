pub(crate) trait Image2x2Visitor {
    /// Visit the 2x2 block whose top left pixel is at `x`, `y`
    fn visit(&mut self, x: usize, y: usize);
}

/// Walk the image in 2x2 blocks, two rows at a time
///
/// Width and height must be even, the caller checks this before building the visitor.
#[inline(never)]
pub(crate) fn visit<R>(width: usize, height: usize, mut visitor: R)
where
    R: Image2x2Visitor,
{
    debug_assert_eq!(width % 2, 0);
    debug_assert_eq!(height % 2, 0);

    for y in (0..height).step_by(2) {
        for x in (0..width).step_by(2) {
            visitor.visit(x, y);
        }
    }
}
