use crate::color::RgbToYuv;
use crate::formats::rgba::RgbSrc;
use crate::formats::visit_2x2::{Image2x2Visitor, visit};
use crate::planes::read_planes_mut;
use crate::{ConvertError, ImageMut, ImageRefExt};

/// Writes 2x2 blocks into a Y plane and an interleaved VU plane
pub(crate) struct Nv21Writer<'a, S>
where
    S: RgbSrc,
{
    y: &'a mut [u8],
    vu: &'a mut [u8],

    y_stride: usize,
    vu_stride: usize,

    matrix: &'static RgbToYuv,

    rgb_src: S,
}

impl<'a, S> Nv21Writer<'a, S>
where
    S: RgbSrc,
{
    pub(crate) fn write(dst: &'a mut dyn ImageMut, rgb_src: S) -> Result<(), ConvertError> {
        dst.bounds_check()?;

        let width = dst.width();
        let height = dst.height();

        if width % 2 != 0 || height % 2 != 0 {
            return Err(ConvertError::OddDimensions { width, height });
        }

        let matrix = dst.color().rgb_to_yuv();

        let [(y, y_stride), (vu, vu_stride)] = read_planes_mut(dst.planes_mut())?;

        visit(
            width,
            height,
            Self {
                y,
                vu,
                y_stride,
                vu_stride,
                matrix,
                rgb_src,
            },
        );

        Ok(())
    }
}

impl<S> Image2x2Visitor for Nv21Writer<'_, S>
where
    S: RgbSrc,
{
    #[inline(always)]
    fn visit(&mut self, x: usize, y: usize) {
        let block = self.rgb_src.read(x, y);

        let y00_offset = y * self.y_stride + x;
        let y10_offset = (y + 1) * self.y_stride + x;

        for (offset, px) in [
            (y00_offset, block.px00),
            (y00_offset + 1, block.px01),
            (y10_offset, block.px10),
            (y10_offset + 1, block.px11),
        ] {
            self.y[offset] = self.matrix.luma(px.r, px.g, px.b);
        }

        let avg = block.average();
        let (u, v) = self.matrix.chroma(avg.r, avg.g, avg.b);

        // V comes first in NV21
        let vu_offset = (y / 2) * self.vu_stride + x;

        self.vu[vu_offset] = v;
        self.vu[vu_offset + 1] = u;
    }
}
