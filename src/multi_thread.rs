use crate::planes::{read_planes, read_planes_mut};
use crate::{
    ColorConverter, ConvertError, Image, ImageMut, ImageRef, convert_with, default_converter,
    verify_input,
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Convert with the [`default_converter`](crate::default_converter), splitting the frame into
/// horizontal bands which are converted in parallel
pub fn convert_multi_thread(src: &dyn ImageRef, dst: &mut dyn ImageMut) -> Result<(), ConvertError> {
    convert_multi_thread_with(default_converter(), src, dst)
}

/// [`convert_multi_thread`] with a specific converter
///
/// Every band starts on an even row, so chroma blocks never straddle two bands and the
/// output is identical to a single threaded conversion.
#[inline(never)]
pub fn convert_multi_thread_with(
    converter: &dyn ColorConverter,
    src: &dyn ImageRef,
    dst: &mut dyn ImageMut,
) -> Result<(), ConvertError> {
    verify_input(src, &*dst)?;

    let threads = num_cpus::get();
    let width = dst.width();
    let height = dst.height();

    if threads == 1 || height <= 2 {
        return convert_with(converter, src, dst);
    }

    let band_rows = band_rows(height, threads);

    log::trace!(
        "converting {width}x{height} in bands of {band_rows} rows on {threads} threads with {}",
        converter.name()
    );

    let src_format = src.format();
    let src_color = src.color();
    let dst_format = dst.format();
    let dst_color = dst.color();

    let [(rgba, rgba_stride)] = read_planes(src.planes())?;
    let [(y, y_stride), (vu, vu_stride)] = read_planes_mut(dst.planes_mut())?;

    let bands: Vec<_> = rgba
        .chunks(band_rows * rgba_stride)
        .zip(y.chunks_mut(band_rows * y_stride))
        .zip(vu.chunks_mut(band_rows / 2 * vu_stride))
        .enumerate()
        .take(height.div_ceil(band_rows))
        .map(|(i, ((rgba, y), vu))| (band_rows.min(height - i * band_rows), rgba, y, vu))
        .collect();

    bands
        .into_par_iter()
        .try_for_each(|(rows, rgba, y, vu)| -> Result<(), ConvertError> {
            let src = Image::from_planes(
                src_format,
                vec![rgba],
                Some(vec![rgba_stride]),
                width,
                rows,
                src_color,
            )?;

            let mut dst = Image::from_planes(
                dst_format,
                vec![y, vu],
                Some(vec![y_stride, vu_stride]),
                width,
                rows,
                dst_color,
            )?;

            converter.rgba_to_nv21(&src, &mut dst)
        })
}

/// Rows per band, rounded up to the next even number
fn band_rows(height: usize, threads: usize) -> usize {
    height.div_ceil(threads).next_multiple_of(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_even() {
        assert_eq!(band_rows(1080, 8), 136);
        assert_eq!(band_rows(4, 8), 2);
        assert_eq!(band_rows(6, 4), 2);
        assert_eq!(band_rows(10, 3), 4);
    }
}
