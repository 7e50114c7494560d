use criterion::{Criterion, criterion_group, criterion_main};

use nv21_bridge::{
    ColorConverter, ColorInfo, Image, PixelFormat, ScalarConverter, convert_with,
};
use std::hint::black_box;

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;

fn do_convert(converter: &dyn ColorConverter, src: &Image<Vec<u8>>, dst: &mut Image<Vec<u8>>) {
    convert_with(converter, black_box(src), black_box(dst)).unwrap();
}

#[cfg(feature = "multi-thread")]
fn do_convert_multi_thread(
    converter: &dyn ColorConverter,
    src: &Image<Vec<u8>>,
    dst: &mut Image<Vec<u8>>,
) {
    use nv21_bridge::convert_multi_thread_with;

    convert_multi_thread_with(converter, black_box(src), black_box(dst)).unwrap();
}

type ConvertFunction = fn(&dyn ColorConverter, &Image<Vec<u8>>, &mut Image<Vec<u8>>);

fn converters() -> Vec<&'static dyn ColorConverter> {
    #[allow(unused_mut)]
    let mut converters: Vec<&'static dyn ColorConverter> = vec![&ScalarConverter];

    #[cfg(feature = "simd")]
    converters.push(&nv21_bridge::SimdConverter);

    converters
}

fn run_benchmarks(c: &mut Criterion, do_convert: ConvertFunction, s: &str) {
    use PixelFormat::*;

    let rgba = Image::blank(RGBA, IMAGE_WIDTH, IMAGE_HEIGHT, ColorInfo::default());
    let bgra = Image::blank(BGRA, IMAGE_WIDTH, IMAGE_HEIGHT, ColorInfo::default());
    let mut nv21 = Image::blank(NV21, IMAGE_WIDTH, IMAGE_HEIGHT, ColorInfo::default());

    for converter in converters() {
        let name = converter.name();

        c.bench_function(&format!("RGBA to NV21 {name} {s}"), |b| {
            b.iter(|| do_convert(converter, &rgba, &mut nv21))
        });

        c.bench_function(&format!("BGRA to NV21 {name} {s}"), |b| {
            b.iter(|| do_convert(converter, &bgra, &mut nv21))
        });
    }
}

fn single_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert, "single threaded")
}

#[cfg(feature = "multi-thread")]
fn multi_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert_multi_thread, "multi threaded")
}

#[cfg(feature = "multi-thread")]
criterion_group!(img, single_threaded, multi_threaded);

#[cfg(not(feature = "multi-thread"))]
criterion_group!(img, single_threaded);

criterion_main!(img);
