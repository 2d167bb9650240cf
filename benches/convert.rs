use criterion::{Criterion, criterion_group, criterion_main};
use sense_image::{
    Grid, HsvImage, ImageMut, ImageRef, LabImage, RgbImage, XyzImage, YCbCrImage, convert, to_gray,
};
use std::hint::black_box;

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;

fn gradient() -> RgbImage<f32> {
    RgbImage {
        height: IMAGE_HEIGHT,
        width: IMAGE_WIDTH,
        r: Grid::from_fn(IMAGE_HEIGHT, IMAGE_WIDTH, |_, x| (x % 256) as f32),
        g: Grid::from_fn(IMAGE_HEIGHT, IMAGE_WIDTH, |y, _| (y % 256) as f32),
        b: Grid::from_fn(IMAGE_HEIGHT, IMAGE_WIDTH, |y, x| ((x + y) % 256) as f32),
    }
}

fn do_convert<'a, 'b>(src: ImageRef<'a, f32>, dst: ImageMut<'b, f32>) {
    convert(black_box(src), dst);
}

fn conversions(c: &mut Criterion) {
    let mut rgb = gradient();
    let mut xyz = XyzImage::new();
    let mut lab = LabImage::new();
    let mut hsv = HsvImage::new();
    let mut ycbcr = YCbCrImage::new();
    let mut gray = Grid::new(0, 0);

    // Fill every destination once so the benchmarks below don't measure allocations
    convert(&rgb, &mut xyz);
    convert(&rgb, &mut lab);
    convert(&rgb, &mut hsv);
    convert(&rgb, &mut ycbcr);

    c.bench_function("RGB to XYZ", |b| {
        b.iter(|| do_convert((&rgb).into(), (&mut xyz).into()))
    });

    c.bench_function("XYZ to RGB", |b| {
        b.iter(|| do_convert((&xyz).into(), (&mut rgb).into()))
    });

    c.bench_function("RGB to L*a*b*", |b| {
        b.iter(|| do_convert((&rgb).into(), (&mut lab).into()))
    });

    c.bench_function("L*a*b* to RGB", |b| {
        b.iter(|| do_convert((&lab).into(), (&mut rgb).into()))
    });

    c.bench_function("RGB to HSV", |b| {
        b.iter(|| do_convert((&rgb).into(), (&mut hsv).into()))
    });

    c.bench_function("HSV to Y'CbCr", |b| {
        b.iter(|| do_convert((&hsv).into(), (&mut ycbcr).into()))
    });

    c.bench_function("Y'CbCr to grayscale", |b| {
        b.iter(|| to_gray(black_box(&ycbcr), &mut gray))
    });
}

criterion_group!(img, conversions);
criterion_main!(img);
