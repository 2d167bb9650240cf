use criterion::{Criterion, criterion_group, criterion_main};
use sense_image::fir::{FilterType, ResizeAlg};
use sense_image::{Grid, ImageCodec, RgbImage, resize_gray_with, resize_with};
use std::hint::black_box;

const IMAGE_DIM_LO: (usize, usize) = (720, 1280);
const IMAGE_DIM_HI: (usize, usize) = (1080, 1920);

fn gradient((height, width): (usize, usize)) -> RgbImage<f32> {
    RgbImage {
        height,
        width,
        r: Grid::from_fn(height, width, |_, x| (x % 256) as f32),
        g: Grid::from_fn(height, width, |y, _| (y % 256) as f32),
        b: Grid::from_fn(height, width, |y, x| ((x * y) % 256) as f32),
    }
}

fn bench_alg(c: &mut Criterion, name: &str, alg: ResizeAlg) {
    let codec = ImageCodec::new(alg);

    let lo = gradient(IMAGE_DIM_LO);
    let hi = gradient(IMAGE_DIM_HI);
    let mut dst = RgbImage::new();

    c.bench_function(&format!("{name} upscale"), |b| {
        b.iter(|| {
            resize_with(&codec, black_box(&lo), &mut dst, IMAGE_DIM_HI.0, IMAGE_DIM_HI.1).unwrap()
        })
    });

    c.bench_function(&format!("{name} downscale"), |b| {
        b.iter(|| {
            resize_with(&codec, black_box(&hi), &mut dst, IMAGE_DIM_LO.0, IMAGE_DIM_LO.1).unwrap()
        })
    });

    let gray = hi.g.clone();
    let mut gray_dst = Grid::new(0, 0);

    c.bench_function(&format!("{name} grayscale downscale"), |b| {
        b.iter(|| {
            let (height, width) = IMAGE_DIM_LO;
            resize_gray_with(&codec, black_box(&gray), &mut gray_dst, height, width).unwrap()
        })
    });
}

fn resize(c: &mut Criterion) {
    bench_alg(c, "Nearest", ResizeAlg::Nearest);
    bench_alg(c, "Bilinear", ResizeAlg::Convolution(FilterType::Bilinear));
    bench_alg(c, "Lanczos3", ResizeAlg::Convolution(FilterType::Lanczos3));
}

criterion_group!(img, resize);
criterion_main!(img);
