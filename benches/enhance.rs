use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage};
use scanme_qr::enhance_for_scanning;
use scanme_qr::utils::enhance::{adaptive_threshold, equalize_histogram, gaussian_blur_3x3};

fn gradient(width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|i| (i % 256) as u8).collect()
}

fn bench_equalize_640x480(c: &mut Criterion) {
    let gray = gradient(640, 480);
    c.bench_function("equalize_histogram_640x480", |b| {
        b.iter(|| equalize_histogram(black_box(&gray)))
    });
}

fn bench_blur_640x480(c: &mut Criterion) {
    let gray = gradient(640, 480);
    c.bench_function("gaussian_blur_3x3_640x480", |b| {
        b.iter(|| gaussian_blur_3x3(black_box(&gray), black_box(640), black_box(480)))
    });
}

fn bench_adaptive_threshold_640x480(c: &mut Criterion) {
    let gray = gradient(640, 480);
    c.bench_function("adaptive_threshold_640x480", |b| {
        b.iter(|| {
            adaptive_threshold(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(11),
                black_box(2.0),
            )
        })
    });
}

fn bench_full_chain_640x480(c: &mut Criterion) {
    let image = DynamicImage::ImageLuma8(
        GrayImage::from_raw(640, 480, gradient(640, 480)).expect("buffer sized to dimensions"),
    );
    c.bench_function("enhance_for_scanning_640x480", |b| {
        b.iter(|| enhance_for_scanning(black_box(&image)))
    });
}

criterion_group!(
    benches,
    bench_equalize_640x480,
    bench_blur_640x480,
    bench_adaptive_threshold_640x480,
    bench_full_chain_640x480
);
criterion_main!(benches);
