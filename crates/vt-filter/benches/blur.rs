use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vt_core::{BorderMode, Image};
use vt_filter::{GaussianBlur, box_mean_u8};

fn build_ramp_u8(width: usize, height: usize) -> Image<u8> {
    Image::from_fn(width, height, |x, y| ((x + 3 * y) % 251) as u8)
}

fn bench_gaussian_blur(c: &mut Criterion) {
    let img = build_ramp_u8(1280, 1024);
    let view = img.as_view();
    let blur = GaussianBlur::new(2.0).expect("valid sigma");

    c.bench_function("gaussian_blur_sigma2_1280x1024", |b| {
        b.iter(|| {
            let out = blur.apply(black_box(&view));
            black_box(out);
        });
    });
}

fn bench_box_mean(c: &mut Criterion) {
    let img = build_ramp_u8(1280, 1024);
    let view = img.as_view();

    c.bench_function("box_mean_51_1280x1024", |b| {
        b.iter(|| {
            let out = box_mean_u8(black_box(&view), 51, &BorderMode::Reflect101);
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_gaussian_blur, bench_box_mean);
criterion_main!(benches);
