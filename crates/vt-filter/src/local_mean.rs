//! Per-pixel neighborhood means over a square `ksize x ksize` window.
//!
//! Both filters return the mean rounded to the nearest integer, so callers
//! comparing against it work in exact integer arithmetic.

use log::debug;
use vt_core::{BorderMode, Image, ImageView, fetch, to_f32};

use crate::conv::{saturate_u8, separable_f32};
use crate::kernel::GaussianKernel1D;

/// Unweighted mean of the window centered on each pixel.
///
/// Sums are computed exactly in `u64`, so any window size fits; halves
/// round up.
pub fn box_mean_u8(src: &ImageView<'_, u8>, ksize: usize, border: &BorderMode<u8>) -> Image<u8> {
    assert!(ksize % 2 == 1, "window size must be odd");

    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return Image::new_fill(w, h, 0);
    }

    debug!("box mean ksize={ksize} border={} on {w}x{h}", border.name());

    let radius = ksize / 2;
    let mut row_sums = vec![0u64; w * h];
    for (y, row) in src.rows().enumerate() {
        sliding_sum(row, radius, border, &mut row_sums[y * w..(y + 1) * w]);
    }

    // A constant border row sums to `ksize` copies of the fill value.
    let sum_border = border.map(|c| u64::from(c) * ksize as u64);
    let area = (ksize as u64) * (ksize as u64);

    let mut out = vec![0u8; w * h];
    let mut column = vec![0u64; h];
    let mut column_sums = vec![0u64; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = row_sums[y * w + x];
        }
        sliding_sum(&column, radius, &sum_border, &mut column_sums);
        for (y, &s) in column_sums.iter().enumerate() {
            out[y * w + x] = ((s + area / 2) / area) as u8;
        }
    }

    Image::from_vec(w, h, out).expect("box mean output sized width*height")
}

/// Gaussian-weighted mean of the window centered on each pixel.
///
/// Weights come from [`GaussianKernel1D::for_window`] applied separably.
pub fn gaussian_mean_u8(
    src: &ImageView<'_, u8>,
    ksize: usize,
    border: &BorderMode<u8>,
) -> Image<u8> {
    assert!(ksize % 2 == 1, "window size must be odd");

    let kernel = GaussianKernel1D::for_window(ksize);
    debug!(
        "gaussian mean ksize={ksize} sigma={} border={} on {}x{}",
        kernel.sigma,
        border.name(),
        src.width(),
        src.height()
    );

    let src_f32 = to_f32(src);
    let smoothed = separable_f32(
        &src_f32.as_view(),
        &kernel.weights,
        &kernel.weights,
        &border.map(f32::from),
    );
    smoothed.map(|&v| saturate_u8(v))
}

fn sliding_sum<T>(line: &[T], radius: usize, border: &BorderMode<T>, out: &mut [u64])
where
    T: Copy + Into<u64>,
{
    debug_assert_eq!(line.len(), out.len());

    let r = radius as isize;
    let at = |i: isize| -> u64 { fetch(line, i, border).into() };

    let mut acc: u64 = (-r..=r).map(at).sum();
    for (i, out_i) in out.iter_mut().enumerate() {
        *out_i = acc;
        let i = i as isize;
        acc += at(i + r + 1);
        acc -= at(i - r);
    }
}
