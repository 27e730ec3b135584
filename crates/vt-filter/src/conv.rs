use vt_core::{BorderMode, Image, ImageView, fetch};

/// Correlates `signal` with a centered odd-length `kernel`.
///
/// `out[i] = sum_k kernel[k] * signal[i + k - radius]`, with samples outside
/// the signal supplied by `border`. For the symmetric kernels used here this
/// equals convolution.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    for (i, out_i) in out.iter_mut().enumerate() {
        if i >= interior_start && i < interior_end {
            let window = &signal[i - radius..=i + radius];
            *out_i = window.iter().zip(kernel).map(|(&s, &k)| s * k).sum();
        } else {
            *out_i = convolve_at_border(signal, kernel, radius, border, i);
        }
    }
}

#[inline]
fn convolve_at_border(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    i: usize,
) -> f32 {
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + k as isize - radius as isize;
        acc += fetch(signal, idx, border) * kv;
    }
    acc
}

/// Applies `kx` along rows and then `ky` along columns.
///
/// Both kernels must have odd length.
pub fn separable_f32(
    src: &ImageView<'_, f32>,
    kx: &[f32],
    ky: &[f32],
    border: &BorderMode<f32>,
) -> Image<f32> {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return Image::new_fill(w, h, 0.0);
    }

    let rx = kx.len() / 2;
    let ry = ky.len() / 2;

    let mut tmp = vec![0.0f32; w * h];
    for (y, row) in src.rows().enumerate() {
        convolve_f32(row, kx, rx, border, &mut tmp[y * w..(y + 1) * w]);
    }

    let mut out = vec![0.0f32; w * h];
    let mut column = vec![0.0f32; h];
    let mut column_out = vec![0.0f32; h];
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = tmp[y * w + x];
        }
        convolve_f32(&column, ky, ry, border, &mut column_out);
        for (y, &v) in column_out.iter().enumerate() {
            out[y * w + x] = v;
        }
    }

    Image::from_vec(w, h, out).expect("separable output sized width*height")
}

/// Rounds to the nearest integer and saturates to `[0, 255]`.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
