//! Deterministic synthetic test images.

use vt_core::Image;

/// High-contrast checkerboard; the top-left cell holds `lo`.
pub fn checkerboard(width: usize, height: usize, cell: usize, lo: u8, hi: u8) -> Image<u8> {
    assert!(cell > 0, "cell size must be positive");

    Image::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) & 1 == 0 { lo } else { hi }
    })
}

/// Bright domed disks on a dark, slowly varying background.
///
/// Twelve disks on a 4x3 grid with a slight deterministic jitter. The
/// background stays below 80 and disk interiors above 140.
pub fn coins(width: usize, height: usize) -> Image<u8> {
    const COLS: usize = 4;
    const ROWS: usize = 3;

    let cell_w = width as f32 / COLS as f32;
    let cell_h = height as f32 / ROWS as f32;
    let radius = 0.32 * cell_w.min(cell_h);

    let mut centers = Vec::with_capacity(COLS * ROWS);
    for j in 0..ROWS {
        for i in 0..COLS {
            let jitter_x = ((i * 7 + j * 3) % 5) as f32 - 2.0;
            let jitter_y = ((i * 3 + j * 5) % 5) as f32 - 2.0;
            centers.push((
                cell_w * (i as f32 + 0.5) + jitter_x * radius * 0.1,
                cell_h * (j as f32 + 0.5) + jitter_y * radius * 0.1,
            ));
        }
    }

    Image::from_fn(width, height, |x, y| {
        let background = 35.0 + 25.0 * y as f32 / height as f32 + 10.0 * x as f32 / width as f32;

        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let d = centers
            .iter()
            .map(|&(cx, cy)| ((px - cx).powi(2) + (py - cy).powi(2)).sqrt())
            .fold(f32::INFINITY, f32::min);

        let rel = (d / radius).min(1.0);
        let coin = 150.0 + 70.0 * (1.0 - rel * rel).sqrt();
        // Linear ramp across the last pixel of the rim.
        let cover = (radius + 0.5 - d).clamp(0.0, 1.0);
        let texture = ((x * 13 + y * 7) % 5) as f32 - 2.0;

        (background + cover * (coin - background) + texture)
            .round()
            .clamp(0.0, 255.0) as u8
    })
}

/// Rows of dark strokes under a left-to-right illumination gradient.
///
/// The background ramps from 70 to 220. Strokes are two pixels tall, every
/// sixteenth row pair starting at row 7, broken into words, and darken the
/// local background to 45%. No fixed cutoff separates strokes from paper
/// across the whole page.
pub fn uneven_page(width: usize, height: usize) -> Image<u8> {
    let span = width.saturating_sub(1).max(1);
    Image::from_fn(width, height, |x, y| {
        let background = 70 + 150 * x / span;
        let v = if is_page_stroke(width, x, y) {
            background * 9 / 20
        } else {
            background
        };
        v as u8
    })
}

/// Whether [`uneven_page`] darkens `(x, y)` on a page `width` pixels wide.
pub fn is_page_stroke(width: usize, x: usize, y: usize) -> bool {
    const MARGIN: usize = 4;

    matches!(y % 16, 7 | 8) && (x / 8) % 5 != 4 && x >= MARGIN && x + MARGIN < width
}

#[cfg(test)]
mod tests {
    use vt_core::Image;
    use vt_thresh::{AdaptiveMethod, adaptive_threshold, threshold_u8};

    use super::{checkerboard, coins, is_page_stroke, uneven_page};

    #[test]
    fn checkerboard_alternates_cells() {
        let img = checkerboard(4, 4, 1, 50, 200);
        let expected = Image::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { 50 } else { 200 });
        assert_eq!(img, expected);

        let coarse = checkerboard(6, 2, 3, 0, 255);
        assert_eq!(coarse.row(0), &[0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn coins_are_deterministic_and_separable_globally() {
        let a = coins(128, 96);
        assert_eq!(a, coins(128, 96));

        let fraction = threshold_u8(&a.as_view(), 110).fraction_set();
        assert!(fraction > 0.2 && fraction < 0.45, "fraction={fraction}");
        assert!(*a.get(0, 0).expect("in bounds") < 80);
        assert!(*a.get(16, 16).expect("in bounds") > 140);
    }

    #[test]
    fn page_defeats_a_global_cutoff() {
        let (w, h) = (160, 64);
        let page = uneven_page(w, h);
        let global = threshold_u8(&page.as_view(), 127);

        // Paper on the dim left side falls under the fixed cutoff.
        for y in (0..h).filter(|y| y % 16 == 0) {
            for x in 0..40 {
                assert_eq!(global.get(x, y), Some(false), "({x}, {y})");
            }
        }
    }

    #[test]
    fn page_is_recovered_by_adaptive_thresholding() {
        let (w, h) = (160, 64);
        let page = uneven_page(w, h);

        for method in [AdaptiveMethod::Mean, AdaptiveMethod::Gaussian] {
            let mask = adaptive_threshold(&page.as_view(), 15, 2, method).expect("valid config");
            for y in 0..h {
                for x in 0..w {
                    if is_page_stroke(w, x, y) {
                        assert_eq!(mask.get(x, y), Some(false), "{method:?} stroke ({x}, {y})");
                    } else if y % 16 == 0 && (8..w - 8).contains(&x) {
                        assert_eq!(mask.get(x, y), Some(true), "{method:?} paper ({x}, {y})");
                    }
                }
            }
        }
    }
}
