use log::debug;
use serde::{Deserialize, Serialize};
use vt_core::{BinaryMask, Image, ImageView};
use vt_filter::GaussianBlur;

use crate::controls;

/// Cutoff of the fixed global threshold shown next to the adaptive results.
pub const COMPARISON_CUTOFF: u8 = 127;

/// Marks every pixel strictly brighter than `threshold`.
///
/// A pixel equal to `threshold` is not selected.
pub fn threshold_u8(src: &ImageView<'_, u8>, threshold: u8) -> BinaryMask {
    let mut data = Vec::with_capacity(src.len());
    for row in src.rows() {
        data.extend(row.iter().map(|&px| px > threshold));
    }

    BinaryMask::from_vec(src.width(), src.height(), data)
        .expect("mask sized like the source view")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalThresholdConfig {
    pub threshold: u8,
    #[serde(default)]
    pub blur: GaussianBlur,
}

impl Default for GlobalThresholdConfig {
    fn default() -> Self {
        Self {
            threshold: controls::THRESHOLD.default,
            blur: GaussianBlur::disabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalThresholdOutput {
    /// Input after the blur stage, identical to the source when blur is off.
    pub smoothed: Image<u8>,
    pub mask: BinaryMask,
    pub fraction: f64,
}

impl GlobalThresholdOutput {
    pub fn title(&self) -> String {
        selection_title(self.fraction)
    }
}

pub fn selection_title(fraction: f64) -> String {
    format!("Threshold ({:3.2}% pixels selected)", fraction * 100.0)
}

/// Blur (when enabled) and threshold `src` in one pass.
pub fn run_global(src: &ImageView<'_, u8>, cfg: &GlobalThresholdConfig) -> GlobalThresholdOutput {
    let smoothed = cfg.blur.apply(src);
    let mask = threshold_u8(&smoothed.as_view(), cfg.threshold);
    let fraction = mask.fraction_set();

    debug!(
        "global threshold={} sigma={} selected={:.4}",
        cfg.threshold,
        cfg.blur.sigma(),
        fraction
    );

    GlobalThresholdOutput {
        smoothed,
        mask,
        fraction,
    }
}

#[cfg(test)]
mod tests {
    use vt_core::Image;
    use vt_filter::GaussianBlur;

    use super::{GlobalThresholdConfig, run_global, selection_title, threshold_u8};

    fn checkerboard_50_200() -> Image<u8> {
        Image::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { 50 } else { 200 })
    }

    #[test]
    fn every_pixel_follows_the_strict_rule() {
        let img = Image::from_fn(16, 16, |x, y| (x * 16 + y) as u8);
        for t in [0u8, 1, 77, 127, 128, 254, 255] {
            let mask = threshold_u8(&img.as_view(), t);
            for (&px, &m) in img.data().iter().zip(mask.data()) {
                assert_eq!(m, px > t, "px={px} t={t}");
            }
        }
    }

    #[test]
    fn pixel_equal_to_threshold_is_not_selected() {
        let img = Image::from_vec(1, 1, vec![128u8]).expect("valid image");
        let mask = threshold_u8(&img.as_view(), 128);
        assert_eq!(mask.get(0, 0), Some(false));
    }

    #[test]
    fn threshold_255_selects_nothing() {
        let img = Image::new_fill(3, 3, 255u8);
        assert_eq!(threshold_u8(&img.as_view(), 255).count_set(), 0);
    }

    #[test]
    fn rethresholding_a_unit_mask_is_idempotent() {
        let img = Image::from_fn(8, 5, |x, y| ((x * 31 + y * 17) % 256) as u8);
        let mask = threshold_u8(&img.as_view(), 100);
        let again = threshold_u8(&mask.to_image(1).as_view(), 0);
        assert_eq!(again, mask);
    }

    #[test]
    fn checkerboard_scenario() {
        let img = checkerboard_50_200();
        let cfg = GlobalThresholdConfig {
            threshold: 100,
            ..GlobalThresholdConfig::default()
        };
        let out = run_global(&img.as_view(), &cfg);

        assert_eq!(out.smoothed, img);
        for y in 0..4 {
            for x in 0..4 {
                let expected = *img.get(x, y).expect("in bounds") == 200;
                assert_eq!(out.mask.get(x, y), Some(expected));
            }
        }
        assert_eq!(out.fraction, 0.5);
        assert_eq!(out.title(), "Threshold (50.00% pixels selected)");
    }

    #[test]
    fn blur_runs_before_the_threshold() {
        let img = checkerboard_50_200();
        let cfg = GlobalThresholdConfig {
            threshold: 100,
            blur: GaussianBlur::new(2.0).expect("valid sigma"),
        };
        let out = run_global(&img.as_view(), &cfg);

        assert_ne!(out.smoothed, img);
        // Heavy smoothing pulls the checkerboard toward its mean of 125.
        assert!(out.smoothed.data().iter().all(|&v| v > 100 && v < 150));
        assert_eq!(out.fraction, 1.0);
    }

    #[test]
    fn title_formats_two_decimals() {
        assert_eq!(selection_title(0.0), "Threshold (0.00% pixels selected)");
        assert_eq!(selection_title(0.123456), "Threshold (12.35% pixels selected)");
    }

    #[test]
    fn config_deserializes_with_default_blur() {
        let cfg: GlobalThresholdConfig =
            serde_json::from_str(r#"{"threshold":90}"#).expect("valid config");
        assert_eq!(cfg.threshold, 90);
        assert!(!cfg.blur.is_enabled());

        assert!(serde_json::from_str::<GlobalThresholdConfig>(r#"{"threshold":300}"#).is_err());
    }
}
