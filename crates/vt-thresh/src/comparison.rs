use log::debug;
use serde::{Deserialize, Serialize};
use vt_core::{BinaryMask, ConfigError, Image, ImageView};
use vt_filter::GaussianBlur;

use crate::adaptive::{AdaptiveMethod, AdaptiveThresholdConfig, WindowSize, adaptive_threshold_u8};
use crate::controls;
use crate::global::{COMPARISON_CUTOFF, threshold_u8};

pub const ORIGINAL_TITLE: &str = "Original Image";
pub const GLOBAL_TITLE: &str = "Global Thresholding (q = 127)";

/// Parameters of one side-by-side adaptive comparison.
///
/// The blur border is reused for the adaptive neighborhoods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveComparisonConfig {
    pub window: WindowSize,
    pub offset: i32,
    #[serde(default)]
    pub blur: GaussianBlur,
}

impl Default for AdaptiveComparisonConfig {
    fn default() -> Self {
        Self {
            window: WindowSize::default(),
            offset: controls::OFFSET.default,
            blur: GaussianBlur::disabled(),
        }
    }
}

impl AdaptiveComparisonConfig {
    pub fn new(window: usize, offset: i32, blur_sigma: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            window: WindowSize::new(window)?,
            offset,
            blur: GaussianBlur::new(blur_sigma)?,
        })
    }

    pub fn adaptive(&self, method: AdaptiveMethod) -> AdaptiveThresholdConfig {
        AdaptiveThresholdConfig {
            window: self.window,
            offset: self.offset,
            method,
            border: self.blur.border(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Panel<'a> {
    Image(&'a Image<u8>),
    Mask(&'a BinaryMask),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveComparison {
    /// Input after the blur stage.
    pub input: Image<u8>,
    pub global: BinaryMask,
    pub mean: BinaryMask,
    pub gaussian: BinaryMask,
}

impl AdaptiveComparison {
    /// The four titled panels in display order.
    pub fn panels(&self) -> [(&'static str, Panel<'_>); 4] {
        [
            (ORIGINAL_TITLE, Panel::Image(&self.input)),
            (GLOBAL_TITLE, Panel::Mask(&self.global)),
            (AdaptiveMethod::Mean.title(), Panel::Mask(&self.mean)),
            (AdaptiveMethod::Gaussian.title(), Panel::Mask(&self.gaussian)),
        ]
    }
}

pub fn compare_adaptive(
    src: &ImageView<'_, u8>,
    cfg: &AdaptiveComparisonConfig,
) -> AdaptiveComparison {
    let input = cfg.blur.apply(src);
    let view = input.as_view();

    let global = threshold_u8(&view, COMPARISON_CUTOFF);
    let mean = adaptive_threshold_u8(&view, &cfg.adaptive(AdaptiveMethod::Mean));
    let gaussian = adaptive_threshold_u8(&view, &cfg.adaptive(AdaptiveMethod::Gaussian));

    debug!(
        "comparison window={} offset={} sigma={}",
        cfg.window.get(),
        cfg.offset,
        cfg.blur.sigma()
    );

    AdaptiveComparison {
        input,
        global,
        mean,
        gaussian,
    }
}

#[cfg(test)]
mod tests {
    use vt_core::{BorderMode, ConfigError, Image};
    use vt_filter::GaussianBlur;

    use super::{AdaptiveComparisonConfig, GLOBAL_TITLE, ORIGINAL_TITLE, Panel, compare_adaptive};
    use crate::adaptive::{AdaptiveMethod, WindowSize};
    use crate::global::threshold_u8;

    #[test]
    fn new_validates_every_parameter() {
        assert_eq!(
            AdaptiveComparisonConfig::new(10, 2, 0.0).unwrap_err(),
            ConfigError::EvenWindow(10)
        );
        assert_eq!(
            AdaptiveComparisonConfig::new(11, 2, -1.0).unwrap_err(),
            ConfigError::NegativeSigma(-1.0)
        );
        assert!(AdaptiveComparisonConfig::new(11, -50, 5.0).is_ok());
    }

    #[test]
    fn panels_are_titled_in_display_order() {
        let img = Image::from_fn(10, 10, |x, y| (x * 20 + y) as u8);
        let cfg = AdaptiveComparisonConfig::new(3, 2, 0.0).expect("valid config");
        let out = compare_adaptive(&img.as_view(), &cfg);

        let titles: Vec<_> = out.panels().iter().map(|(t, _)| *t).collect();
        assert_eq!(
            titles,
            [
                ORIGINAL_TITLE,
                GLOBAL_TITLE,
                "Adaptive Mean Thresholding",
                "Adaptive Gaussian Thresholding",
            ]
        );
        assert!(matches!(out.panels()[0].1, Panel::Image(i) if *i == img));
    }

    #[test]
    fn global_panel_uses_cutoff_127() {
        let img = Image::from_fn(16, 16, |x, y| (x * 16 + y) as u8);
        let cfg = AdaptiveComparisonConfig::default();
        let out = compare_adaptive(&img.as_view(), &cfg);

        assert_eq!(out.global, threshold_u8(&img.as_view(), 127));
        assert_eq!(out.global.count_set(), 128);
    }

    #[test]
    fn adaptive_configs_share_window_offset_and_border() {
        let cfg = AdaptiveComparisonConfig {
            window: WindowSize::new(5).expect("valid window"),
            offset: -3,
            blur: GaussianBlur::new(1.0)
                .expect("valid sigma")
                .with_border(BorderMode::Clamp),
        };
        let mean = cfg.adaptive(AdaptiveMethod::Mean);
        assert_eq!(mean.window.get(), 5);
        assert_eq!(mean.offset, -3);
        assert_eq!(mean.border, BorderMode::Clamp);
        assert_eq!(cfg.adaptive(AdaptiveMethod::Gaussian).method, AdaptiveMethod::Gaussian);
    }

    #[test]
    fn blurred_input_feeds_every_panel() {
        let img = Image::from_fn(12, 12, |x, _| if x < 6 { 40 } else { 220 });
        let cfg = AdaptiveComparisonConfig::new(5, 2, 1.0).expect("valid config");
        let out = compare_adaptive(&img.as_view(), &cfg);

        assert_ne!(out.input, img);
        assert_eq!(out.global, threshold_u8(&out.input.as_view(), 127));
    }
}
