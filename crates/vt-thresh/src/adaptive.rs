//! Local thresholding against a per-pixel neighborhood mean.
//!
//! For each pixel the cutoff is the mean of the `w x w` window centered on it
//! (plain or Gaussian-weighted) minus the offset `c`; the pixel is selected
//! when it is strictly brighter than that cutoff. The mean is rounded to an
//! integer first, so a uniform image with `c = 0` selects nothing.

use log::debug;
use serde::{Deserialize, Serialize};
use vt_core::{BinaryMask, BorderMode, ConfigError, Image, ImageView};
use vt_filter::{box_mean_u8, gaussian_mean_u8};

use crate::controls;

/// Odd neighborhood size, at least 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowSize(usize);

impl WindowSize {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size < 3 {
            return Err(ConfigError::WindowTooSmall(size));
        }
        if size % 2 == 0 {
            return Err(ConfigError::EvenWindow(size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn radius(self) -> usize {
        self.0 / 2
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(controls::WINDOW_SIZE.default)
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = ConfigError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<WindowSize> for usize {
    fn from(window: WindowSize) -> Self {
        window.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    Mean,
    Gaussian,
}

impl AdaptiveMethod {
    pub fn title(self) -> &'static str {
        match self {
            Self::Mean => "Adaptive Mean Thresholding",
            Self::Gaussian => "Adaptive Gaussian Thresholding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveThresholdConfig {
    pub window: WindowSize,
    /// Subtracted from the local mean; negative values raise the cutoff.
    pub offset: i32,
    pub method: AdaptiveMethod,
    #[serde(default)]
    pub border: BorderMode<u8>,
}

impl Default for AdaptiveThresholdConfig {
    fn default() -> Self {
        Self {
            window: WindowSize::default(),
            offset: controls::OFFSET.default,
            method: AdaptiveMethod::Mean,
            border: BorderMode::Reflect101,
        }
    }
}

impl AdaptiveThresholdConfig {
    pub fn new(window: usize, offset: i32, method: AdaptiveMethod) -> Result<Self, ConfigError> {
        Ok(Self {
            window: WindowSize::new(window)?,
            offset,
            method,
            border: BorderMode::Reflect101,
        })
    }

    pub fn with_border(self, border: BorderMode<u8>) -> Self {
        Self { border, ..self }
    }
}

/// Rounded neighborhood means, before the offset is applied.
pub fn local_means(src: &ImageView<'_, u8>, cfg: &AdaptiveThresholdConfig) -> Image<u8> {
    match cfg.method {
        AdaptiveMethod::Mean => box_mean_u8(src, cfg.window.get(), &cfg.border),
        AdaptiveMethod::Gaussian => gaussian_mean_u8(src, cfg.window.get(), &cfg.border),
    }
}

pub fn adaptive_threshold_u8(src: &ImageView<'_, u8>, cfg: &AdaptiveThresholdConfig) -> BinaryMask {
    let means = local_means(src, cfg);
    let offset = i64::from(cfg.offset);

    let mut data = Vec::with_capacity(src.len());
    for (row, mean_row) in src.rows().zip(means.as_view().rows()) {
        data.extend(
            row.iter()
                .zip(mean_row)
                .map(|(&px, &mean)| i64::from(px) > i64::from(mean) - offset),
        );
    }

    let mask = BinaryMask::from_vec(src.width(), src.height(), data)
        .expect("mask sized like the source view");
    debug!(
        "adaptive {:?} window={} offset={} selected={:.4}",
        cfg.method,
        cfg.window.get(),
        cfg.offset,
        mask.fraction_set()
    );
    mask
}

/// Validates `window` and thresholds `src` with the default border.
pub fn adaptive_threshold(
    src: &ImageView<'_, u8>,
    window: usize,
    offset: i32,
    method: AdaptiveMethod,
) -> Result<BinaryMask, ConfigError> {
    let cfg = AdaptiveThresholdConfig::new(window, offset, method)?;
    Ok(adaptive_threshold_u8(src, &cfg))
}
