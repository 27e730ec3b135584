//! Global and adaptive thresholding of 8-bit grayscale images.
//!
//! Every operation is a pure function of an image view and a validated
//! config record; nothing is cached between calls.
//!
//! Decision rule: a pixel is selected when it is *strictly* greater than its
//! cutoff. For [`threshold_u8`] the cutoff is a constant; for
//! [`adaptive_threshold_u8`] it is the rounded neighborhood mean minus the
//! offset `c`.
//!
//! Both front-end operations ([`run_global`], [`compare_adaptive`]) blur the
//! source first when their [`vt_filter::GaussianBlur`] stage is enabled.

pub mod adaptive;
pub mod comparison;
pub mod controls;
pub mod global;
pub mod report;

pub use adaptive::{
    AdaptiveMethod, AdaptiveThresholdConfig, WindowSize, adaptive_threshold, adaptive_threshold_u8,
    local_means,
};
pub use comparison::{AdaptiveComparison, AdaptiveComparisonConfig, Panel, compare_adaptive};
pub use global::{
    COMPARISON_CUTOFF, GlobalThresholdConfig, GlobalThresholdOutput, run_global, selection_title,
    threshold_u8,
};
pub use report::{Histogram, MaskedSamples, split_by_mask};
