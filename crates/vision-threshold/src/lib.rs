//! Umbrella crate for the `vision-threshold` workspace.
//!
//! Re-exports the foundational crates and adds the [`explorer`] harness that
//! interactive front ends drive with parameter changes, plus a few synthetic
//! [`samples`] to threshold.

pub mod explorer;
pub mod samples;

pub use explorer::{DisplaySink, Explorer, ImageSource, ParameterChange};
pub use vt_core::*;
pub use vt_filter::*;
pub use vt_thresh::*;
