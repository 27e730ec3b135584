//! Smoothing filters for 8-bit grayscale images.
//!
//! All filters are separable: a 1D pass along rows followed by a 1D pass
//! along columns, in `f32` (Gaussian) or exact `u32` sums (box). Samples
//! outside the image are supplied by a [`vt_core::BorderMode`].
//!
//! Kernel conventions:
//! - Blur kernels are sized from sigma with `radius = round(3*sigma)`,
//!   minimum 1.
//! - Neighborhood-mean kernels are sized from an odd window and derive sigma
//!   from it, see [`GaussianKernel1D::for_window`].
//!
//! Results are rounded to the nearest integer and saturated to `u8`.

mod blur;
pub mod conv;
mod kernel;
mod local_mean;

pub use blur::GaussianBlur;
pub use kernel::GaussianKernel1D;
pub use local_mean::{box_mean_u8, gaussian_mean_u8};
