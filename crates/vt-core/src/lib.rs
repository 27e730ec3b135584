//! Foundational containers for thresholding 8-bit grayscale images.
//!
//! ## Images and Views
//! [`Image`] owns a row-major buffer that is never mutated after
//! construction; every operation in the workspace returns a new image.
//! [`ImageView`] borrows a buffer with an element stride (not byte stride),
//! which may exceed `width` for padded rows.
//!
//! ## Masks
//! [`BinaryMask`] holds one boolean per pixel and is the output of every
//! thresholding rule.
//!
//! ## Border Modes
//! Neighborhood filters extend the image with [`BorderMode`]: clamp
//! (replicate), constant fill, or reflect-101. Reflect-101 mirrors around the
//! edge pixel without repeating it and is the default.

mod border;
mod error;
mod image;
mod mask;

pub use border::{BorderMode, fetch, map_index};
pub use error::{ConfigError, Error};
pub use image::{Image, ImageView, to_f32};
pub use mask::BinaryMask;
