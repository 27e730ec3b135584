/// Errors raised when constructing or combining image buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("invalid stride")]
    InvalidStride,
}

/// Malformed thresholding or filtering parameters.
///
/// These are reported before any pixel is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("window_size must be odd, got {0}")]
    EvenWindow(usize),
    #[error("window_size must be at least 3, got {0}")]
    WindowTooSmall(usize),
    #[error("blur_sigma must be >= 0, got {0}")]
    NegativeSigma(f32),
    #[error("blur_sigma must be finite, got {0}")]
    NonFiniteSigma(f32),
}

impl ConfigError {
    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::EvenWindow(_) | Self::WindowTooSmall(_) => "window_size",
            Self::NegativeSigma(_) | Self::NonFiniteSigma(_) => "blur_sigma",
        }
    }
}
