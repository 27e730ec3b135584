use log::debug;
use serde::{Deserialize, Serialize};
use vt_core::{BorderMode, ConfigError, Image, ImageView, to_f32};

use crate::conv::{saturate_u8, separable_f32};
use crate::kernel::GaussianKernel1D;

/// Validated Gaussian pre-smoothing stage.
///
/// `sigma == 0.0` disables the stage: [`GaussianBlur::apply`] then returns an
/// unchanged copy of the input. Negative and non-finite sigmas are rejected
/// by [`GaussianBlur::new`] and during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GaussianBlurFields", into = "GaussianBlurFields")]
pub struct GaussianBlur {
    sigma: f32,
    border: BorderMode<u8>,
}

impl Default for GaussianBlur {
    fn default() -> Self {
        Self::disabled()
    }
}

impl GaussianBlur {
    pub fn new(sigma: f32) -> Result<Self, ConfigError> {
        if !sigma.is_finite() {
            return Err(ConfigError::NonFiniteSigma(sigma));
        }
        if sigma < 0.0 {
            return Err(ConfigError::NegativeSigma(sigma));
        }

        Ok(Self {
            sigma,
            border: BorderMode::Reflect101,
        })
    }

    pub const fn disabled() -> Self {
        Self {
            sigma: 0.0,
            border: BorderMode::Reflect101,
        }
    }

    pub fn with_border(self, border: BorderMode<u8>) -> Self {
        Self { border, ..self }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn border(&self) -> BorderMode<u8> {
        self.border
    }

    pub fn is_enabled(&self) -> bool {
        self.sigma > 0.0
    }

    /// Kernel used by the stage, `None` when disabled.
    pub fn kernel(&self) -> Option<GaussianKernel1D> {
        self.is_enabled()
            .then(|| GaussianKernel1D::from_sigma(self.sigma))
    }

    pub fn apply(&self, src: &ImageView<'_, u8>) -> Image<u8> {
        let Some(kernel) = self.kernel() else {
            return src.to_image();
        };

        debug!(
            "gaussian blur sigma={} radius={} border={} on {}x{}",
            self.sigma,
            kernel.radius,
            self.border.name(),
            src.width(),
            src.height()
        );

        let src_f32 = to_f32(src);
        let border = self.border.map(f32::from);
        let smoothed = separable_f32(&src_f32.as_view(), &kernel.weights, &kernel.weights, &border);
        smoothed.map(|&v| saturate_u8(v))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GaussianBlurFields {
    #[serde(default)]
    sigma: f32,
    #[serde(default)]
    border: BorderMode<u8>,
}

impl TryFrom<GaussianBlurFields> for GaussianBlur {
    type Error = ConfigError;

    fn try_from(fields: GaussianBlurFields) -> Result<Self, Self::Error> {
        Ok(Self::new(fields.sigma)?.with_border(fields.border))
    }
}

impl From<GaussianBlur> for GaussianBlurFields {
    fn from(blur: GaussianBlur) -> Self {
        Self {
            sigma: blur.sigma,
            border: blur.border,
        }
    }
}
