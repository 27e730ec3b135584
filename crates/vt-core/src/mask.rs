use crate::{Error, Image};

/// Per-pixel decision of a thresholding rule.
///
/// Same dimensions as the image it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl BinaryMask {
    pub fn from_vec(width: usize, height: usize, data: Vec<bool>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let img = Image::from_fn(width, height, &mut f);
        Self {
            width,
            height,
            data: img.into_vec(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn count_set(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Fraction of pixels that are set, `0.0` for an empty mask.
    pub fn fraction_set(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count_set() as f64 / self.data.len() as f64
    }

    /// Renders set pixels as `on` and the rest as `0`.
    pub fn to_image(&self, on: u8) -> Image<u8> {
        Image::from_fn(self.width, self.height, |x, y| {
            if self.data[y * self.width + x] { on } else { 0 }
        })
    }
}
