//! Plain-data summaries handed to display sinks.

use serde::Serialize;
use vt_core::{BinaryMask, Error, ImageView};

pub const INTENSITY_BINS: usize = 256;
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 255.0);

/// Equal-width histogram over a closed range.
///
/// Bin `i` covers `[lo + i*width, lo + (i+1)*width)`; the last bin also
/// includes `hi`. Samples outside `[lo, hi]` are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    counts: Vec<u64>,
    range: (f32, f32),
}

impl Histogram {
    pub fn from_samples(samples: &[u8], bins: usize, range: (f32, f32)) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");
        let (lo, hi) = range;
        assert!(hi > lo, "histogram range must be increasing");

        let mut counts = vec![0u64; bins];
        let span = f64::from(hi) - f64::from(lo);
        for &s in samples {
            let v = f64::from(s);
            if v < f64::from(lo) || v > f64::from(hi) {
                continue;
            }
            let idx = ((v - f64::from(lo)) / span * bins as f64) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self { counts, range }
    }

    /// 256 bins over `[0, 255]`.
    pub fn intensity(samples: &[u8]) -> Self {
        Self::from_samples(samples, INTENSITY_BINS, INTENSITY_RANGE)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn bin_width(&self) -> f32 {
        (self.range.1 - self.range.0) / self.counts.len() as f32
    }

    pub fn bin_start(&self, i: usize) -> f32 {
        self.range.0 + i as f32 * self.bin_width()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Source samples partitioned by a mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedSamples {
    pub selected: Vec<u8>,
    pub rejected: Vec<u8>,
}

pub fn split_by_mask(src: &ImageView<'_, u8>, mask: &BinaryMask) -> Result<MaskedSamples, Error> {
    if src.width() != mask.width() || src.height() != mask.height() {
        return Err(Error::DimensionMismatch {
            expected: (src.width(), src.height()),
            actual: (mask.width(), mask.height()),
        });
    }

    let mut out = MaskedSamples::default();
    for (row, mask_row) in src.rows().zip(mask.data().chunks(mask.width().max(1))) {
        for (&px, &m) in row.iter().zip(mask_row) {
            if m {
                out.selected.push(px);
            } else {
                out.rejected.push(px);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use vt_core::{BinaryMask, Error, Image};

    use super::{Histogram, split_by_mask};

    #[test]
    fn intensity_histogram_places_extremes() {
        let h = Histogram::intensity(&[0, 0, 1, 128, 254, 255]);
        assert_eq!(h.bins(), 256);
        assert_eq!(h.counts()[0], 2);
        assert_eq!(h.counts()[1], 1);
        assert_eq!(h.counts()[128], 1);
        assert_eq!(h.counts()[254], 1);
        assert_eq!(h.counts()[255], 1);
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn coarse_bins_and_out_of_range_samples() {
        let h = Histogram::from_samples(&[5, 10, 19, 20, 30, 31], 2, (10.0, 30.0));
        assert_eq!(h.counts(), &[2, 2]);
        assert_eq!(h.bin_width(), 10.0);
        assert_eq!(h.bin_start(1), 20.0);
    }

    #[test]
    fn split_partitions_samples() {
        let img = Image::from_vec(3, 2, vec![10u8, 200, 30, 220, 50, 240]).expect("valid image");
        let mask = BinaryMask::from_fn(3, 2, |x, y| (x + y) % 2 == 1);
        let split = split_by_mask(&img.as_view(), &mask).expect("same dimensions");

        assert_eq!(split.selected, vec![200, 220, 240]);
        assert_eq!(split.rejected, vec![10, 30, 50]);
    }

    #[test]
    fn split_rejects_mismatched_dimensions() {
        let img = Image::new_fill(3, 2, 0u8);
        let mask = BinaryMask::from_fn(2, 3, |_, _| true);
        assert_eq!(
            split_by_mask(&img.as_view(), &mask).unwrap_err(),
            Error::DimensionMismatch {
                expected: (3, 2),
                actual: (2, 3)
            }
        );
    }
}
