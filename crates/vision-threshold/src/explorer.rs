//! Parameter-change driven harness for interactive front ends.
//!
//! A front end owns an [`Explorer`] holding the original, unblurred image.
//! Every [`ParameterChange`] recomputes from that image and forwards titled
//! results to a [`DisplaySink`]. Nothing is cached between changes; when
//! changes pile up, [`Explorer::handle_latest`] renders only the last one.

use std::convert::Infallible;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use vt_core::{BinaryMask, Image};
use vt_thresh::report::{INTENSITY_BINS, INTENSITY_RANGE};
use vt_thresh::{
    AdaptiveComparisonConfig, GlobalThresholdConfig, Panel, compare_adaptive, run_global,
    split_by_mask,
};

pub const SOURCE_HISTOGRAM_TITLE: &str = "Histogram";
pub const SELECTED_HISTOGRAM_TITLE: &str = "Selected pixels";
pub const REJECTED_HISTOGRAM_TITLE: &str = "Rejected pixels";

/// Supplies a decoded grayscale image.
///
/// Decoding and fetching errors are reported through `Self::Error`.
pub trait ImageSource {
    type Error;

    fn load(&self) -> Result<Image<u8>, Self::Error>;
}

impl ImageSource for Image<u8> {
    type Error = Infallible;

    fn load(&self) -> Result<Image<u8>, Self::Error> {
        Ok(self.clone())
    }
}

/// Renders images, masks and intensity histograms.
pub trait DisplaySink {
    type Error;

    /// Called once before the outputs of each change.
    fn begin(&mut self, _change: &ParameterChange) -> Result<(), Self::Error> {
        Ok(())
    }

    fn show_image(&mut self, title: &str, image: &Image<u8>) -> Result<(), Self::Error>;

    fn show_mask(&mut self, title: &str, mask: &BinaryMask) -> Result<(), Self::Error>;

    fn show_histogram(
        &mut self,
        title: &str,
        samples: &[u8],
        bins: usize,
        range: (f32, f32),
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterChange {
    Global(GlobalThresholdConfig),
    Adaptive(AdaptiveComparisonConfig),
}

impl ParameterChange {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Global(_) => "global",
            Self::Adaptive(_) => "adaptive",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Explorer {
    source: Image<u8>,
}

impl Explorer {
    pub fn new(source: Image<u8>) -> Self {
        Self { source }
    }

    pub fn from_source<S: ImageSource>(source: &S) -> Result<Self, S::Error> {
        source.load().map(Self::new)
    }

    pub fn source(&self) -> &Image<u8> {
        &self.source
    }

    /// Shows the untouched source image and its intensity histogram.
    pub fn show_source<S: DisplaySink>(&self, sink: &mut S) -> Result<(), S::Error> {
        let title = format!("Image ({}, {})", self.source.width(), self.source.height());
        sink.show_image(&title, &self.source)?;
        sink.show_histogram(
            SOURCE_HISTOGRAM_TITLE,
            self.source.data(),
            INTENSITY_BINS,
            INTENSITY_RANGE,
        )
    }

    pub fn handle<S: DisplaySink>(
        &self,
        change: &ParameterChange,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        debug!("handling {} parameter change", change.kind());
        sink.begin(change)?;

        match change {
            ParameterChange::Global(cfg) => self.render_global(cfg, sink),
            ParameterChange::Adaptive(cfg) => self.render_adaptive(cfg, sink),
        }
    }

    /// Renders only the last of `changes`, returning it.
    pub fn handle_latest<S, I>(
        &self,
        changes: I,
        sink: &mut S,
    ) -> Result<Option<ParameterChange>, S::Error>
    where
        S: DisplaySink,
        I: IntoIterator<Item = ParameterChange>,
    {
        let mut skipped = 0usize;
        let mut latest = None;
        for change in changes {
            if latest.replace(change).is_some() {
                skipped += 1;
            }
        }

        let Some(change) = latest else {
            return Ok(None);
        };

        trace!("coalesced {skipped} superseded parameter changes");
        self.handle(&change, sink)?;
        Ok(Some(change))
    }

    fn render_global<S: DisplaySink>(
        &self,
        cfg: &GlobalThresholdConfig,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let out = run_global(&self.source.as_view(), cfg);
        sink.show_mask(&out.title(), &out.mask)?;

        let split = split_by_mask(&out.smoothed.as_view(), &out.mask)
            .expect("mask computed from the smoothed image");
        sink.show_histogram(
            SELECTED_HISTOGRAM_TITLE,
            &split.selected,
            INTENSITY_BINS,
            INTENSITY_RANGE,
        )?;
        sink.show_histogram(
            REJECTED_HISTOGRAM_TITLE,
            &split.rejected,
            INTENSITY_BINS,
            INTENSITY_RANGE,
        )
    }

    fn render_adaptive<S: DisplaySink>(
        &self,
        cfg: &AdaptiveComparisonConfig,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        let out = compare_adaptive(&self.source.as_view(), cfg);
        for (title, panel) in out.panels() {
            match panel {
                Panel::Image(img) => sink.show_image(title, img)?,
                Panel::Mask(mask) => sink.show_mask(title, mask)?,
            }
        }
        Ok(())
    }
}
