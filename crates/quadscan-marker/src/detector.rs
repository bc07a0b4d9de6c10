use image::GrayImage;
use quadscan_core::{
    gaussian_blur, threshold, to_grayscale, Candidate, Frame, FrameError, MarkerSet,
    Quadrilateral,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::candidates::extract_candidates;
use crate::ordering::quadrilateral_from_markers;
use crate::shape_filter::{has_embedded_square, SquareIndex};
use crate::types::{MarkerDetection, MarkerLocatorParams};

/// Fiducial marker locator: circular candidates confirmed by an embedded
/// square, reduced to four ordered corners.
#[derive(Clone, Debug, Default)]
pub struct MarkerLocator {
    params: MarkerLocatorParams,
}

impl MarkerLocator {
    pub fn new(params: MarkerLocatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MarkerLocatorParams {
        &self.params
    }

    /// Ordered corners, or [`Quadrilateral::SENTINEL`] when fewer than three
    /// markers are confirmed.
    ///
    /// Fails only on an invalid frame.
    pub fn locate(&self, frame: &Frame<'_>) -> Result<Quadrilateral, FrameError> {
        Ok(self.locate_detailed(frame)?.quad)
    }

    /// Same as [`Self::locate`] but keeps the intermediate results.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, frame),
            fields(width = frame.width, height = frame.height, strategy = ?self.params.strategy)
        )
    )]
    pub fn locate_detailed(&self, frame: &Frame<'_>) -> Result<MarkerDetection, FrameError> {
        frame.validate()?;
        let gray = to_grayscale(frame)?;
        let blurred = gaussian_blur(&gray, self.params.blur_kernel);

        let candidates = extract_candidates(&blurred, &self.params);
        let binary = threshold(&blurred, self.params.shape_filter.binary_threshold, u8::MAX);
        let (markers, square_found) = self.select_markers(&candidates, &binary);
        let quad = quadrilateral_from_markers(&markers, self.params.band_height);

        log::debug!(
            "marker locator: {} candidates, {} markers, square={}, found={}",
            candidates.len(),
            markers.len(),
            square_found,
            !quad.is_sentinel()
        );

        Ok(MarkerDetection {
            quad,
            candidates,
            markers,
            square_found,
        })
    }

    /// Keep valid candidates the square filter confirms, in discovery order.
    fn select_markers(&self, candidates: &[Candidate], binary: &GrayImage) -> (MarkerSet, bool) {
        let filter = &self.params.shape_filter;
        let mut markers = MarkerSet::new();

        if self.params.rescan_per_candidate {
            let mut any = false;
            for cand in candidates.iter().filter(|c| c.is_valid()) {
                if has_embedded_square(binary, filter) {
                    any = true;
                    markers.push(cand.center);
                }
            }
            return (markers, any || has_embedded_square(binary, filter));
        }

        let index = SquareIndex::build(binary, filter);
        if index.contains_square() {
            for cand in candidates.iter().filter(|c| c.is_valid()) {
                markers.push(cand.center);
            }
        }
        (markers, index.contains_square())
    }
}
