use serde::{Deserialize, Serialize};

use quadscan_core::{Candidate, HoughParams, MarkerSet, Quadrilateral};

/// Square-likeness test applied to every contour of the binarized frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeFilterParams {
    /// Binarization level (pixels strictly above become foreground).
    pub binary_threshold: u8,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub poly_epsilon_frac: f64,
    /// Accepted vertex count range of the approximated polygon (inclusive).
    pub min_vertices: usize,
    pub max_vertices: usize,
    /// Accepted bounding-box aspect ratio range `width / height` (inclusive).
    pub min_aspect: f64,
    pub max_aspect: f64,
}

impl Default for ShapeFilterParams {
    fn default() -> Self {
        Self {
            binary_threshold: 100,
            poly_epsilon_frac: 0.02,
            min_vertices: 3,
            max_vertices: 5,
            min_aspect: 0.2,
            max_aspect: 5.0,
        }
    }
}

/// Contour + ellipse-fit candidate extraction settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseFitParams {
    /// Binarization level (pixels strictly above become 255).
    pub binary_threshold: u8,
    /// Contours with fewer points are not fitted.
    pub min_contour_points: usize,
}

impl Default for EllipseFitParams {
    fn default() -> Self {
        Self {
            binary_threshold: 100,
            min_contour_points: quadscan_core::MIN_ELLIPSE_POINTS,
        }
    }
}

/// How circular blob candidates are produced.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStrategy {
    /// Binarize, trace every contour, fit an ellipse to each.
    #[default]
    EllipseFit,
    /// Gradient Hough circle transform on the blurred grayscale frame.
    HoughCircles,
}

/// Parameters for [`crate::MarkerLocator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerLocatorParams {
    pub strategy: CandidateStrategy,
    /// Square blur kernel applied after grayscale conversion.
    pub blur_kernel: usize,
    pub ellipse: EllipseFitParams,
    pub hough: HoughParams,
    pub shape_filter: ShapeFilterParams,
    /// Height of the horizontal bands used to order the final corners.
    pub band_height: i32,
    /// Re-run the square filter on the full frame for every candidate instead
    /// of once per frame. Same result, kept for parity checks.
    pub rescan_per_candidate: bool,
}

impl Default for MarkerLocatorParams {
    fn default() -> Self {
        Self {
            strategy: CandidateStrategy::default(),
            blur_kernel: quadscan_core::BLUR_KERNEL,
            ellipse: EllipseFitParams::default(),
            hough: HoughParams::default(),
            shape_filter: ShapeFilterParams::default(),
            band_height: 500,
            rescan_per_candidate: false,
        }
    }
}

impl MarkerLocatorParams {
    pub fn with_strategy(strategy: CandidateStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}

/// Full output of one marker-locator pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerDetection {
    /// Ordered corners, or [`Quadrilateral::SENTINEL`] on failure.
    pub quad: Quadrilateral,
    /// Every candidate the extractor produced, in discovery order.
    pub candidates: Vec<Candidate>,
    /// Candidates confirmed by the square filter, in discovery order.
    pub markers: MarkerSet,
    /// Whether the binarized frame contained a square-like contour.
    pub square_found: bool,
}

impl MarkerDetection {
    pub fn is_found(&self) -> bool {
        !self.quad.is_sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_uses_snake_case_names() {
        let json = serde_json::to_string(&CandidateStrategy::HoughCircles).unwrap();
        assert_eq!(json, "\"hough_circles\"");
        let back: CandidateStrategy = serde_json::from_str("\"ellipse_fit\"").unwrap();
        assert_eq!(back, CandidateStrategy::EllipseFit);
    }

    #[test]
    fn partial_params_fill_defaults() {
        let params: MarkerLocatorParams =
            serde_json::from_str(r#"{"strategy":"hough_circles","band_height":120}"#).unwrap();
        assert_eq!(params.strategy, CandidateStrategy::HoughCircles);
        assert_eq!(params.band_height, 120);
        assert_eq!(params.hough, HoughParams::default());
        assert_eq!(params.shape_filter.binary_threshold, 100);
        assert!(!params.rescan_per_candidate);
    }
}
