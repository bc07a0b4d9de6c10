use serde::{Deserialize, Serialize};

use quadscan_core::Quadrilateral;

/// Parameters for [`crate::OutlineLocator`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineParams {
    /// Square blur kernel applied after grayscale conversion.
    pub blur_kernel: usize,
    /// Canny hysteresis thresholds.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub poly_epsilon_frac: f64,
    /// The four-vertex polygon must enclose strictly more than this (px²).
    pub min_area: f64,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            blur_kernel: quadscan_core::BLUR_KERNEL,
            canny_low: 35.0,
            canny_high: 125.0,
            poly_epsilon_frac: 0.02,
            min_area: 800.0,
        }
    }
}

/// Full output of one outline-locator pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlineDetection {
    /// Accepted outline, vertices in contour order.
    pub quad: Option<Quadrilateral>,
    /// Number of edge contours examined.
    pub contours_scanned: usize,
    /// Area of the best four-vertex polygon, accepted or not.
    pub best_area: Option<f64>,
}

impl OutlineDetection {
    pub fn is_found(&self) -> bool {
        self.quad.is_some()
    }
}
