//! Circular blob candidate extraction.

use image::GrayImage;
use quadscan_core::{
    find_contours, fit_ellipse, hough_circles, threshold, Candidate, ContourMode, HoughParams,
    Point,
};

use crate::types::{CandidateStrategy, EllipseFitParams, MarkerLocatorParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Run the configured extraction strategy on a blurred grayscale frame.
pub fn extract_candidates(blurred: &GrayImage, params: &MarkerLocatorParams) -> Vec<Candidate> {
    match params.strategy {
        CandidateStrategy::EllipseFit => ellipse_candidates(blurred, &params.ellipse),
        CandidateStrategy::HoughCircles => hough_candidates(blurred, &params.hough),
    }
}

/// Binarize, trace the full contour hierarchy and fit an ellipse to every
/// contour with enough points.
///
/// The candidate radius is the mean of the two semi-axes, i.e.
/// `(axis1 + axis2) / 4` with full axis lengths.
///
/// A marker's outer border and the border of its inner square fit to the
/// same center. A fit whose center lies within the radius of an already
/// emitted candidate is dropped, so each blob yields one candidate and the
/// outer border (traced first) is the one kept.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(blurred, params), fields(width = blurred.width(), height = blurred.height()))
)]
pub fn ellipse_candidates(blurred: &GrayImage, params: &EllipseFitParams) -> Vec<Candidate> {
    let binary = threshold(blurred, params.binary_threshold, u8::MAX);
    let contours = find_contours(&binary, ContourMode::Tree);
    let min_points = params.min_contour_points.max(quadscan_core::MIN_ELLIPSE_POINTS);

    let mut out = Vec::new();
    for contour in contours.iter().filter(|c| c.len() >= min_points) {
        let Some(ellipse) = fit_ellipse(&contour.points) else {
            log::trace!("ellipse fit rejected a {}-point contour", contour.len());
            continue;
        };
        let (axis1, axis2) = ellipse.axis_lengths();
        let cand = Candidate::new(
            Point::rounded(ellipse.cx, ellipse.cy),
            ((axis1 + axis2) / 4.0) as f32,
        );
        if let Some(kept) = out.iter().find(|c| is_concentric(c, &cand)) {
            log::trace!("dropping {:?}, concentric with {:?}", cand.center, kept.center);
            continue;
        }
        out.push(cand);
    }
    log::debug!(
        "ellipse strategy: {} contours, {} candidates",
        contours.len(),
        out.len()
    );
    out
}

/// `b` sits inside `a` (or `a` inside `b`): the center distance is at most
/// the larger radius.
fn is_concentric(a: &Candidate, b: &Candidate) -> bool {
    a.center.distance(b.center) <= f64::from(a.radius.max(b.radius))
}

/// Hough circle transform; every circle is a candidate.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(blurred, params), fields(width = blurred.width(), height = blurred.height()))
)]
pub fn hough_candidates(blurred: &GrayImage, params: &HoughParams) -> Vec<Candidate> {
    let out: Vec<Candidate> = hough_circles(blurred, params)
        .into_iter()
        .map(|c| Candidate::new(Point::rounded(c.x as f64, c.y as f64), c.radius))
        .collect();
    log::debug!("hough strategy: {} candidates", out.len());
    out
}
