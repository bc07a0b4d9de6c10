//! Embedded-square discriminator.
//!
//! The check scans every contour of the whole binarized frame, not a crop
//! around the candidate, so its verdict is the same for every candidate of a
//! frame. [`SquareIndex`] computes it once and answers per candidate.

use image::GrayImage;
use quadscan_core::{approx_polygon, arc_length, bounding_rect, find_contours, ContourMode, Point};

use crate::types::ShapeFilterParams;

/// True if any contour of `binary` approximates to a 3..=5 vertex polygon
/// whose bounding box has an aspect ratio inside the accepted range.
///
/// Stops at the first match.
pub fn has_embedded_square(binary: &GrayImage, params: &ShapeFilterParams) -> bool {
    find_contours(binary, ContourMode::List)
        .iter()
        .any(|c| is_square_like(&c.points, params))
}

/// Square-likeness of a single contour.
pub fn is_square_like(contour: &[Point], params: &ShapeFilterParams) -> bool {
    if contour.is_empty() {
        return false;
    }
    let eps = params.poly_epsilon_frac * arc_length(contour, true);
    let poly = approx_polygon(contour, eps, true);
    if !(params.min_vertices..=params.max_vertices).contains(&poly.len()) {
        return false;
    }
    let Some(rect) = bounding_rect(&poly) else {
        return false;
    };
    // Zero-height boxes are "no match", not an error.
    match rect.aspect_ratio() {
        Some(ratio) => ratio >= params.min_aspect && ratio <= params.max_aspect,
        None => false,
    }
}

/// Per-frame cache of the square filter verdict.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SquareIndex {
    found: bool,
}

impl SquareIndex {
    pub fn build(binary: &GrayImage, params: &ShapeFilterParams) -> Self {
        Self {
            found: has_embedded_square(binary, params),
        }
    }

    /// Verdict for any candidate of the indexed frame.
    pub fn contains_square(&self) -> bool {
        self.found
    }
}
