//! Core types and image primitives for locating documents in video frames.
//!
//! This crate holds the data model shared by the detectors (points,
//! candidates, quadrilaterals, frames) and a thin adapter over `image` /
//! `imageproc` that provides the primitives the detectors are written
//! against, including the pieces `imageproc` lacks: ellipse fitting, a
//! gradient Hough circle transform and closed-curve polygon approximation.
//!
//! Nothing here keeps state between calls.

pub mod conic;
mod error;
mod frame;
pub mod geometry;
pub mod hough;
pub mod imaging;
mod logger;
mod types;

pub use conic::{fit_ellipse, Ellipse, MIN_ELLIPSE_POINTS};
pub use error::FrameError;
pub use frame::{Frame, PixelLayout};
pub use geometry::{approx_polygon, arc_length, bounding_rect, contour_area, BoundingRect};
pub use hough::{hough_circles, HoughCircle, HoughParams};
pub use imaging::{
    canny_edges, find_contours, gaussian_blur, threshold, to_grayscale, Contour, ContourMode,
    BLUR_KERNEL,
};
pub use types::{Candidate, MarkerSet, Point, Quadrilateral};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_name, init_with_level, parse_level, LOG_ENV};
