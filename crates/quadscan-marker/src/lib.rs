//! Fiducial marker locator.
//!
//! A document is tagged at its corners with circular markers that carry a
//! small square inside. The locator:
//! - blurs the grayscale frame and extracts circular candidates, either by
//!   ellipse-fitting every contour or with a Hough circle transform;
//! - confirms candidates when the binarized frame holds a square-like contour;
//! - recovers a missing fourth corner from three markers, truncates extras;
//! - orders the corners by coarse horizontal bands, then by x.
//!
//! ```
//! use quadscan_core::Frame;
//! use quadscan_marker::{MarkerLocator, MarkerLocatorParams};
//!
//! let pixels = vec![0u8; 64 * 48];
//! let frame = Frame::gray(64, 48, &pixels).unwrap();
//! let quad = MarkerLocator::new(MarkerLocatorParams::default())
//!     .locate(&frame)
//!     .unwrap();
//! assert!(quad.is_sentinel());
//! ```

pub mod candidates;
mod detector;
pub mod ordering;
pub mod shape_filter;
mod types;

pub use detector::MarkerLocator;
pub use shape_filter::{has_embedded_square, SquareIndex};
pub use types::{
    CandidateStrategy, EllipseFitParams, MarkerDetection, MarkerLocatorParams, ShapeFilterParams,
};
