//! Document outline locator.
//!
//! Finds the page outline in a frame without markers: Canny edges of the
//! blurred grayscale frame are traced into contours, largest enclosed area
//! first, and the first contour that approximates to exactly four vertices
//! wins. The result is accepted only above a minimum polygon area.
//!
//! ```
//! use quadscan_core::Frame;
//! use quadscan_outline::OutlineLocator;
//!
//! let pixels = vec![0u8; 64 * 48];
//! let frame = Frame::gray(64, 48, &pixels).unwrap();
//! assert!(OutlineLocator::default().locate(&frame).unwrap().is_none());
//! ```

mod locator;
mod params;

pub use locator::OutlineLocator;
pub use params::{OutlineDetection, OutlineParams};
