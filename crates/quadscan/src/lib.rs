//! High-level facade crate for the `quadscan-*` workspace.
//!
//! This crate provides:
//! - re-exports of the locator crates;
//! - one-call helpers, [`locate_by_markers`] and [`locate_by_outline`];
//! - a config-driven [`Locator`] that runs either mode;
//! - JSON config and report files ([`io`]);
//! - (feature `image`) helpers from `image` buffers and a pure overlay drawer.
//!
//! ## Quickstart
//!
//! ```no_run
//! use quadscan::{detect, LocateConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("frame.png")?;
//! let located = detect::locate_in_image(&img, &LocateConfig::default())?;
//! println!("found: {}, corners: {:?}", located.is_found(), located.quad());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `quadscan::core`: points, frames, image primitives, logging setup.
//! - `quadscan::marker`: corner-marker locator (circles with an inner square).
//! - `quadscan::outline`: largest four-vertex outline locator.
//! - `quadscan::detect` (feature `image`): end-to-end helpers from `image` types.
//! - `quadscan::overlay` (feature `image`): draw a located quadrilateral.

pub use quadscan_core as core;
pub use quadscan_marker as marker;
pub use quadscan_outline as outline;

pub use quadscan_core::{Frame, FrameError, PixelLayout, Point, Quadrilateral};
pub use quadscan_marker::{CandidateStrategy, MarkerLocator, MarkerLocatorParams};
pub use quadscan_outline::{OutlineLocator, OutlineParams};

pub mod io;
mod locator;

#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod overlay;

pub use io::{ConfigError, LocateConfig, LocateReport};
pub use locator::{LocateMode, Located, Locator};

/// Marker locator with default parameters.
///
/// Returns [`Quadrilateral::SENTINEL`] when fewer than three markers are
/// confirmed.
pub fn locate_by_markers(frame: &Frame<'_>) -> Result<Quadrilateral, FrameError> {
    MarkerLocator::default().locate(frame)
}

/// Outline locator with default parameters.
pub fn locate_by_outline(frame: &Frame<'_>) -> Result<Option<Quadrilateral>, FrameError> {
    OutlineLocator::default().locate(frame)
}
