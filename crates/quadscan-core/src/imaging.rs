//! Thin adapter over `image` / `imageproc` exposing the primitives the
//! locators are written against.
//!
//! Geometry helpers (polygon approximation, area, bounding boxes) live in
//! [`crate::geometry`]; ellipse fitting and the Hough transform in
//! [`crate::conic`] and [`crate::hough`].

use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba};
use imageproc::contours::BorderType;
use imageproc::contrast::ThresholdType;

use crate::{Frame, FrameError, PixelLayout, Point};

/// Which borders [`find_contours`] reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContourMode {
    /// Every border, no hierarchy.
    List,
    /// Every border with parent links.
    Tree,
}

/// A traced border: every border pixel in tracing order.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub is_hole: bool,
    /// Index of the enclosing border (only populated in [`ContourMode::Tree`]).
    pub parent: Option<usize>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Kernel size of the blur applied before candidate extraction.
pub const BLUR_KERNEL: usize = 5;

/// Sigma OpenCV derives for a given odd kernel size when sigma is left at 0.
pub fn auto_sigma(kernel: usize) -> f32 {
    let k = kernel.max(1) as f32;
    0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
}

/// Convert a validated frame to an 8-bit luminance image.
pub fn to_grayscale(frame: &Frame<'_>) -> Result<GrayImage, FrameError> {
    frame.validate()?;
    let (w, h) = (frame.width as u32, frame.height as u32);
    let too_short = || FrameError::BufferLength {
        expected: frame.width * frame.height * frame.layout.channels(),
        got: frame.data.len(),
    };
    let gray = match frame.layout {
        PixelLayout::Gray => {
            GrayImage::from_raw(w, h, frame.data.to_vec()).ok_or_else(too_short)?
        }
        PixelLayout::Rgb => {
            let view = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(w, h, frame.data)
                .ok_or_else(too_short)?;
            image::imageops::grayscale(&view)
        }
        PixelLayout::Rgba => {
            let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(w, h, frame.data)
                .ok_or_else(too_short)?;
            image::imageops::grayscale(&view)
        }
    };
    Ok(gray)
}

/// Gaussian blur with a square `kernel` and automatic sigma.
pub fn gaussian_blur(gray: &GrayImage, kernel: usize) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(gray, auto_sigma(kernel))
}

/// Binary threshold: pixels strictly above `level` become `max`, the rest 0.
pub fn threshold(gray: &GrayImage, level: u8, max: u8) -> GrayImage {
    let mut out = imageproc::contrast::threshold(gray, level, ThresholdType::Binary);
    if max != u8::MAX {
        for Luma([v]) in out.pixels_mut() {
            if *v != 0 {
                *v = max;
            }
        }
    }
    out
}

/// Canny edge map (edges are 255).
pub fn canny_edges(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    imageproc::edges::canny(gray, low, high)
}

/// Trace the borders of all non-zero regions.
///
/// Contours come back in raster discovery order.
pub fn find_contours(binary: &GrayImage, mode: ContourMode) -> Vec<Contour> {
    let raw = imageproc::contours::find_contours::<i32>(binary);
    let mut out = Vec::with_capacity(raw.len());
    for c in raw {
        out.push(Contour {
            points: c.points.iter().map(|p| Point::new(p.x, p.y)).collect(),
            is_hole: c.border_type == BorderType::Hole,
            parent: if mode == ContourMode::Tree {
                c.parent
            } else {
                None
            },
        });
    }
    out
}
