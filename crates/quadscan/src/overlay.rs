//! Draw located quadrilaterals on frames.
//!
//! Drawing never happens inside a locator; callers decide what to render.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::{Deserialize, Serialize};

use crate::core::{Point, Quadrilateral};

/// Outline color and stroke width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub color: [u8; 3],
    /// Stroke width in pixels (at least 1).
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [0, 200, 0],
            thickness: 2,
        }
    }
}

/// Copy of `img` with the closed outline `p0-p1-p2-p3-p0` drawn on it.
///
/// The marker sentinel is not drawn.
pub fn draw_quadrilateral(img: &RgbImage, quad: &Quadrilateral, style: &OverlayStyle) -> RgbImage {
    let mut out = img.clone();
    if quad.is_sentinel() {
        return out;
    }
    let color = Rgb(style.color);
    let t = style.thickness.max(1) as i32;
    let offsets = -(t / 2)..(t - t / 2);
    for (a, b) in quad.edges() {
        for dy in offsets.clone() {
            for dx in offsets.clone() {
                draw_line_segment_mut(&mut out, shifted(a, dx, dy), shifted(b, dx, dy), color);
            }
        }
    }
    out
}

fn shifted(p: Point, dx: i32, dy: i32) -> (f32, f32) {
    ((p.x + dx) as f32, (p.y + dy) as f32)
}
