//! Gradient Hough transform for small circles.
//!
//! Every Canny edge pixel votes along its gradient direction (both ways) at
//! each integer radius in `[min_radius, max_radius]`. Accumulator local
//! maxima above `param2` become centers, strongest first; centers closer than
//! `min_dist` to a stronger one are dropped. The radius of each surviving
//! center is the most supported edge distance.

use image::GrayImage;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Hough circle transform parameters (OpenCV `HOUGH_GRADIENT` naming).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Inverse accumulator resolution (1 = image resolution).
    pub dp: f64,
    /// Minimum distance between detected centers (pixels).
    pub min_dist: f64,
    /// Upper Canny threshold; the lower one is half of it.
    pub param1: f64,
    /// Accumulator threshold a center must exceed.
    pub param2: f64,
    pub min_radius: u32,
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1.0,
            min_dist: 20.0,
            param1: 50.0,
            param2: 30.0,
            min_radius: 1,
            max_radius: 20,
        }
    }
}

/// One detected circle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub votes: u32,
}

/// Detect circles in a (blurred) grayscale image.
///
/// Returns circles sorted by accumulator votes, highest first; ties keep
/// raster order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(gray, params), fields(width = gray.width(), height = gray.height()))
)]
pub fn hough_circles(gray: &GrayImage, params: &HoughParams) -> Vec<HoughCircle> {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 || params.dp < 1.0 || params.max_radius < params.min_radius {
        return Vec::new();
    }
    let min_r = params.min_radius.max(1);
    let max_r = params.max_radius.max(min_r);

    let high = params.param1 as f32;
    let edges = imageproc::edges::canny(gray, high * 0.5, high);
    let gx = imageproc::gradients::horizontal_sobel(gray);
    let gy = imageproc::gradients::vertical_sobel(gray);

    let dp = params.dp as f32;
    let aw = ((w as f32) / dp).ceil() as usize;
    let ah = ((h as f32) / dp).ceil() as usize;
    let mut accum = vec![0u32; aw * ah];

    for (x, y, e) in edges.enumerate_pixels() {
        if e.0[0] == 0 {
            continue;
        }
        let gxv = gx.get_pixel(x, y).0[0] as f32;
        let gyv = gy.get_pixel(x, y).0[0] as f32;
        let mag = (gxv * gxv + gyv * gyv).sqrt();
        if mag < 1e-6 {
            continue;
        }
        let (dx, dy) = (gxv / mag, gyv / mag);
        let (xf, yf) = (x as f32, y as f32);
        for r in min_r..=max_r {
            let r = r as f32;
            for sign in [1.0f32, -1.0] {
                let vx = ((xf + sign * dx * r) / dp).round();
                let vy = ((yf + sign * dy * r) / dp).round();
                if vx < 0.0 || vy < 0.0 || vx >= aw as f32 || vy >= ah as f32 {
                    continue;
                }
                accum[vy as usize * aw + vx as usize] += 1;
            }
        }
    }

    let threshold = params.param2.max(0.0);
    let mut centers = Vec::new();
    for y in 1..ah.saturating_sub(1) {
        for x in 1..aw.saturating_sub(1) {
            let idx = y * aw + x;
            let v = accum[idx];
            if (v as f64) > threshold
                && v > accum[idx - 1]
                && v >= accum[idx + 1]
                && v > accum[idx - aw]
                && v >= accum[idx + aw]
            {
                centers.push((x, y, v));
            }
        }
    }
    centers.sort_by(|a, b| b.2.cmp(&a.2));
    log::trace!("hough: {} accumulator peaks above {}", centers.len(), threshold);

    let min_dist_sq = (params.min_dist * params.min_dist) as f32;
    let mut out: Vec<HoughCircle> = Vec::new();
    for (ax, ay, votes) in centers {
        let cx = ax as f32 * dp;
        let cy = ay as f32 * dp;
        let crowded = out.iter().any(|c| {
            let (ddx, ddy) = (c.x - cx, c.y - cy);
            ddx * ddx + ddy * ddy < min_dist_sq
        });
        if crowded {
            continue;
        }
        if let Some(radius) = estimate_radius(&edges, cx, cy, min_r, max_r) {
            out.push(HoughCircle {
                x: cx,
                y: cy,
                radius,
                votes,
            });
        }
    }
    out
}

/// Most frequent rounded edge distance inside the radius window.
fn estimate_radius(edges: &GrayImage, cx: f32, cy: f32, min_r: u32, max_r: u32) -> Option<f32> {
    let (w, h) = edges.dimensions();
    let mut hist = vec![0u32; (max_r - min_r + 1) as usize];
    let reach = max_r as i64 + 1;
    let (icx, icy) = (cx.round() as i64, cy.round() as i64);
    let y0 = (icy - reach).max(0);
    let y1 = (icy + reach).min(h as i64 - 1);
    let x0 = (icx - reach).max(0);
    let x1 = (icx + reach).min(w as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            if edges.get_pixel(x as u32, y as u32).0[0] == 0 {
                continue;
            }
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let bin = d.round() as i64 - min_r as i64;
            if bin >= 0 && (bin as usize) < hist.len() {
                hist[bin as usize] += 1;
            }
        }
    }
    let (best, count) = hist
        .iter()
        .enumerate()
        .fold((0usize, 0u32), |acc, (i, &c)| if c > acc.1 { (i, c) } else { acc });
    (count > 0).then(|| (best as u32 + min_r) as f32)
}
