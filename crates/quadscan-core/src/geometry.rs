//! Planar geometry on integer contours.

use imageproc::point::Point as PixelPoint;
use serde::{Deserialize, Serialize};

use crate::Point;

/// Axis-aligned pixel extent. A single pixel has width and height 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingRect {
    /// `width / height`, or `None` for a zero-height box.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }
}

/// Smallest upright rectangle containing all points.
pub fn bounding_rect(points: &[Point]) -> Option<BoundingRect> {
    let first = points.first()?;
    let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    Some(BoundingRect {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    })
}

fn pixel_points(points: &[Point]) -> Vec<PixelPoint<i32>> {
    points.iter().map(|p| PixelPoint::new(p.x, p.y)).collect()
}

/// Length of the polyline, including the closing segment when `closed`.
pub fn arc_length(points: &[Point], closed: bool) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    imageproc::geometry::arc_length(&pixel_points(points), closed)
}

/// Unsigned area enclosed by the polygon.
pub fn contour_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    imageproc::geometry::contour_area(&pixel_points(points))
}

/// Douglas-Peucker polygon approximation.
///
/// For closed curves the split anchors are two mutually far points of the
/// curve rather than its first and last sample, so the result does not depend
/// on where border tracing started. `imageproc::geometry::approximate_polygon_dp`
/// anchors a closed curve on adjacent points and panics when `epsilon <= 0`;
/// here a non-positive `epsilon` keeps every non-collinear point.
pub fn approx_polygon(points: &[Point], epsilon: f64, closed: bool) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    if !closed {
        return simplify(points, epsilon);
    }

    let b = farthest_from(points, 0);
    let a = farthest_from(points, b);
    let b = farthest_from(points, a);
    if a == b {
        return vec![points[a]];
    }

    // Rotate so the first anchor leads, then split at the second.
    let rotated: Vec<Point> = points[a..].iter().chain(&points[..a]).copied().collect();
    let split = (b + n - a) % n;

    let mut out = simplify(&rotated[..=split], epsilon);
    out.pop();
    let mut tail: Vec<Point> = rotated[split..].to_vec();
    tail.push(rotated[0]);
    let mut second = simplify(&tail, epsilon);
    second.pop();
    out.extend(second);
    out
}

fn farthest_from(points: &[Point], idx: usize) -> usize {
    let origin = points[idx];
    let mut best = idx;
    let mut best_d = -1i64;
    for (i, p) in points.iter().enumerate() {
        let d = origin.distance_sq(*p);
        if d > best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// Open-curve Douglas-Peucker; both endpoints are always kept.
fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((lo, hi)) = stack.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let mut dmax = 0.0;
        let mut index = lo;
        for (i, p) in points.iter().enumerate().take(hi).skip(lo + 1) {
            let d = segment_distance(*p, points[lo], points[hi]);
            if d > dmax {
                dmax = d;
                index = i;
            }
        }
        if dmax > epsilon {
            keep[index] = true;
            stack.push((lo, index));
            stack.push((index, hi));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Distance from `p` to the line through `a` and `b` (to `a` if they coincide).
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-12 {
        return p.distance(a);
    }
    let cross = dx * (p.y - a.y) as f64 - dy * (p.x - a.x) as f64;
    cross.abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Pixel border of an axis-aligned rectangle, traced clockwise from the
    /// top-left corner like a border follower would.
    fn rect_border(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
        let mut pts = Vec::new();
        for x in x0..x1 {
            pts.push(Point::new(x, y0));
        }
        for y in y0..y1 {
            pts.push(Point::new(x1, y));
        }
        for x in (x0 + 1..=x1).rev() {
            pts.push(Point::new(x, y1));
        }
        for y in (y0 + 1..=y1).rev() {
            pts.push(Point::new(x0, y));
        }
        pts
    }

    #[test]
    fn rectangle_border_approximates_to_four_corners() {
        let border = rect_border(10, 20, 70, 50);
        let eps = 0.02 * arc_length(&border, true);
        let mut poly = approx_polygon(&border, eps, true);
        assert_eq!(poly.len(), 4);
        poly.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            poly,
            vec![
                Point::new(10, 20),
                Point::new(70, 20),
                Point::new(10, 50),
                Point::new(70, 50)
            ]
        );
    }

    #[test]
    fn circle_border_keeps_many_vertices() {
        let border: Vec<Point> = (0..200)
            .map(|k| {
                let t = k as f64 / 200.0 * std::f64::consts::TAU;
                Point::rounded(100.0 + 40.0 * t.cos(), 100.0 + 40.0 * t.sin())
            })
            .collect();
        let eps = 0.02 * arc_length(&border, true);
        let poly = approx_polygon(&border, eps, true);
        assert!(poly.len() > 5, "got {} vertices", poly.len());
    }

    #[test]
    fn area_and_perimeter_of_rectangle() {
        let corners = [
            Point::new(0, 0),
            Point::new(40, 0),
            Point::new(40, 30),
            Point::new(0, 30),
        ];
        assert_relative_eq!(contour_area(&corners), 1200.0);
        assert_relative_eq!(arc_length(&corners, true), 140.0);
        assert_relative_eq!(arc_length(&corners, false), 110.0);
        let mut reversed = corners;
        reversed.reverse();
        assert_relative_eq!(contour_area(&reversed), 1200.0);
        assert_relative_eq!(contour_area(&corners[..2]), 0.0);
    }

    #[test]
    fn zero_epsilon_keeps_the_corners() {
        let border = rect_border(0, 0, 12, 8);
        let mut poly = approx_polygon(&border, 0.0, true);
        poly.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            poly,
            vec![
                Point::new(0, 0),
                Point::new(12, 0),
                Point::new(0, 8),
                Point::new(12, 8)
            ]
        );
    }

    #[test]
    fn bounding_rect_is_inclusive() {
        let r = bounding_rect(&[Point::new(3, 4)]).unwrap();
        assert_eq!((r.width, r.height), (1, 1));
        let r = bounding_rect(&[Point::new(3, 4), Point::new(12, 6)]).unwrap();
        assert_eq!(
            r,
            BoundingRect {
                x: 3,
                y: 4,
                width: 10,
                height: 3
            }
        );
        assert!(bounding_rect(&[]).is_none());
    }

    #[test]
    fn zero_height_box_has_no_aspect_ratio() {
        let r = BoundingRect {
            x: 0,
            y: 0,
            width: 5,
            height: 0,
        };
        assert_eq!(r.aspect_ratio(), None);
    }
}
