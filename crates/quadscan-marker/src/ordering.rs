//! Marker count policy and canonical corner order.

use quadscan_core::{MarkerSet, Point, Quadrilateral};

/// Apply the count policy to confirmed markers and order the result.
///
/// - fewer than 3 markers: [`Quadrilateral::SENTINEL`];
/// - 3 markers: the missing corner is recovered with [`complete_triangle`];
/// - 4 or more: the first four in discovery order.
///
/// The four corners are then sorted with [`band_order`].
pub fn quadrilateral_from_markers(markers: &MarkerSet, band_height: i32) -> Quadrilateral {
    let pts = markers.as_slice();
    let mut corners = match pts.len() {
        0..=2 => return Quadrilateral::SENTINEL,
        3 => complete_triangle([pts[0], pts[1], pts[2]]),
        _ => [pts[0], pts[1], pts[2], pts[3]],
    };
    band_order(&mut corners, band_height);
    Quadrilateral::new(corners)
}

/// Recover the fourth corner of a parallelogram from three of its corners.
///
/// The farthest pair is taken as a diagonal `(p1, p2)`; the remaining point
/// `p3` is reflected through the diagonal midpoint: `p4 = p1 + p2 - p3`.
/// Ties on the farthest distance keep the earlier pair in
/// `(0, 1), (0, 2), (1, 2)` order. Returns `[p1, p2, p3, p4]`.
pub fn complete_triangle(pts: [Point; 3]) -> [Point; 4] {
    const PAIRS: [(usize, usize, usize); 3] = [(0, 1, 2), (0, 2, 1), (1, 2, 0)];

    let mut best = PAIRS[0];
    let mut best_d = pts[0].distance_sq(pts[1]);
    for &(i, j, k) in &PAIRS[1..] {
        let d = pts[i].distance_sq(pts[j]);
        if d > best_d {
            best = (i, j, k);
            best_d = d;
        }
    }
    let (p1, p2, p3) = (pts[best.0], pts[best.1], pts[best.2]);
    let p4 = Point::new(p1.x + p2.x - p3.x, p1.y + p2.y - p3.y);
    [p1, p2, p3, p4]
}

/// Stable sort by `(y div band_height, x)`.
///
/// Points closer than `band_height` vertically can land in the same band and
/// are then ordered by x alone. Non-positive band heights are treated as 1.
pub fn band_order(points: &mut [Point], band_height: i32) {
    let band = band_height.max(1);
    points.sort_by_key(|p| (p.y.div_euclid(band), p.x));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pts: &[(i32, i32)]) -> MarkerSet {
        pts.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn too_few_markers_give_sentinel() {
        for pts in [&[][..], &[(10, 10)][..], &[(10, 10), (600, 700)][..]] {
            let quad = quadrilateral_from_markers(&set(pts), 500);
            assert!(quad.is_sentinel());
        }
    }

    #[test]
    fn right_triangle_is_completed() {
        let out = complete_triangle([
            Point::new(100, 100),
            Point::new(900, 100),
            Point::new(100, 800),
        ]);
        assert_eq!(out[0], Point::new(900, 100));
        assert_eq!(out[1], Point::new(100, 800));
        assert_eq!(out[2], Point::new(100, 100));
        assert_eq!(out[3], Point::new(900, 800));
    }

    #[test]
    fn reflection_is_exact_for_odd_sums() {
        let [p1, p2, p3, p4] =
            complete_triangle([Point::new(3, 4), Point::new(51, 9), Point::new(7, 77)]);
        assert_eq!(p4.x, p1.x + p2.x - p3.x);
        assert_eq!(p4.y, p1.y + p2.y - p3.y);
    }

    #[test]
    fn extra_markers_are_truncated_in_discovery_order() {
        let markers = set(&[(50, 900), (800, 80), (60, 70), (850, 950), (400, 400)]);
        let quad = quadrilateral_from_markers(&markers, 500);
        assert!(!quad.points().contains(&Point::new(400, 400)));
        assert_eq!(
            quad.points(),
            &[
                Point::new(60, 70),
                Point::new(800, 80),
                Point::new(50, 900),
                Point::new(850, 950),
            ]
        );
    }

    #[test]
    fn band_height_controls_row_grouping() {
        let mut pts = [Point::new(300, 40), Point::new(100, 90)];
        band_order(&mut pts, 500);
        assert_eq!(pts, [Point::new(100, 90), Point::new(300, 40)]);

        let mut pts = [Point::new(300, 40), Point::new(100, 90)];
        band_order(&mut pts, 50);
        assert_eq!(pts, [Point::new(300, 40), Point::new(100, 90)]);
    }

    #[test]
    fn band_order_is_stable_for_equal_keys() {
        let mut pts = [Point::new(5, 10), Point::new(5, 20), Point::new(1, 30)];
        band_order(&mut pts, 500);
        assert_eq!(
            pts,
            [Point::new(1, 30), Point::new(5, 10), Point::new(5, 20)]
        );
    }

    #[test]
    fn non_positive_band_height_does_not_panic() {
        let mut pts = [Point::new(2, 2), Point::new(1, 1)];
        band_order(&mut pts, 0);
        assert_eq!(pts, [Point::new(1, 1), Point::new(2, 2)]);
    }
}
