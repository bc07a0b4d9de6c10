//! End-to-end checks on rendered frames.
//!
//! A marker is a white disk of radius 19 on black with a dark 23x23 square
//! centered inside it, so every marker carries its own square.

use image::{GrayImage, Luma, RgbImage};
use quadscan::detect::{frame_from_gray, frame_from_rgb};
use quadscan::marker::{has_embedded_square, MarkerDetection, ShapeFilterParams};
use quadscan::{
    locate_by_markers, locate_by_outline, CandidateStrategy, LocateConfig, LocateMode, Locator,
    MarkerLocator, MarkerLocatorParams, Point, Quadrilateral,
};

const W: u32 = 700;
const H: u32 = 800;
const RADIUS: i32 = 19;
const INNER_HALF: i32 = 11;

const CORNERS: [(i32, i32); 4] = [(100, 100), (500, 110), (110, 700), (520, 690)];
const STRATEGIES: [CandidateStrategy; 2] =
    [CandidateStrategy::EllipseFit, CandidateStrategy::HoughCircles];

fn render_disks(centers: &[(i32, i32)]) -> GrayImage {
    let mut img = GrayImage::new(W, H);
    for &(cx, cy) in centers {
        for y in (cy - RADIUS)..=(cy + RADIUS) {
            for x in (cx - RADIUS)..=(cx + RADIUS) {
                if (x - cx).pow(2) + (y - cy).pow(2) <= RADIUS * RADIUS {
                    img.put_pixel(x as u32, y as u32, Luma([255]));
                }
            }
        }
    }
    img
}

fn render_markers(centers: &[(i32, i32)]) -> GrayImage {
    let mut img = render_disks(centers);
    for &(cx, cy) in centers {
        for y in (cy - INNER_HALF)..=(cy + INNER_HALF) {
            for x in (cx - INNER_HALF)..=(cx + INNER_HALF) {
                img.put_pixel(x as u32, y as u32, Luma([0]));
            }
        }
    }
    img
}

fn locate_with(img: &GrayImage, strategy: CandidateStrategy) -> MarkerDetection {
    let frame = frame_from_gray(img).unwrap();
    MarkerLocator::new(MarkerLocatorParams::with_strategy(strategy))
        .locate_detailed(&frame)
        .unwrap()
}

fn assert_near(got: Point, want: (i32, i32), tol: f64) {
    let want = Point::from(want);
    assert!(got.distance(want) <= tol, "got {got:?}, want {want:?}");
}

fn nearest(quad: &Quadrilateral, target: (i32, i32)) -> Point {
    let target = Point::from(target);
    quad.points()
        .iter()
        .copied()
        .min_by_key(|p| p.distance_sq(target))
        .unwrap()
}

#[test]
fn blank_frame_is_not_located() {
    let img = GrayImage::new(W, H);
    let frame = frame_from_gray(&img).unwrap();
    assert_eq!(locate_by_markers(&frame).unwrap(), Quadrilateral::SENTINEL);
    assert_eq!(locate_by_outline(&frame).unwrap(), None);
}

#[test]
fn disks_alone_are_not_markers() {
    let img = render_disks(&CORNERS);
    assert!(!has_embedded_square(
        &quadscan::core::threshold(&img, 100, 255),
        &ShapeFilterParams::default()
    ));
    let frame = frame_from_gray(&img).unwrap();
    assert!(locate_by_markers(&frame).unwrap().is_sentinel());
}

#[test]
fn each_marker_is_counted_once() {
    let det = locate_with(&render_markers(&CORNERS), CandidateStrategy::EllipseFit);
    assert!(det.square_found);
    assert_eq!(det.markers.len(), 4, "{:?}", det.markers);
    let pts = det.markers.as_slice();
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            assert!(a.distance(*b) > 2.0 * RADIUS as f64, "{a:?} and {b:?}");
        }
    }
}

#[test]
fn four_markers_come_back_in_band_order() {
    let img = render_markers(&[CORNERS[3], CORNERS[0], CORNERS[2], CORNERS[1]]);
    for strategy in STRATEGIES {
        let quad = locate_with(&img, strategy).quad;
        assert!(!quad.is_sentinel(), "{strategy:?}");
        let [a, b, c, d] = *quad.points();
        assert_near(a, CORNERS[0], 2.0);
        assert_near(b, CORNERS[1], 2.0);
        assert_near(c, CORNERS[2], 2.0);
        assert_near(d, CORNERS[3], 2.0);
    }
}

#[test]
fn single_band_orders_by_x_only() {
    let img = render_markers(&CORNERS);
    let frame = frame_from_gray(&img).unwrap();
    let params = MarkerLocatorParams {
        band_height: 1000,
        ..MarkerLocatorParams::default()
    };
    let quad = MarkerLocator::new(params).locate(&frame).unwrap();
    let xs: Vec<i32> = quad.points().iter().map(|p| p.x).collect();
    let mut sorted = xs.clone();
    sorted.sort();
    assert_eq!(xs, sorted);
}

#[test]
fn three_markers_recover_the_fourth_corner() {
    let img = render_markers(&CORNERS[..3]);
    for strategy in STRATEGIES {
        let det = locate_with(&img, strategy);
        assert_eq!(det.markers.len(), 3, "{strategy:?}: {:?}", det.markers);

        // (500,110)-(110,700) is the farthest pair; (100,100) is reflected.
        let quad = det.quad;
        let p1 = nearest(&quad, CORNERS[1]);
        let p2 = nearest(&quad, CORNERS[2]);
        let p3 = nearest(&quad, CORNERS[0]);
        let p4 = nearest(&quad, (510, 710));
        assert_near(p3, CORNERS[0], 2.0);
        assert_eq!(p4, Point::new(p1.x + p2.x - p3.x, p1.y + p2.y - p3.y));
        assert_near(p4, (510, 710), 6.0);
    }
}

#[test]
fn more_than_four_markers_keep_the_first_four() {
    let img = render_markers(&[CORNERS[0], CORNERS[1], (300, 400), CORNERS[2], CORNERS[3]]);
    for strategy in STRATEGIES {
        let det = locate_with(&img, strategy);
        assert_eq!(det.markers.len(), 5, "{strategy:?}: {:?}", det.markers);

        let first_four = &det.markers.as_slice()[..4];
        for p in det.quad.points() {
            assert!(first_four.contains(p), "{strategy:?}: {p:?} not among {first_four:?}");
        }
        assert!(!det.quad.points().contains(&det.markers.as_slice()[4]));
    }
}

#[test]
fn ellipse_discovery_order_drops_the_lowest_marker() {
    let img = render_markers(&[CORNERS[0], CORNERS[1], (300, 400), CORNERS[2], CORNERS[3]]);
    let det = locate_with(&img, CandidateStrategy::EllipseFit);
    // Outer borders are traced top to bottom; (110,700) starts lowest.
    assert_near(det.markers.as_slice()[4], CORNERS[2], 2.0);
    let [a, b, c, d] = *det.quad.points();
    assert_near(a, CORNERS[0], 2.0);
    assert_near(b, (300, 400), 2.0);
    assert_near(c, CORNERS[1], 2.0);
    assert_near(d, CORNERS[3], 2.0);
}

#[test]
fn locate_is_idempotent() {
    let img = render_markers(&CORNERS);
    let frame = frame_from_gray(&img).unwrap();
    let locator = Locator::new(&LocateConfig::default());
    let first = locator.locate(&frame).unwrap();
    let second = locator.locate(&frame).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rgb_and_gray_frames_agree() {
    let gray = render_markers(&CORNERS);
    let rgb = RgbImage::from_fn(W, H, |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        image::Rgb([v, v, v])
    });
    let a = locate_by_markers(&frame_from_gray(&gray).unwrap()).unwrap();
    let b = locate_by_markers(&frame_from_rgb(&rgb).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn outline_prefers_the_large_quadrilateral() {
    let mut img = GrayImage::new(320, 240);
    let mut fill = |x0: u32, y0: u32, w: u32, h: u32| {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Luma([255]));
            }
        }
    };
    fill(60, 50, 200, 150);
    fill(10, 10, 25, 25);
    fill(285, 205, 20, 20);

    let config = LocateConfig {
        mode: LocateMode::Outline,
        ..LocateConfig::default()
    };
    let located = Locator::new(&config)
        .locate(&frame_from_gray(&img).unwrap())
        .unwrap();
    let quad = located.quad().expect("outline");
    for corner in [(60, 50), (259, 50), (259, 199), (60, 199)] {
        assert_near(nearest(&quad, corner), corner, 4.0);
    }
}

#[test]
fn outline_below_minimum_area_is_none() {
    let mut img = GrayImage::new(120, 120);
    for y in 50..70 {
        for x in 50..70 {
            img.put_pixel(x, y, Luma([255]));
        }
    }
    assert_eq!(locate_by_outline(&frame_from_gray(&img).unwrap()).unwrap(), None);
}
