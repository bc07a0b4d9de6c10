use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{GrayImage, Luma};
use quadscan::detect::frame_from_gray;
use quadscan::{CandidateStrategy, MarkerLocator, MarkerLocatorParams, OutlineLocator};

const SIZES: [(u32, u32); 2] = [(640, 480), (1280, 960)];

/// Four corner markers: white disks with a dark square inside.
fn marker_frame(w: u32, h: u32) -> GrayImage {
    let (r, half) = (19i64, 11i64);
    let centers = [
        (w as i64 / 8, h as i64 / 8),
        (w as i64 * 7 / 8, h as i64 / 8),
        (w as i64 / 8, h as i64 * 3 / 4),
        (w as i64 * 7 / 8, h as i64 * 3 / 4),
    ];
    GrayImage::from_fn(w, h, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let white = centers.iter().any(|&(cx, cy)| {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= r * r && (dx.abs() > half || dy.abs() > half)
        });
        Luma([if white { 255 } else { 0 }])
    })
}

fn outline_frame(w: u32, h: u32) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let inside = x > w / 6 && x < w * 5 / 6 && y > h / 6 && y < h * 5 / 6;
        Luma([if inside { 230 } else { 20 }])
    })
}

fn bench_markers(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers");
    for (w, h) in SIZES {
        let img = marker_frame(w, h);
        for strategy in [CandidateStrategy::EllipseFit, CandidateStrategy::HoughCircles] {
            let locator = MarkerLocator::new(MarkerLocatorParams::with_strategy(strategy));
            let id = BenchmarkId::new(format!("{strategy:?}"), format!("{w}x{h}"));
            group.bench_with_input(id, &img, |b, img| {
                b.iter(|| {
                    let frame = frame_from_gray(img).unwrap();
                    black_box(locator.locate(&frame).unwrap())
                })
            });
        }
    }
    group.finish();
}

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    let locator = OutlineLocator::default();
    for (w, h) in SIZES {
        let img = outline_frame(w, h);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &img, |b, img| {
            b.iter(|| {
                let frame = frame_from_gray(img).unwrap();
                black_box(locator.locate(&frame).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_markers, bench_outline);
criterion_main!(benches);
