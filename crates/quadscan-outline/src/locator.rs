use quadscan_core::{
    approx_polygon, arc_length, canny_edges, contour_area, find_contours, gaussian_blur,
    to_grayscale, ContourMode, Frame, FrameError, Point, Quadrilateral,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::{OutlineDetection, OutlineParams};

/// Largest four-vertex edge contour locator.
#[derive(Clone, Debug, Default)]
pub struct OutlineLocator {
    params: OutlineParams,
}

impl OutlineLocator {
    pub fn new(params: OutlineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OutlineParams {
        &self.params
    }

    /// Document outline, or `None` when no four-vertex contour encloses more
    /// than the minimum area.
    pub fn locate(&self, frame: &Frame<'_>) -> Result<Option<Quadrilateral>, FrameError> {
        Ok(self.locate_detailed(frame)?.quad)
    }

    /// Same as [`Self::locate`] but also reports how many contours were
    /// examined and the area of the best polygon.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn locate_detailed(&self, frame: &Frame<'_>) -> Result<OutlineDetection, FrameError> {
        frame.validate()?;
        let gray = to_grayscale(frame)?;
        let blurred = gaussian_blur(&gray, self.params.blur_kernel);
        let edges = canny_edges(&blurred, self.params.canny_low, self.params.canny_high);

        let mut contours: Vec<(f64, Vec<Point>)> = find_contours(&edges, ContourMode::List)
            .into_iter()
            .map(|c| (contour_area(&c.points), c.points))
            .collect();
        // Stable, so equal areas keep discovery order.
        contours.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut scanned = 0;
        let mut best: Option<(f64, Vec<Point>)> = None;
        for (_, points) in &contours {
            scanned += 1;
            let eps = self.params.poly_epsilon_frac * arc_length(points, true);
            let poly = approx_polygon(points, eps, true);
            if poly.len() == 4 {
                best = Some((contour_area(&poly), poly));
                break;
            }
        }

        let best_area = best.as_ref().map(|(area, _)| *area);
        let quad = best.and_then(|(area, poly)| {
            (area > self.params.min_area)
                .then(|| Quadrilateral::new([poly[0], poly[1], poly[2], poly[3]]))
        });

        log::debug!(
            "outline locator: {} contours, scanned {}, best area {:?}, found={}",
            contours.len(),
            scanned,
            best_area,
            quad.is_some()
        );

        Ok(OutlineDetection {
            quad,
            contours_scanned: scanned,
            best_area,
        })
    }
}
