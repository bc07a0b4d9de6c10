//! Least-squares ellipse fitting for contour points.
//!
//! The conic `A x² + B xy + C y² + D x + E y + F = 0` is fitted as the
//! eigenvector of the smallest eigenvalue of the (normalized) scatter matrix,
//! which is exact for five points and least-squares for more. Results that
//! are not proper ellipses are rejected.

use nalgebra::{Matrix3, Matrix6, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::Point;

/// Minimum number of points [`fit_ellipse`] accepts.
pub const MIN_ELLIPSE_POINTS: usize = 5;

/// Geometric ellipse parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Semi-major axis length.
    pub a: f64,
    /// Semi-minor axis length.
    pub b: f64,
    /// Rotation angle of the major axis from +x, in radians (−π/2, π/2].
    pub angle: f64,
}

impl Ellipse {
    /// Full axis lengths `(2a, 2b)`.
    pub fn axis_lengths(&self) -> (f64, f64) {
        (2.0 * self.a, 2.0 * self.b)
    }

    /// Check basic validity: positive semi-axes, finite values.
    pub fn is_valid(&self) -> bool {
        self.a > 0.0
            && self.b > 0.0
            && self.a.is_finite()
            && self.b.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.angle.is_finite()
    }
}

/// Fit an ellipse to contour points.
///
/// Returns `None` for fewer than [`MIN_ELLIPSE_POINTS`] points, degenerate
/// point sets (collinear, repeated) and fits that are hyperbolas or parabolas.
pub fn fit_ellipse(points: &[Point]) -> Option<Ellipse> {
    if points.len() < MIN_ELLIPSE_POINTS {
        return None;
    }
    let pts: Vec<[f64; 2]> = points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let (mean_x, mean_y, scale) = normalization_params(&pts);

    let mut scatter = Matrix6::<f64>::zeros();
    for &[px, py] in &pts {
        let x = (px - mean_x) * scale;
        let y = (py - mean_y) * scale;
        let row = [x * x, x * y, y * y, x, y, 1.0];
        for i in 0..6 {
            for j in 0..6 {
                scatter[(i, j)] += row[i] * row[j];
            }
        }
    }

    let eig = SymmetricEigen::new(scatter);
    let (min_idx, _) = eig
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    let v = eig.eigenvectors.column(min_idx);
    let norm = [v[0], v[1], v[2], v[3], v[4], v[5]];

    // Classify in normalized coordinates, where the coefficient vector has
    // unit norm, then map the geometry back to pixels.
    let e = conic_to_ellipse(&norm)?;
    let ellipse = Ellipse {
        cx: mean_x + e.cx / scale,
        cy: mean_y + e.cy / scale,
        a: e.a / scale,
        b: e.b / scale,
        angle: e.angle,
    };
    ellipse.is_valid().then_some(ellipse)
}

/// Shift to the centroid and scale so the mean distance is √2.
fn normalization_params(points: &[[f64; 2]]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let mean_x: f64 = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y: f64 = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mean_dist: f64 = points
        .iter()
        .map(|p| ((p[0] - mean_x).powi(2) + (p[1] - mean_y).powi(2)).sqrt())
        .sum::<f64>()
        / n;

    let scale = if mean_dist > 1e-15 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    (mean_x, mean_y, scale)
}

/// Convert general conic coefficients to geometric ellipse parameters.
fn conic_to_ellipse(coeffs: &[f64; 6]) -> Option<Ellipse> {
    let [a, b, c, d, e, f] = *coeffs;

    let quad_scale = a * a + b * b + c * c;
    let disc = b * b - 4.0 * a * c;
    if quad_scale < 1e-300 || disc >= -1e-9 * quad_scale {
        return None;
    }

    let m = Matrix3::new(
        a,
        b / 2.0,
        d / 2.0,
        b / 2.0,
        c,
        e / 2.0,
        d / 2.0,
        e / 2.0,
        f,
    );
    let coeff_scale = coeffs.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if m.determinant().abs() < 1e-12 * coeff_scale.powi(3).max(1e-300) {
        return None;
    }

    let denom = -disc;
    let cx = (b * e - 2.0 * c * d) / denom;
    let cy = (b * d - 2.0 * a * e) / denom;

    let angle = if (a - c).abs() < 1e-15 {
        if b > 0.0 {
            std::f64::consts::FRAC_PI_4
        } else if b < 0.0 {
            -std::f64::consts::FRAC_PI_4
        } else {
            0.0
        }
    } else {
        0.5 * b.atan2(a - c)
    };

    let sum = a + c;
    let diff = ((a - c).powi(2) + b * b).sqrt();
    let lambda1 = (sum + diff) / 2.0;
    let lambda2 = (sum - diff) / 2.0;

    let f_center = a * cx * cx + b * cx * cy + c * cy * cy + d * cx + e * cy + f;
    if f_center.abs() < 1e-12 * coeff_scale {
        return None;
    }

    let a_sq = -f_center / lambda1;
    let b_sq = -f_center / lambda2;
    if a_sq <= 0.0 || b_sq <= 0.0 {
        return None;
    }

    let (semi_a, semi_b) = (a_sq.sqrt(), b_sq.sqrt());
    let (semi_a, semi_b, angle) = if semi_a >= semi_b {
        (semi_a, semi_b, angle)
    } else {
        (semi_b, semi_a, angle + std::f64::consts::FRAC_PI_2)
    };

    Some(Ellipse {
        cx,
        cy,
        a: semi_a,
        b: semi_b,
        angle: normalize_angle(angle),
    })
}

fn normalize_angle(mut t: f64) -> f64 {
    use std::f64::consts::PI;
    while t <= -PI / 2.0 {
        t += PI;
    }
    while t > PI / 2.0 {
        t -= PI;
    }
    t
}
