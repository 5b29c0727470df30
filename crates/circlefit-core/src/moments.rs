//! Centroid and normalized central-moment accumulation.
//!
//! The Newton-style estimators work entirely on the six second- and
//! third-order sample moments of the centered point set; accumulating them
//! once keeps the estimators a single pass over the input.

use crate::{Pt2, Real};

/// Arithmetic mean of a point set.
///
/// The caller guarantees a non-empty slice; every public estimator checks the
/// point count before centering.
pub fn centroid(points: &[Pt2]) -> Pt2 {
    let n = points.len() as Real;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Pt2::new(sx / n, sy / n)
}

/// Normalized (divided by n) central moments of a point set, with
/// `z = x² + y²` of the centered coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub mxx: Real,
    pub myy: Real,
    pub mxy: Real,
    pub mxz: Real,
    pub myz: Real,
    pub mzz: Real,
}

impl Moments {
    /// Accumulate the moments of `points` centered on `centroid`.
    pub fn compute(points: &[Pt2], centroid: Pt2) -> Self {
        let mut m = Moments::default();
        for p in points {
            let x = p.x - centroid.x;
            let y = p.y - centroid.y;
            let z = x * x + y * y;
            m.mxx += x * x;
            m.myy += y * y;
            m.mxy += x * y;
            m.mxz += x * z;
            m.myz += y * z;
            m.mzz += z * z;
        }
        let n = points.len() as Real;
        m.mxx /= n;
        m.myy /= n;
        m.mxy /= n;
        m.mxz /= n;
        m.myz /= n;
        m.mzz /= n;
        m
    }

    /// Trace of the second-moment matrix, `Mxx + Myy`.
    pub fn mz(&self) -> Real {
        self.mxx + self.myy
    }

    /// Determinant of the second-moment matrix, `Mxx·Myy − Mxy²`.
    pub fn cov_xy(&self) -> Real {
        self.mxx * self.myy - self.mxy * self.mxy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_of_unit_square() {
        let pts = [
            Pt2::new(0.0, 0.0),
            Pt2::new(1.0, 0.0),
            Pt2::new(1.0, 1.0),
            Pt2::new(0.0, 1.0),
        ];
        let c = centroid(&pts);
        assert!((c.x - 0.5).abs() < 1e-15);
        assert!((c.y - 0.5).abs() < 1e-15);
    }

    #[test]
    fn moments_of_axis_aligned_cross() {
        // (±1, 0), (0, ±1): Mxx = Myy = 1/2, Mxy = 0, z ≡ 1 so Mxz = Myz = 0.
        let pts = [
            Pt2::new(1.0, 0.0),
            Pt2::new(-1.0, 0.0),
            Pt2::new(0.0, 1.0),
            Pt2::new(0.0, -1.0),
        ];
        let m = Moments::compute(&pts, centroid(&pts));
        assert!((m.mxx - 0.5).abs() < 1e-15);
        assert!((m.myy - 0.5).abs() < 1e-15);
        assert!(m.mxy.abs() < 1e-15);
        assert!(m.mxz.abs() < 1e-15);
        assert!(m.myz.abs() < 1e-15);
        assert!((m.mzz - 1.0).abs() < 1e-15);
        assert!((m.mz() - 1.0).abs() < 1e-15);
        assert!((m.cov_xy() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn moments_are_translation_invariant() {
        let pts: Vec<Pt2> = (0..7)
            .map(|i| {
                let t = i as Real;
                Pt2::new(t * t * 0.1, (t - 3.0).sin())
            })
            .collect();
        let shifted: Vec<Pt2> = pts.iter().map(|p| Pt2::new(p.x + 40.0, p.y - 9.0)).collect();

        let m0 = Moments::compute(&pts, centroid(&pts));
        let m1 = Moments::compute(&shifted, centroid(&shifted));
        assert!((m0.mxx - m1.mxx).abs() < 1e-9);
        assert!((m0.mxz - m1.mxz).abs() < 1e-9);
        assert!((m0.mzz - m1.mzz).abs() < 1e-9);
    }
}
