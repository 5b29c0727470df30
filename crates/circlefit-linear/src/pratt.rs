//! Pratt circle fits.
//!
//! Pratt's constraint normalizes the algebraic circle so that
//! `a1² + a2² − 4·a0·a3 = 1`, which removes the small-radius bias of the
//! plain Kåsa solution. Two forms:
//! - a Newton iteration on the quartic characteristic polynomial of the
//!   moment matrix,
//! - a constrained eigenproblem built on the SVD of the centered design
//!   matrix.

use circlefit_core::{centroid, CircleFit, FitError, FitMethod, Moments, Pt2, Real};
use log::debug;
use nalgebra::{DMatrix, Matrix4, SymmetricEigen, Vector4};

use crate::algebraic;
use crate::check_point_count;
use crate::eigen::{rank_deficient, second_smallest_index};
use crate::newton::{newton_center, newton_root, NewtonConfig};

/// Fit a circle with the Pratt method in Newton form.
pub fn pratt_newton(points: &[Pt2]) -> Result<CircleFit, FitError> {
    pratt_newton_with(points, &NewtonConfig::default())
}

/// Same as [`pratt_newton`] with explicit iteration tuning.
pub fn pratt_newton_with(points: &[Pt2], config: &NewtonConfig) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::PrattNewton;
    check_point_count(METHOD, points)?;

    let c = centroid(points);
    let m = Moments::compute(points, c);
    let mz = m.mz();
    let cov = m.cov_xy();
    let mxz2 = m.mxz * m.mxz;
    let myz2 = m.myz * m.myz;

    // Characteristic quartic: y(η) = 4η⁴ + A2·η² + A1·η + A0.
    let a2 = 4.0 * cov - 3.0 * mz * mz - m.mzz;
    let a1 = m.mzz * mz + 4.0 * cov * mz - mxz2 - myz2 - mz * mz * mz;
    let a0 =
        mxz2 * m.myy + myz2 * m.mxx - m.mzz * cov - 2.0 * m.mxz * m.myz * m.mxy + mz * mz * cov;
    let a22 = a2 + a2;

    let root = newton_root(
        |x| {
            let y = a0 + x * (a1 + x * (a2 + 4.0 * x * x));
            let dy = a1 + x * (a22 + 16.0 * x * x);
            (y, dy)
        },
        config,
    )
    .ok_or(FitError::NonConvergence { method: METHOD })?;

    let (x, y) = newton_center(METHOD, root.root, &m)?;
    let radicand = x * x + y * y + mz + 2.0 * root.root;
    algebraic::from_centered(METHOD, x, y, radicand, c, root.warnings)
}

/// Fit a circle with the Pratt method in SVD form.
///
/// A rank-deficient design matrix (points on a line, which the Pratt
/// constraint can represent exactly) short-circuits to the null-space
/// solution; the line then fails parameter extraction as a singular
/// configuration rather than producing a NaN circle.
pub fn pratt_svd(points: &[Pt2]) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::PrattSvd;
    check_point_count(METHOD, points)?;

    let c = centroid(points);
    let n = points.len();
    // A thin SVD of a 3×4 design carries only three right singular vectors;
    // zero-padding to four rows keeps the full basis (and the σ₄ = 0 that
    // sends three-point input through the null-space branch) without
    // changing the decomposition.
    let mut design = DMatrix::<Real>::zeros(n.max(4), 4);
    for (i, p) in points.iter().enumerate() {
        let x = p.x - c.x;
        let y = p.y - c.y;
        design[(i, 0)] = x * x + y * y;
        design[(i, 1)] = x;
        design[(i, 2)] = y;
        design[(i, 3)] = 1.0;
    }

    let svd = design.svd(false, true);
    let v_t = svd.v_t.as_ref().ok_or(FitError::SingularConfiguration {
        method: METHOD,
        detail: "svd did not produce right singular vectors",
    })?;
    let sv = &svd.singular_values;
    // V as a fixed-size matrix; right singular vectors are v_t's rows.
    let v = Matrix4::from_fn(|r, col| v_t[(col, r)]);

    let coeffs: Vector4<Real> = if rank_deficient(sv.as_slice()) {
        debug!("pratt-svd: rank-deficient design matrix, taking null-space solution");
        Vector4::from_fn(|r, _| v_t[(3, r)])
    } else {
        let s = Matrix4::from_diagonal(&Vector4::from_iterator(sv.iter().copied()));
        let w = v * s;

        // Inverse of the Pratt constraint matrix B.
        let binv = Matrix4::new(
            0.0, 0.0, 0.0, -0.5, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            -0.5, 0.0, 0.0, 0.0,
        );
        // Wᵀ·B⁻¹·W is symmetric because B⁻¹ is.
        let eig = SymmetricEigen::new(w.transpose() * binv * w);

        // The Pratt solution is the eigenvector of the second-smallest
        // eigenvalue, not the smallest.
        let idx = second_smallest_index(eig.eigenvalues.as_slice());
        let a = eig.eigenvectors.column(idx).into_owned();

        let s_inv = Matrix4::from_diagonal(&Vector4::from_iterator(sv.iter().map(|s| 1.0 / s)));
        v * s_inv * a
    };

    algebraic::from_coefficients(METHOD, &coeffs, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use circlefit_core::synthetic::circle_points;

    #[test]
    fn newton_recovers_a_perfect_circle() {
        let pts = circle_points(Pt2::new(-4.0, 2.5), 3.0, 16);
        let fit = pratt_newton(&pts).unwrap();
        assert!((fit.center.x + 4.0).abs() < 1e-9);
        assert!((fit.center.y - 2.5).abs() < 1e-9);
        assert!((fit.radius - 3.0).abs() < 1e-9);
    }

    #[test]
    fn svd_recovers_a_perfect_circle() {
        let pts = circle_points(Pt2::new(1.0, 1.0), 0.5, 10);
        let fit = pratt_svd(&pts).unwrap();
        assert!((fit.center.x - 1.0).abs() < 1e-9);
        assert!((fit.center.y - 1.0).abs() < 1e-9);
        assert!((fit.radius - 0.5).abs() < 1e-9);
    }

    #[test]
    fn svd_fits_three_points_exactly() {
        // Minimal valid input; the circumcircle of these points is the unit
        // circle.
        let pts = [Pt2::new(1.0, 0.0), Pt2::new(0.0, 1.0), Pt2::new(-1.0, 0.0)];
        let fit = pratt_svd(&pts).unwrap();
        assert!(fit.center.x.abs() < 1e-9);
        assert!(fit.center.y.abs() < 1e-9);
        assert!((fit.radius - 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_fail_both_forms() {
        let pts = [
            Pt2::new(0.0, 1.0),
            Pt2::new(1.0, 2.0),
            Pt2::new(2.0, 3.0),
            Pt2::new(3.0, 4.0),
        ];
        assert!(matches!(
            pratt_newton(&pts).unwrap_err(),
            FitError::SingularConfiguration { .. }
        ));
        assert!(matches!(
            pratt_svd(&pts).unwrap_err(),
            FitError::SingularConfiguration { .. }
        ));
    }
}
