//! Taubin circle fits.
//!
//! Taubin's constraint normalizes by the gradient of the algebraic residual,
//! giving the least estimator bias of the classic family. Two forms:
//! - a Newton iteration on the cubic characteristic polynomial of the
//!   moment matrix,
//! - a direct SVD of the centered, variance-normalized design matrix (no
//!   eigenproblem needed; the smallest right singular vector is the answer).

use circlefit_core::{centroid, CircleFit, FitError, FitMethod, Moments, Pt2, Real};
use nalgebra::{DMatrix, Vector4};

use crate::algebraic;
use crate::check_point_count;
use crate::newton::{newton_center, newton_root, NewtonConfig};

/// Fit a circle with the Taubin method in Newton form.
pub fn taubin_newton(points: &[Pt2]) -> Result<CircleFit, FitError> {
    taubin_newton_with(points, &NewtonConfig::default())
}

/// Same as [`taubin_newton`] with explicit iteration tuning.
pub fn taubin_newton_with(points: &[Pt2], config: &NewtonConfig) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::TaubinNewton;
    check_point_count(METHOD, points)?;

    let c = centroid(points);
    let m = Moments::compute(points, c);
    let mz = m.mz();
    let cov = m.cov_xy();

    // Characteristic cubic: y(η) = A3·η³ + A2·η² + A1·η + A0.
    let a3 = 4.0 * mz;
    let a2 = -3.0 * mz * mz - m.mzz;
    let a1 = m.mzz * mz + 4.0 * cov * mz - m.mxz * m.mxz - m.myz * m.myz - mz * mz * mz;
    let a0 = m.mxz * m.mxz * m.myy + m.myz * m.myz * m.mxx - m.mzz * cov
        - 2.0 * m.mxz * m.myz * m.mxy
        + mz * mz * cov;
    let a22 = a2 + a2;
    let a33 = a3 + a3 + a3;

    let root = newton_root(
        |x| {
            let y = a0 + x * (a1 + x * (a2 + x * a3));
            let dy = a1 + x * (a22 + x * a33);
            (y, dy)
        },
        config,
    )
    .ok_or(FitError::NonConvergence { method: METHOD })?;

    let (x, y) = newton_center(METHOD, root.root, &m)?;
    let radicand = x * x + y * y + mz;
    algebraic::from_centered(METHOD, x, y, radicand, c, root.warnings)
}

/// Fit a circle with the Taubin method in SVD form.
///
/// The z column is centered on its mean and scaled by `2·√z̄` so the design
/// matrix is well conditioned; the scaling is undone on the resulting
/// coefficients before extraction.
pub fn taubin_svd(points: &[Pt2]) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::TaubinSvd;
    check_point_count(METHOD, points)?;

    let c = centroid(points);
    let n = points.len();

    let mut z = vec![0.0; n];
    let mut sum_z = 0.0;
    for (i, p) in points.iter().enumerate() {
        let x = p.x - c.x;
        let y = p.y - c.y;
        z[i] = x * x + y * y;
        sum_z += z[i];
    }
    let mean_z = sum_z / n as Real;
    if mean_z == 0.0 {
        return Err(FitError::SingularConfiguration {
            method: METHOD,
            detail: "all points coincide with the centroid",
        });
    }
    let scale = 2.0 * mean_z.sqrt();

    let mut design = DMatrix::<Real>::zeros(n, 3);
    for (i, p) in points.iter().enumerate() {
        design[(i, 0)] = (z[i] - mean_z) / scale;
        design[(i, 1)] = p.x - c.x;
        design[(i, 2)] = p.y - c.y;
    }

    let svd = design.svd(false, true);
    let v_t = svd.v_t.as_ref().ok_or(FitError::SingularConfiguration {
        method: METHOD,
        detail: "svd did not produce right singular vectors",
    })?;
    // Right singular vector of the smallest singular value (last row of Vᵀ),
    // with the z scaling undone and the constant term reconstructed.
    let a0 = v_t[(2, 0)] / scale;
    let coeffs = Vector4::new(a0, v_t[(2, 1)], v_t[(2, 2)], -mean_z * a0);

    algebraic::from_coefficients(METHOD, &coeffs, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use circlefit_core::synthetic::circle_points;

    #[test]
    fn newton_recovers_a_perfect_circle() {
        let pts = circle_points(Pt2::new(7.0, -1.0), 12.0, 20);
        let fit = taubin_newton(&pts).unwrap();
        assert!((fit.center.x - 7.0).abs() < 1e-9);
        assert!((fit.center.y + 1.0).abs() < 1e-9);
        assert!((fit.radius - 12.0).abs() < 1e-9);
    }

    #[test]
    fn svd_recovers_a_perfect_circle() {
        let pts = circle_points(Pt2::new(0.25, 0.75), 2.0, 9);
        let fit = taubin_svd(&pts).unwrap();
        assert!((fit.center.x - 0.25).abs() < 1e-9);
        assert!((fit.center.y - 0.75).abs() < 1e-9);
        assert!((fit.radius - 2.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_fail_both_forms() {
        let pts = [Pt2::new(-1.0, 2.0), Pt2::new(0.0, 0.0), Pt2::new(1.0, -2.0)];
        assert!(matches!(
            taubin_newton(&pts).unwrap_err(),
            FitError::SingularConfiguration { .. }
        ));
        assert!(matches!(
            taubin_svd(&pts).unwrap_err(),
            FitError::SingularConfiguration { .. }
        ));
    }

    #[test]
    fn coincident_points_fail_svd_form() {
        let pts = [Pt2::new(1.0, 1.0); 5];
        assert!(matches!(
            taubin_svd(&pts).unwrap_err(),
            FitError::SingularConfiguration { .. }
        ));
    }
}
