//! Chernov's "Hyper" circle fits.
//!
//! Hyper combines the Pratt and Taubin constraints so the leading bias term
//! of the estimator cancels. Both variants solve a generalized eigenproblem
//! between the data scatter matrix and a data-dependent constraint matrix
//! and take the eigenvector of the second-smallest eigenvalue:
//! - [`hyper_simple`] forms the scatter matrix `XᵀX` directly,
//! - [`hyper_stable`] works through the SVD of the centered design matrix,
//!   which avoids squaring the condition number and gains a singular-case
//!   branch for exactly-degenerate inputs.

use circlefit_core::{centroid, CircleFit, FitError, FitMethod, Pt2, Real};
use log::debug;
use nalgebra::{DMatrix, Matrix4, SymmetricEigen, Vector4};

use crate::algebraic;
use crate::check_point_count;
use crate::eigen::{rank_deficient, real_eigenpairs, second_smallest_index, validate_hyper_signs};

/// Fit a circle with the Hyper method, plain form.
///
/// Builds `N⁻¹·M` for scatter matrix M and the Hyper constraint N, then
/// selects the eigenvector of the second-smallest eigenvalue. A
/// rank-deficient scatter matrix short-circuits to the null-space solution
/// instead; on the regular path the eigenvalue sign pattern (exactly the
/// smallest may be negative) is validated and violations surface as
/// [`FitError::DegenerateEigenstructure`].
pub fn hyper_simple(points: &[Pt2]) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::HyperSimple;
    check_point_count(METHOD, points)?;

    let nf = points.len() as Real;
    let mut scatter = Matrix4::<Real>::zeros();
    let (mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0);
    for p in points {
        let z = p.x * p.x + p.y * p.y;
        let row = Vector4::new(z, p.x, p.y, 1.0);
        scatter += row * row.transpose();
        sx += p.x;
        sy += p.y;
        sz += z;
    }
    let (mx, my, mz) = (sx / nf, sy / nf, sz / nf);

    // A rank-deficient scatter matrix (exact fit, or points on a line) makes
    // N⁻¹·M meaningless; take the null-space solution instead. Lines then
    // fail parameter extraction as a singular configuration. The scatter's
    // singular values are the squares of the design matrix's, hence the
    // square roots for the rank test.
    let scatter_svd = scatter.svd(false, true);
    let sigma: Vec<Real> = scatter_svd
        .singular_values
        .iter()
        .map(|s| s.sqrt())
        .collect();
    if rank_deficient(&sigma) {
        debug!("hyper-simple: rank-deficient scatter matrix, taking null-space solution");
        let v_t = scatter_svd
            .v_t
            .as_ref()
            .ok_or(FitError::SingularConfiguration {
                method: METHOD,
                detail: "svd did not produce right singular vectors",
            })?;
        let coeffs = Vector4::from_fn(|r, _| v_t[(3, r)]);
        return algebraic::from_coefficients(METHOD, &coeffs, Pt2::origin());
    }

    let constraint = Matrix4::new(
        8.0 * mz,
        4.0 * mx,
        4.0 * my,
        2.0,
        4.0 * mx,
        1.0,
        0.0,
        0.0,
        4.0 * my,
        0.0,
        1.0,
        0.0,
        2.0,
        0.0,
        0.0,
        0.0,
    );
    let n_inv = constraint
        .try_inverse()
        .ok_or(FitError::SingularConfiguration {
            method: METHOD,
            detail: "constraint matrix is not invertible",
        })?;

    // N⁻¹·M is not symmetric in general; recover its real spectrum directly.
    let pairs = real_eigenpairs(&(n_inv * scatter));
    if pairs.len() < 2 {
        return Err(FitError::DegenerateEigenstructure {
            method: METHOD,
            detail: "fewer than two real eigenvalues",
        });
    }
    let values: Vec<Real> = pairs.iter().map(|(v, _)| *v).collect();
    validate_hyper_signs(METHOD, &values)?;

    let idx = second_smallest_index(&values);
    algebraic::from_coefficients(METHOD, &pairs[idx].1, Pt2::origin())
}

/// Fit a circle with the Hyper method, SVD-stabilized form.
///
/// Centers the points, decomposes the design matrix and solves the
/// eigenproblem on `Y·B⁻¹·Y` with `Y = V·S·Vᵀ`. A rank-deficient design
/// matrix short-circuits to the null-space solution instead.
pub fn hyper_stable(points: &[Pt2]) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::HyperStable;
    check_point_count(METHOD, points)?;

    let c = centroid(points);
    let n = points.len();
    // Zero-pad to four rows so the SVD keeps the full right-singular basis;
    // three points then land in the null-space branch via σ₄ = 0.
    let mut design = DMatrix::<Real>::zeros(n.max(4), 4);
    let mut sum_z = 0.0;
    for (i, p) in points.iter().enumerate() {
        let x = p.x - c.x;
        let y = p.y - c.y;
        let z = x * x + y * y;
        design[(i, 0)] = z;
        design[(i, 1)] = x;
        design[(i, 2)] = y;
        design[(i, 3)] = 1.0;
        sum_z += z;
    }
    let mean_z = sum_z / n as Real;

    let svd = design.svd(false, true);
    let v_t = svd.v_t.as_ref().ok_or(FitError::SingularConfiguration {
        method: METHOD,
        detail: "svd did not produce right singular vectors",
    })?;
    let sv = &svd.singular_values;
    let v = Matrix4::from_fn(|r, col| v_t[(col, r)]);

    let coeffs: Vector4<Real> = if rank_deficient(sv.as_slice()) {
        debug!("hyper-stable: rank-deficient design matrix, taking null-space solution");
        Vector4::from_fn(|r, _| v_t[(3, r)])
    } else {
        let s = Matrix4::from_diagonal(&Vector4::from_iterator(sv.iter().copied()));
        let y = v * s * v.transpose(); // symmetric square root of XᵀX

        // Inverse of the Hyper constraint for centered data.
        let binv = Matrix4::new(
            0.0,
            0.0,
            0.0,
            0.5,
            0.0,
            1.0,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
            0.5,
            0.0,
            0.0,
            -2.0 * mean_z,
        );
        let eig = SymmetricEigen::new(y * binv * y);
        validate_hyper_signs(METHOD, eig.eigenvalues.as_slice())?;

        let idx = second_smallest_index(eig.eigenvalues.as_slice());
        let a = eig.eigenvectors.column(idx).into_owned();

        let s_inv = Matrix4::from_diagonal(&Vector4::from_iterator(sv.iter().map(|s| 1.0 / s)));
        v * s_inv * v.transpose() * a
    };

    algebraic::from_coefficients(METHOD, &coeffs, c)
}
