//! Shared numerical helpers: rank-deficiency detection, rank-based
//! eigenvalue selection, and real eigenpairs of non-symmetric 4×4 systems.

use circlefit_core::{FitError, FitMethod, Real};
use nalgebra::{Matrix4, Vector4};

/// Ratio of extreme singular values below which a design matrix is treated
/// as rank-deficient.
pub(crate) const SINGULARITY_EPS: Real = 1e-12;

/// Relative tolerance for treating a complex eigenvalue as real and for the
/// Hyper sign-pattern checks.
const EIG_EPS: Real = 1e-9;

/// Shared rank-deficiency check on singular values sorted in descending
/// order (the order `svd()` returns them in).
pub(crate) fn rank_deficient(singular_values: &[Real]) -> bool {
    let largest = singular_values[0];
    let smallest = singular_values[singular_values.len() - 1];
    largest <= 0.0 || smallest / largest < SINGULARITY_EPS
}

/// Index, in the original unsorted ordering, of the second-smallest value.
///
/// Selection is by rank over (value, index) pairs; re-looking up a sorted
/// value in the unsorted array would pick the wrong index when values are
/// duplicated or nearly equal.
pub(crate) fn second_smallest_index(values: &[Real]) -> usize {
    debug_assert!(values.len() >= 2);
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));
    order[1]
}

/// Check the eigenvalue sign pattern required by the Hyper constraint:
/// the smallest eigenvalue must be ≤ 0 and the second-smallest ≥ 0, up to a
/// scale-relative tolerance. Anything else means the point configuration is
/// malformed for this method.
pub(crate) fn validate_hyper_signs(method: FitMethod, values: &[Real]) -> Result<(), FitError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(Real::total_cmp);

    let max_abs = sorted.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return Err(FitError::DegenerateEigenstructure {
            method,
            detail: "all eigenvalues are zero",
        });
    }
    let tol = EIG_EPS * max_abs;

    if sorted[0] > tol {
        return Err(FitError::DegenerateEigenstructure {
            method,
            detail: "smallest eigenvalue is positive",
        });
    }
    if sorted[1] < -tol {
        return Err(FitError::DegenerateEigenstructure {
            method,
            detail: "second-smallest eigenvalue is negative",
        });
    }
    Ok(())
}

/// Real eigenvalues and eigenvectors of a (generally non-symmetric) 4×4
/// matrix.
///
/// Eigenvalues come from the complex spectrum; each eigenvector is recovered
/// as the null direction of `A − λI` via SVD (the right singular vector of
/// the smallest singular value). Pairs keep the order in which the
/// eigenvalues were reported, so index-based selection stays meaningful.
pub(crate) fn real_eigenpairs(a: &Matrix4<Real>) -> Vec<(Real, Vector4<Real>)> {
    let scale = a.norm().max(Real::MIN_POSITIVE);
    let mut pairs = Vec::with_capacity(4);

    for ev in a.complex_eigenvalues().iter() {
        if ev.im.abs() > EIG_EPS * scale {
            continue;
        }
        let shifted = a - Matrix4::identity() * ev.re;
        let svd = shifted.svd(false, true);
        let Some(v_t) = svd.v_t else { continue };
        pairs.push((ev.re, v_t.row(3).transpose()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_deficiency_ratio() {
        assert!(!rank_deficient(&[10.0, 1.0, 1e-3]));
        assert!(rank_deficient(&[10.0, 1.0, 1e-14]));
        assert!(rank_deficient(&[0.0, 0.0, 0.0]));
    }

    #[test]
    fn second_smallest_handles_duplicates() {
        // Two equal smallest values: rank selection must return one of the
        // duplicate indices, never a larger value's index.
        let idx = second_smallest_index(&[3.0, 1.0, 1.0, 2.0]);
        assert!(idx == 1 || idx == 2);

        assert_eq!(second_smallest_index(&[4.0, -2.0, 7.0, 0.5]), 3);
    }

    #[test]
    fn hyper_sign_check() {
        assert!(validate_hyper_signs(FitMethod::HyperSimple, &[-1.0, 0.0, 2.0, 3.0]).is_ok());
        assert!(validate_hyper_signs(FitMethod::HyperSimple, &[0.5, 1.0, 2.0, 3.0]).is_err());
        assert!(validate_hyper_signs(FitMethod::HyperStable, &[-2.0, -1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn eigenpairs_of_diagonal_matrix() {
        let a = Matrix4::from_diagonal(&Vector4::new(4.0, -1.0, 2.0, 0.5));
        let pairs = real_eigenpairs(&a);
        assert_eq!(pairs.len(), 4);
        for (ev, vec) in &pairs {
            // A v = λ v
            let residual = (a * vec - vec * *ev).norm();
            assert!(residual < 1e-9, "residual {residual} for eigenvalue {ev}");
        }
    }
}
