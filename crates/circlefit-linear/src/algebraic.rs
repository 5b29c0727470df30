//! Conversion from algebraic solutions to geometric circle parameters.
//!
//! Shared by every estimator so the final rounding behavior cannot diverge
//! between methods. The two entry points cover the two shapes the estimators
//! produce: an algebraic coefficient vector `(a0, a1, a2, a3)` of
//! `a0(x² + y²) + a1·x + a2·y + a3 = 0`, or an already-solved centered
//! `(x, y, r²)` triple.

use circlefit_core::{CircleFit, FitError, FitMethod, FitWarning, Pt2, Real};
use nalgebra::Vector4;

/// Relative threshold below which the leading coefficient a0 counts as zero
/// (the "circle" degenerated into a line).
const A0_EPS: Real = 1e-12;

/// Convert algebraic coefficients into a circle, undoing the centering
/// applied during matrix construction.
pub(crate) fn from_coefficients(
    method: FitMethod,
    a: &Vector4<Real>,
    centroid: Pt2,
) -> Result<CircleFit, FitError> {
    let a0 = a[0];
    if a0 == 0.0 || a0.abs() < A0_EPS * a.norm() {
        return Err(FitError::SingularConfiguration {
            method,
            detail: "leading coefficient a0 is (near-)zero",
        });
    }

    let radicand = a[1] * a[1] + a[2] * a[2] - 4.0 * a0 * a[3];
    if radicand < 0.0 {
        return Err(FitError::NegativeRadicand { method, radicand });
    }

    let center = Pt2::new(
        -a[1] / (2.0 * a0) + centroid.x,
        -a[2] / (2.0 * a0) + centroid.y,
    );
    Ok(CircleFit {
        center,
        radius: radicand.sqrt() / (2.0 * a0.abs()),
        warnings: Vec::new(),
    })
}

/// Convert a centered `(x, y)` center and squared-radius radicand into a
/// circle, translating back by the working centroid.
pub(crate) fn from_centered(
    method: FitMethod,
    x: Real,
    y: Real,
    radicand: Real,
    centroid: Pt2,
    warnings: Vec<FitWarning>,
) -> Result<CircleFit, FitError> {
    if radicand < 0.0 {
        return Err(FitError::NegativeRadicand { method, radicand });
    }
    Ok(CircleFit {
        center: Pt2::new(x + centroid.x, y + centroid.y),
        radius: radicand.sqrt(),
        warnings,
    })
}
