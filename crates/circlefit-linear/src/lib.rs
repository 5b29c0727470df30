//! circlefit-linear — least-squares circle estimators for 2D point sets.
//!
//! Implements the classic algebraic circle-fitting family:
//! - **Kåsa** — direct least squares on `[x, y, 1]·p = x² + y²`,
//! - **Pratt** and **Taubin** — in both Newton root-finding and SVD forms,
//! - **Hyper** — Chernov's bias-cancelling method, plain and SVD-stabilized.
//!
//! The methods trade numerical robustness, bias and noise tolerance
//! differently; callers that need resilience are expected to try an
//! alternative method when one fails (every [`FitError`] names the method).
//!
//! Reference: Al-Sharadqah & Chernov, "Error analysis for circle fitting
//! algorithms", Electronic Journal of Statistics 3 (2009), pp. 886–911.
//!
//! All fits are pure single-pass computations over an immutable point slice;
//! no state is shared between calls.

mod algebraic;
mod eigen;
mod hyper;
mod kasa;
mod newton;
mod pratt;
mod taubin;

pub use hyper::{hyper_simple, hyper_stable};
pub use kasa::kasa;
pub use newton::NewtonConfig;
pub use pratt::{pratt_newton, pratt_newton_with, pratt_svd};
pub use taubin::{taubin_newton, taubin_newton_with, taubin_svd};

use circlefit_core::{CircleFit, FitError, FitMethod, Pt2};

/// Minimum number of points any method can fit a circle to.
pub const MIN_POINTS: usize = 3;

/// Fit a circle with the requested estimator.
pub fn fit_circle(points: &[Pt2], method: FitMethod) -> Result<CircleFit, FitError> {
    match method {
        FitMethod::Kasa => kasa(points),
        FitMethod::PrattNewton => pratt_newton(points),
        FitMethod::PrattSvd => pratt_svd(points),
        FitMethod::TaubinNewton => taubin_newton(points),
        FitMethod::TaubinSvd => taubin_svd(points),
        FitMethod::HyperSimple => hyper_simple(points),
        FitMethod::HyperStable => hyper_stable(points),
    }
}

pub(crate) fn check_point_count(method: FitMethod, points: &[Pt2]) -> Result<(), FitError> {
    if points.len() < MIN_POINTS {
        return Err(FitError::InsufficientPoints {
            method,
            needed: MIN_POINTS,
            got: points.len(),
        });
    }
    Ok(())
}
