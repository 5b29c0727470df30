//! Result, method and error types shared by every estimator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Pt2, Real};

/// Identifies one of the circle-fitting estimators.
///
/// Carried inside [`FitError`] so a caller that tries several methods on the
/// same point set can tell which one failed, and usable as a dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitMethod {
    /// Direct algebraic least squares (Kåsa).
    Kasa,
    /// Pratt constraint, Newton root-finding form.
    PrattNewton,
    /// Pratt constraint, SVD/eigendecomposition form.
    PrattSvd,
    /// Taubin constraint, Newton root-finding form.
    TaubinNewton,
    /// Taubin constraint, SVD form.
    TaubinSvd,
    /// Chernov's Hyper method, plain generalized-eigenproblem form.
    HyperSimple,
    /// Chernov's Hyper method, SVD-stabilized form.
    HyperStable,
}

impl FitMethod {
    /// All estimators, in a stable order. Handy for caller-side fallback
    /// chains and for exercising every method in tests.
    pub const ALL: [FitMethod; 7] = [
        FitMethod::Kasa,
        FitMethod::PrattNewton,
        FitMethod::PrattSvd,
        FitMethod::TaubinNewton,
        FitMethod::TaubinSvd,
        FitMethod::HyperSimple,
        FitMethod::HyperStable,
    ];
}

impl std::fmt::Display for FitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FitMethod::Kasa => "kasa",
            FitMethod::PrattNewton => "pratt-newton",
            FitMethod::PrattSvd => "pratt-svd",
            FitMethod::TaubinNewton => "taubin-newton",
            FitMethod::TaubinSvd => "taubin-svd",
            FitMethod::HyperSimple => "hyper-simple",
            FitMethod::HyperStable => "hyper-stable",
        };
        f.write_str(name)
    }
}

/// Recoverable anomalies raised by the Newton-style estimators.
///
/// The iteration degrades to the η = 0 fallback instead of failing; the
/// warning records why, so callers can decide whether to keep the fit or
/// retry with another method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitWarning {
    /// The Newton residual grew between iterations; the root was reset to 0.
    NewtonResidualIncreased,
    /// A Newton iterate went negative and was reset to 0.
    NewtonNegativeRoot,
    /// The iteration cap was reached without convergence; the root was reset
    /// to 0.
    NewtonIterationCap,
}

/// A fitted circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    /// Circle center in the input coordinate system.
    pub center: Pt2,
    /// Circle radius, always ≥ 0.
    pub radius: Real,
    /// Anomalies encountered while producing this fit. Empty for the
    /// decomposition-based estimators; the Newton estimators may attach
    /// [`FitWarning`]s when they fall back to a degraded solution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<FitWarning>,
}

impl CircleFit {
    /// True if the fit was produced through a degraded fallback path.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Failure taxonomy for a single fitting call.
///
/// Every variant names the method that failed; all failures are local to one
/// call and carry no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Fewer points than a circle fit can be determined from.
    #[error("{method}: need at least {needed} points, got {got}")]
    InsufficientPoints {
        method: FitMethod,
        needed: usize,
        got: usize,
    },
    /// A required inverse, solve or determinant is (near-)zero and the method
    /// has no singular-case branch. Typical cause: collinear or coincident
    /// points.
    #[error("{method}: singular point configuration ({detail})")]
    SingularConfiguration {
        method: FitMethod,
        detail: &'static str,
    },
    /// The Newton iteration diverged or hit its cap in strict mode.
    #[error("{method}: iteration did not converge")]
    NonConvergence { method: FitMethod },
    /// The eigenvalue sign pattern required by the Hyper methods was
    /// violated.
    #[error("{method}: degenerate eigenstructure ({detail})")]
    DegenerateEigenstructure {
        method: FitMethod,
        detail: &'static str,
    },
    /// The radius radicand came out negative from accumulated numerical
    /// error. Never masked by clamping; surfaced so the caller can switch
    /// methods.
    #[error("{method}: negative radius radicand ({radicand:e})")]
    NegativeRadicand { method: FitMethod, radicand: Real },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_is_stable() {
        assert_eq!(FitMethod::Kasa.to_string(), "kasa");
        assert_eq!(FitMethod::HyperStable.to_string(), "hyper-stable");
    }

    #[test]
    fn error_messages_name_the_method() {
        let err = FitError::InsufficientPoints {
            method: FitMethod::TaubinSvd,
            needed: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "taubin-svd: need at least 3 points, got 2");
    }

    #[test]
    fn degraded_flag_follows_warnings() {
        let mut fit = CircleFit {
            center: Pt2::new(0.0, 0.0),
            radius: 1.0,
            warnings: Vec::new(),
        };
        assert!(!fit.is_degraded());
        fit.warnings.push(FitWarning::NewtonIterationCap);
        assert!(fit.is_degraded());
    }
}
