//! Scalar Newton iteration shared by the Pratt and Taubin estimators.
//!
//! Both methods reduce to finding the smallest non-negative root η of a
//! characteristic polynomial built from the point-set moments; they differ
//! only in the polynomial coefficients. The iteration starts at η = 0 and is
//! deliberately conservative: any sign of trouble (growing residual,
//! negative iterate, iteration cap) degrades to the η = 0 fallback and
//! records a warning instead of propagating NaN.

use circlefit_core::{FitError, FitMethod, FitWarning, Moments, Real};
use log::debug;
use serde::{Deserialize, Serialize};

/// Tuning for the Newton-style estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonConfig {
    /// Iteration cap.
    pub max_iters: usize,
    /// Relative step tolerance `|Δη/η|` for convergence.
    pub rel_tol: Real,
    /// Fail with [`FitError::NonConvergence`] instead of degrading to the
    /// η = 0 fallback when the iteration diverges or hits the cap.
    pub strict: bool,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iters: 20,
            rel_tol: 1e-12,
            strict: false,
        }
    }
}

pub(crate) struct NewtonRoot {
    pub root: Real,
    pub warnings: Vec<FitWarning>,
}

/// Near-zero threshold for the back-substitution determinant, relative to
/// the squared moment trace.
const DET_EPS: Real = 1e-12;

/// Newton iteration from η = 0 on a polynomial given as `eval: η ↦ (y, y′)`.
///
/// Returns `None` only in strict mode, when the iteration diverged or hit
/// the cap; otherwise degraded outcomes carry warnings.
pub(crate) fn newton_root(
    eval: impl Fn(Real) -> (Real, Real),
    config: &NewtonConfig,
) -> Option<NewtonRoot> {
    let mut x: Real = 0.0;
    let mut y_prev = Real::INFINITY;
    let mut warnings = Vec::new();
    let mut converged = false;

    for _ in 0..config.max_iters {
        let (y, dy) = eval(x);

        if y.abs() > y_prev.abs() {
            // Residual grew: the iteration is walking away from the root.
            debug!(
                "newton: residual grew (|y| {:e} > {:e}), falling back to 0",
                y.abs(),
                y_prev.abs()
            );
            if config.strict {
                return None;
            }
            warnings.push(FitWarning::NewtonResidualIncreased);
            x = 0.0;
            converged = true;
            break;
        }
        y_prev = y;

        if dy == 0.0 {
            // Flat derivative, cannot step further.
            debug!("newton: zero derivative at {x:e}, stopping");
            if config.strict {
                return None;
            }
            warnings.push(FitWarning::NewtonIterationCap);
            converged = true;
            break;
        }

        let x_old = x;
        x = x_old - y / dy;

        let step = x - x_old;
        if step == 0.0 || (x != 0.0 && (step / x).abs() < config.rel_tol) {
            converged = true;
            break;
        }

        if x < 0.0 {
            // Negative roots are meaningless for these polynomials; reset
            // and keep iterating (recoverable).
            debug!("newton: negative iterate {x:e}, resetting to 0");
            if !warnings.contains(&FitWarning::NewtonNegativeRoot) {
                warnings.push(FitWarning::NewtonNegativeRoot);
            }
            x = 0.0;
        }
    }

    if !converged {
        debug!("newton: no convergence within {} iterations", config.max_iters);
        if config.strict {
            return None;
        }
        warnings.push(FitWarning::NewtonIterationCap);
        x = 0.0;
    }

    Some(NewtonRoot { root: x, warnings })
}

/// Back-substitute a converged root into the moment equations to get the
/// centered circle center. Shared between Pratt and Taubin, whose closed
/// forms coincide here.
pub(crate) fn newton_center(
    method: FitMethod,
    eta: Real,
    m: &Moments,
) -> Result<(Real, Real), FitError> {
    let mz = m.mz();
    let det = eta * eta - eta * mz + m.cov_xy();
    if det.abs() <= DET_EPS * mz * mz {
        return Err(FitError::SingularConfiguration {
            method,
            detail: "back-substitution determinant is (near-)zero",
        });
    }
    let x = (m.mxz * (m.myy - eta) - m.myz * m.mxy) / det / 2.0;
    let y = (m.myz * (m.mxx - eta) - m.mxz * m.mxy) / det / 2.0;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_simple_cubic_root() {
        // y = (η − 2)(η² + 1), root at 2, well-behaved from 0.
        let eval = |x: Real| {
            let y = (x - 2.0) * (x * x + 1.0);
            let dy = (x * x + 1.0) + (x - 2.0) * 2.0 * x;
            (y, dy)
        };
        let out = newton_root(eval, &NewtonConfig::default()).unwrap();
        assert!((out.root - 2.0).abs() < 1e-10);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn starting_at_root_converges_immediately() {
        let eval = |x: Real| (x, 1.0);
        let out = newton_root(eval, &NewtonConfig::default()).unwrap();
        assert_eq!(out.root, 0.0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn divergence_degrades_with_warning() {
        // |y| strictly increasing along the Newton path: first step jumps
        // from y(0) = 1 to a larger residual.
        let eval = |x: Real| (1.0 + x * x * 1e6, -1.0);
        let out = newton_root(eval, &NewtonConfig::default()).unwrap();
        assert_eq!(out.root, 0.0);
        assert!(out
            .warnings
            .contains(&FitWarning::NewtonResidualIncreased));
    }

    #[test]
    fn strict_mode_fails_instead_of_degrading() {
        let eval = |x: Real| (1.0 + x * x * 1e6, -1.0);
        let config = NewtonConfig {
            strict: true,
            ..NewtonConfig::default()
        };
        assert!(newton_root(eval, &config).is_none());
    }

    #[test]
    fn zero_determinant_is_singular() {
        let m = Moments::default();
        let err = newton_center(FitMethod::PrattNewton, 0.0, &m).unwrap_err();
        assert!(matches!(err, FitError::SingularConfiguration { .. }));
    }
}
