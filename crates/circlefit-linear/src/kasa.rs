//! Kåsa circle fit.
//!
//! The simplest algebraic method: stack one row `[x, y, 1]` per point and
//! solve `M·p = x² + y²` in the least-squares sense (exact when n = 3).
//! Fast and exact on noise-free data through three points, but biased toward
//! small radii on noisy partial arcs.

use circlefit_core::{CircleFit, FitError, FitMethod, Pt2, Real};
use nalgebra::{DMatrix, DVector};

use crate::algebraic;
use crate::check_point_count;
use crate::eigen::{rank_deficient, SINGULARITY_EPS};

/// Fit a circle with the Kåsa method.
///
/// Collinear or coincident points leave the design matrix rank-deficient and
/// yield [`FitError::SingularConfiguration`].
pub fn kasa(points: &[Pt2]) -> Result<CircleFit, FitError> {
    const METHOD: FitMethod = FitMethod::Kasa;
    check_point_count(METHOD, points)?;

    let n = points.len();
    let mut design = DMatrix::<Real>::zeros(n, 3);
    let mut target = DVector::<Real>::zeros(n);
    for (i, p) in points.iter().enumerate() {
        design[(i, 0)] = p.x;
        design[(i, 1)] = p.y;
        design[(i, 2)] = 1.0;
        target[i] = p.x * p.x + p.y * p.y;
    }

    let svd = design.svd(true, true);
    if rank_deficient(svd.singular_values.as_slice()) {
        return Err(FitError::SingularConfiguration {
            method: METHOD,
            detail: "collinear or coincident points",
        });
    }
    let p = svd
        .solve(&target, SINGULARITY_EPS)
        .map_err(|_| FitError::SingularConfiguration {
            method: METHOD,
            detail: "least-squares solve failed",
        })?;

    let cx = p[0] / 2.0;
    let cy = p[1] / 2.0;
    let radicand = cx * cx + cy * cy + p[2];
    algebraic::from_centered(METHOD, cx, cy, radicand, Pt2::origin(), Vec::new())
}
