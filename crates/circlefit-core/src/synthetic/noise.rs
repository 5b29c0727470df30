//! Deterministic noise helpers for synthetic datasets.
//!
//! The functions here avoid `thread_rng` and do not depend on the internal
//! algorithm of an RNG crate. This keeps synthetic datasets stable across
//! versions and platforms.

use crate::Real;

/// Deterministic multiplicative radial noise.
///
/// For a point at nominal radius `r`, the perturbed radius is
/// `r · (1 + amplitude · (u − 0.5))` with `u` pseudo-random in `[0, 1)`,
/// i.e. a relative perturbation of at most `amplitude / 2` either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialNoise {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Peak-to-peak relative amplitude (0.1 gives ±5%).
    pub amplitude: Real,
}

impl RadialNoise {
    /// Radial scale factor for the point at `point_idx`.
    #[inline]
    pub fn factor(&self, point_idx: usize) -> Real {
        if self.amplitude == 0.0 {
            return 1.0;
        }
        let key = self.seed ^ (point_idx as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        let u = u64_to_unit_f64(splitmix64(key));
        1.0 + self.amplitude * (u - 0.5)
    }
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn u64_to_unit_f64(x: u64) -> Real {
    // Top 53 bits to a double in [0, 1); deterministic and platform-independent.
    let mantissa = x >> 11;
    (mantissa as Real) * (1.0 / ((1u64 << 53) as Real))
}
