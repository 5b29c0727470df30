//! Synthetic circle point sets.

use crate::{Pt2, Real};

use super::noise::RadialNoise;

/// `n` evenly spaced points on the circle of the given center and radius.
///
/// Point `i` sits at angle `i·2π/n`; ordering is deterministic.
pub fn circle_points(center: Pt2, radius: Real, n: usize) -> Vec<Pt2> {
    (0..n)
        .map(|i| {
            let theta = i as Real * 2.0 * std::f64::consts::PI / n as Real;
            Pt2::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

/// Like [`circle_points`] with per-point multiplicative radial noise.
pub fn noisy_circle_points(center: Pt2, radius: Real, n: usize, noise: &RadialNoise) -> Vec<Pt2> {
    (0..n)
        .map(|i| {
            let theta = i as Real * 2.0 * std::f64::consts::PI / n as Real;
            let r = radius * noise.factor(i);
            Pt2::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_lie_on_the_circle() {
        let c = Pt2::new(3.0, -2.0);
        let pts = circle_points(c, 5.0, 12);
        assert_eq!(pts.len(), 12);
        for p in &pts {
            let r = ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt();
            assert!((r - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn noisy_radii_stay_within_amplitude() {
        let c = Pt2::new(0.0, 0.0);
        let noise = RadialNoise {
            seed: 1,
            amplitude: 0.1,
        };
        for p in noisy_circle_points(c, 50.0, 64, &noise) {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r >= 47.5 - 1e-9 && r <= 52.5 + 1e-9);
        }
    }
}
