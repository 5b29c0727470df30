//! Deterministic synthetic point-set generation.
//!
//! Small building blocks for constructing synthetic circle-fitting problems
//! used in tests and examples:
//! - perfect circle point sets,
//! - multiplicative radial noise.
//!
//! The helpers are deterministic (explicit seeds; stable point ordering) so
//! regression baselines stay comparable across runs and platforms.

pub mod circle;
pub mod noise;

pub use circle::{circle_points, noisy_circle_points};
pub use noise::RadialNoise;
