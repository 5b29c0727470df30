//! circlefit-core — shared types and utilities for 2D circle fitting.
//!
//! This crate contains:
//! - scalar and point type aliases ([`Real`], [`Pt2`], [`Vec2`]),
//! - the [`CircleFit`] result type and the [`FitError`] failure taxonomy,
//! - centroid and normalized central-moment accumulation ([`Moments`]),
//! - deterministic synthetic circle generation for tests and examples.
//!
//! The estimators themselves live in `circlefit-linear`; everything here is
//! method-agnostic and allocation-light.

/// Scalar and point type aliases.
pub mod math;
/// Centroid and central-moment accumulation.
pub mod moments;
/// Deterministic synthetic point-set generation.
pub mod synthetic;
/// Result, method and error types.
pub mod types;

pub use math::*;
pub use moments::*;
pub use types::*;
