//! # Portfolio Types
//!
//! $$
//! \mathbf{w}^\top \mathbf{1} = 1
//! $$
//!
//! Shared result containers and policy enums for the mean-variance pipeline.

use ndarray::Array1;

/// Output of a closed-form portfolio solve.
#[derive(Clone, Debug, Default)]
pub struct PortfolioResult {
  /// Final portfolio weights, summing to one. Short positions are negative.
  pub weights: Array1<f64>,
  /// Portfolio expected return realized by the weights.
  pub expected_return: f64,
  /// Portfolio standard deviation realized by the weights.
  pub volatility: f64,
}

/// Lagrangian scalars of the two-constraint frontier system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierScalars {
  /// `1' Σ⁻¹ 1`
  pub a: f64,
  /// `1' Σ⁻¹ μ`
  pub b: f64,
  /// `μ' Σ⁻¹ μ`
  pub c: f64,
  /// `a·c - b²`, strictly positive for a well-posed two-constraint optimum.
  pub discriminant: f64,
}

impl FrontierScalars {
  /// Expected return of the global minimum-variance portfolio, `b / a`.
  pub fn gmv_return(&self) -> f64 {
    self.b / self.a
  }
}

/// Policy applied when the requested target return needs leverage or shorts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetPolicy {
  /// Log a warning and solve anyway.
  #[default]
  Warn,
  /// Fail with an infeasible-target error.
  Reject,
  /// Solve without logging, matching the raw closed form.
  Silent,
}

impl TargetPolicy {
  /// Parse a string into a [`TargetPolicy`].
  pub fn from_str(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "reject" | "strict" => Self::Reject,
      "silent" | "ignore" | "pass" => Self::Silent,
      _ => Self::Warn,
    }
  }
}
