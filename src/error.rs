//! # Errors
//!
//! Typed failures for the mean-variance pipeline. Every error is raised at
//! the point of detection; there are no partial results.

use std::error::Error;
use std::fmt;

/// Failure kinds surfaced by the mean-variance pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioError {
  /// Input matrix/vector shapes disagree.
  Dimension(String),
  /// Covariance matrix is singular or ill-conditioned beyond tolerance.
  SingularMatrix {
    /// Reciprocal condition number estimated from singular values.
    rcond: f64,
  },
  /// The constrained system has no unique solution.
  DegenerateConstraint {
    /// Value of the vanished scalar, `A·C - B²` for the two-constraint solve.
    discriminant: f64,
  },
  /// Target return outside the attainable long-only range.
  InfeasibleTarget { target: f64, lo: f64, hi: f64 },
  /// Volatility entry is zero, negative or not a number.
  InvalidVolatility { index: usize, value: f64 },
  /// Correlation matrix invariant violated.
  InvalidCorrelation(String),
}

impl fmt::Display for PortfolioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PortfolioError::Dimension(detail) => write!(f, "dimension mismatch: {detail}"),
      PortfolioError::SingularMatrix { rcond } => write!(
        f,
        "covariance matrix is singular or ill-conditioned (rcond {rcond:.3e})"
      ),
      PortfolioError::DegenerateConstraint { discriminant } => write!(
        f,
        "constrained system has no unique solution (discriminant {discriminant:.3e})"
      ),
      PortfolioError::InfeasibleTarget { target, lo, hi } => write!(
        f,
        "target return {target} lies outside the attainable range [{lo}, {hi}]"
      ),
      PortfolioError::InvalidVolatility { index, value } => {
        write!(f, "volatility at index {index} must be positive, got {value}")
      }
      PortfolioError::InvalidCorrelation(detail) => {
        write!(f, "invalid correlation matrix: {detail}")
      }
    }
  }
}

impl Error for PortfolioError {}
