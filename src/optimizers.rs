//! # Closed-Form Solvers
//!
//! $$
//! \mathbf{w}_{\text{gmv}} = \frac{\Sigma^{-1}\mathbf{1}}{\mathbf{1}^\top \Sigma^{-1}\mathbf{1}},
//! \qquad
//! \mathbf{w}^\* = \Sigma^{-1}(\lambda\,\mathbf{1} + \gamma\,\mu)
//! $$
//!
//! Dense covariance inversion and the Lagrangian weight solutions: the global
//! minimum-variance portfolio (single budget constraint) and the
//! minimum-variance portfolio achieving a target expected return (budget plus
//! return constraint).

use nalgebra::DMatrix;
use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;
use crate::types::FrontierScalars;
use crate::types::PortfolioResult;

/// Default reciprocal-condition cutoff for covariance inversion.
pub const DEFAULT_CONDITION_TOLERANCE: f64 = 1e-12;

/// Default cutoff below which a Lagrangian denominator counts as zero.
pub const DEFAULT_DISCRIMINANT_TOLERANCE: f64 = 1e-12;

fn require_square(m: &Array2<f64>, what: &str) -> Result<usize, PortfolioError> {
  if m.nrows() != m.ncols() {
    return Err(PortfolioError::Dimension(format!(
      "{what} must be square, got {}x{}",
      m.nrows(),
      m.ncols()
    )));
  }
  Ok(m.nrows())
}

/// Invert a covariance matrix with the default conditioning tolerance.
pub fn inverse_covariance(cov: &Array2<f64>) -> Result<Array2<f64>, PortfolioError> {
  inverse_covariance_with_tolerance(cov, DEFAULT_CONDITION_TOLERANCE)
}

/// Invert a covariance matrix, rejecting singular or ill-conditioned input.
///
/// The reciprocal condition number is estimated from singular values and the
/// inversion fails with [`PortfolioError::SingularMatrix`] when it drops to
/// `tol` or below.
pub fn inverse_covariance_with_tolerance(
  cov: &Array2<f64>,
  tol: f64,
) -> Result<Array2<f64>, PortfolioError> {
  let n = require_square(cov, "covariance matrix")?;
  if n == 0 {
    return Err(PortfolioError::Dimension(
      "covariance matrix is empty".to_string(),
    ));
  }

  let m = DMatrix::from_fn(n, n, |i, j| cov[[i, j]]);

  let singular = m.singular_values();
  let smax = singular.max();
  let smin = singular.min();
  let rcond = if smax > 0.0 { smin / smax } else { 0.0 };
  if rcond <= tol {
    return Err(PortfolioError::SingularMatrix { rcond });
  }

  let inv = m
    .try_inverse()
    .ok_or(PortfolioError::SingularMatrix { rcond })?;

  // The inverse of a symmetric covariance is symmetric, so the column-major
  // slice reshapes directly.
  Ok(Array2::from_shape_vec((n, n), inv.as_slice().to_vec()).unwrap())
}

/// Compute the Lagrangian scalars `A = 1'Σ⁻¹1`, `B = 1'Σ⁻¹μ`, `C = μ'Σ⁻¹μ`
/// and the discriminant `D = A·C - B²` from an inverse covariance matrix and
/// an expected-return vector.
pub fn frontier_scalars(
  inv_cov: &Array2<f64>,
  mus: &Array1<f64>,
) -> Result<FrontierScalars, PortfolioError> {
  let n = require_square(inv_cov, "inverse covariance matrix")?;
  if mus.len() != n {
    return Err(PortfolioError::Dimension(format!(
      "expected-return vector has length {} but the inverse covariance is {n}x{n}",
      mus.len()
    )));
  }

  let ones = Array1::<f64>::ones(n);
  let a = ones.dot(&inv_cov.dot(&ones));
  let b = ones.dot(&inv_cov.dot(mus));
  let c = mus.dot(&inv_cov.dot(mus));

  Ok(FrontierScalars {
    a,
    b,
    c,
    discriminant: a * c - b * b,
  })
}

/// Weights of the global minimum-variance portfolio,
/// `w = (Σ⁻¹1) / (1'Σ⁻¹1)`.
///
/// The returned weights sum to one up to rounding whenever the denominator
/// `1'Σ⁻¹1` is nonzero.
pub fn min_variance_weights(inv_cov: &Array2<f64>) -> Result<Array1<f64>, PortfolioError> {
  let n = require_square(inv_cov, "inverse covariance matrix")?;

  let ones = Array1::<f64>::ones(n);
  let num = inv_cov.dot(&ones);
  let denom = ones.dot(&num);

  if denom.abs() <= DEFAULT_DISCRIMINANT_TOLERANCE {
    return Err(PortfolioError::DegenerateConstraint {
      discriminant: denom,
    });
  }

  Ok(num / denom)
}

/// Minimum-variance weights achieving `target` expected return, with the
/// realized portfolio mean and standard deviation.
pub fn target_return_weights(
  cov: &Array2<f64>,
  mus: &Array1<f64>,
  target: f64,
) -> Result<PortfolioResult, PortfolioError> {
  target_return_weights_with_tolerances(
    cov,
    mus,
    target,
    DEFAULT_CONDITION_TOLERANCE,
    DEFAULT_DISCRIMINANT_TOLERANCE,
  )
}

/// Target-return solve with explicit conditioning and degeneracy cutoffs.
///
/// The closed form places no feasibility restriction on `target`: any value
/// is solvable, including targets below the minimum-variance return or above
/// every asset's expected return, at the price of leverage. Feasibility
/// policy lives in the engine, not here.
pub fn target_return_weights_with_tolerances(
  cov: &Array2<f64>,
  mus: &Array1<f64>,
  target: f64,
  condition_tol: f64,
  discriminant_tol: f64,
) -> Result<PortfolioResult, PortfolioError> {
  let inv_cov = inverse_covariance_with_tolerance(cov, condition_tol)?;
  let scalars = frontier_scalars(&inv_cov, mus)?;

  if scalars.discriminant.abs() <= discriminant_tol {
    return Err(PortfolioError::DegenerateConstraint {
      discriminant: scalars.discriminant,
    });
  }

  let lambda = (scalars.c - scalars.b * target) / scalars.discriminant;
  let gamma = (scalars.a * target - scalars.b) / scalars.discriminant;

  let ones = Array1::<f64>::ones(mus.len());
  let weights = inv_cov.dot(&(ones * lambda + mus * gamma));

  let expected_return = weights.dot(mus);
  let volatility = weights.dot(&cov.dot(&weights)).max(0.0).sqrt();

  Ok(PortfolioResult {
    weights,
    expected_return,
    volatility,
  })
}
