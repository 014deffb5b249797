//! # Covariance Builder
//!
//! $$
//! \Sigma_{ij} = \sigma_i \sigma_j \rho_{ij}
//! $$
//!
//! Builds a dense covariance matrix from per-asset volatilities and a
//! correlation matrix.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::PortfolioError;

/// Build a covariance matrix as the outer product of the volatility vector
/// with itself, scaled element-wise by the correlation matrix.
///
/// The result is symmetric whenever `corr` is symmetric, and positive
/// definite iff `corr` is positive definite and every volatility is nonzero.
pub fn covariance_matrix(
  sigmas: &Array1<f64>,
  corr: &Array2<f64>,
) -> Result<Array2<f64>, PortfolioError> {
  if corr.nrows() != corr.ncols() {
    return Err(PortfolioError::Dimension(format!(
      "correlation matrix must be square, got {}x{}",
      corr.nrows(),
      corr.ncols()
    )));
  }

  let n = sigmas.len();
  if corr.nrows() != n {
    return Err(PortfolioError::Dimension(format!(
      "correlation matrix is {}x{} but {} volatilities were given",
      corr.nrows(),
      corr.ncols(),
      n
    )));
  }

  let mut cov = Array2::<f64>::zeros((n, n));
  for i in 0..n {
    for j in 0..n {
      cov[[i, j]] = sigmas[i] * sigmas[j] * corr[[i, j]];
    }
  }

  Ok(cov)
}
