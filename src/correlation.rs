//! # Correlation Utilities
//!
//! $$
//! \rho' = f\,\rho + (1-f)\,I
//! $$
//!
//! Correlation-matrix validation and the identity-rescaling transformer used
//! to damp or amplify cross-asset dependence before covariance construction.

use nalgebra::DMatrix;
use ndarray::Array2;

use crate::error::PortfolioError;

/// Rescale a correlation matrix toward (`factor < 1`) or away from
/// (`factor > 1`) the identity matrix, clamping every entry to `[-1, 1]`.
///
/// Factor 1 returns the input unchanged; factor 0 collapses to the identity
/// matrix; factors outside `[0, 1]` extrapolate and saturate at the clip
/// boundary. The unit diagonal is preserved for any factor.
pub fn transform_corr_matrix(
  corr: &Array2<f64>,
  factor: f64,
) -> Result<Array2<f64>, PortfolioError> {
  if corr.nrows() != corr.ncols() {
    return Err(PortfolioError::Dimension(format!(
      "correlation matrix must be square, got {}x{}",
      corr.nrows(),
      corr.ncols()
    )));
  }

  let identity = Array2::<f64>::eye(corr.nrows());
  let mut out = corr * factor + identity * (1.0 - factor);
  out.mapv_inplace(|v| v.clamp(-1.0, 1.0));

  Ok(out)
}

/// Check correlation invariants: square shape, finite entries in `[-1, 1]`,
/// unit diagonal and symmetry within `1e-9`.
pub fn validate_correlation(corr: &Array2<f64>) -> Result<(), PortfolioError> {
  if corr.nrows() != corr.ncols() {
    return Err(PortfolioError::Dimension(format!(
      "correlation matrix must be square, got {}x{}",
      corr.nrows(),
      corr.ncols()
    )));
  }

  let n = corr.nrows();
  for i in 0..n {
    if (corr[[i, i]] - 1.0).abs() > 1e-9 {
      return Err(PortfolioError::InvalidCorrelation(format!(
        "diagonal entry ({i},{i}) is {}, expected 1",
        corr[[i, i]]
      )));
    }

    for j in 0..n {
      let c = corr[[i, j]];
      if !c.is_finite() {
        return Err(PortfolioError::InvalidCorrelation(format!(
          "entry ({i},{j}) is not finite"
        )));
      }
      if !(-1.0..=1.0).contains(&c) {
        return Err(PortfolioError::InvalidCorrelation(format!(
          "entry ({i},{j}) is {c}, outside [-1, 1]"
        )));
      }
      if (c - corr[[j, i]]).abs() > 1e-9 {
        return Err(PortfolioError::InvalidCorrelation(format!(
          "entries ({i},{j}) and ({j},{i}) disagree: {c} vs {}",
          corr[[j, i]]
        )));
      }
    }
  }

  Ok(())
}

/// Positive-definiteness check via Cholesky factorization.
///
/// Returns `false` for non-square input.
pub fn is_positive_definite(corr: &Array2<f64>) -> bool {
  let n = corr.nrows();
  if n != corr.ncols() {
    return false;
  }

  let m = DMatrix::from_fn(n, n, |i, j| corr[[i, j]]);
  m.cholesky().is_some()
}

/// Correlation matrix with `rho` on every off-diagonal entry.
///
/// Positive definite for `rho` in `(-1/(n-1), 1)`.
pub fn constant_correlation_matrix(n: usize, rho: f64) -> Array2<f64> {
  let mut corr = Array2::<f64>::from_elem((n, n), rho);
  for i in 0..n {
    corr[[i, i]] = 1.0;
  }
  corr
}
