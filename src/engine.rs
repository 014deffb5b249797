//! # Mean-Variance Engine
//!
//! $$
//! \mathbf{w}^\* = \operatorname{Solve}(\mu, \sigma, \rho, r^\*)
//! $$
//!
//! High-level orchestration API: input validation, covariance construction,
//! inversion and closed-form solving behind a single entry point.

use ndarray::Array2;
use tracing::warn;

use crate::correlation::is_positive_definite;
use crate::correlation::validate_correlation;
use crate::covariance::covariance_matrix;
use crate::data::AssetUniverse;
use crate::error::PortfolioError;
use crate::optimizers::inverse_covariance_with_tolerance;
use crate::optimizers::min_variance_weights;
use crate::optimizers::target_return_weights_with_tolerances;
use crate::optimizers::DEFAULT_CONDITION_TOLERANCE;
use crate::optimizers::DEFAULT_DISCRIMINANT_TOLERANCE;
use crate::types::PortfolioResult;
use crate::types::TargetPolicy;

/// Runtime configuration for [`MeanVarianceEngine`].
#[derive(Clone, Debug)]
pub struct MeanVarianceConfig {
  /// Target return used by [`MeanVarianceEngine::solve_target`].
  pub target_return: f64,
  /// Policy applied when the target lies outside `[min(mu), max(mu)]`.
  pub target_policy: TargetPolicy,
  /// Reciprocal-condition cutoff for covariance inversion.
  pub condition_tolerance: f64,
  /// Cutoff below which the frontier discriminant counts as zero.
  pub discriminant_tolerance: f64,
  /// Validate volatilities and correlation invariants before solving.
  pub validate_inputs: bool,
}

impl Default for MeanVarianceConfig {
  fn default() -> Self {
    Self {
      target_return: 0.1,
      target_policy: TargetPolicy::Warn,
      condition_tolerance: DEFAULT_CONDITION_TOLERANCE,
      discriminant_tolerance: DEFAULT_DISCRIMINANT_TOLERANCE,
      validate_inputs: true,
    }
  }
}

/// Single entry point for the closed-form mean-variance pipeline.
#[derive(Clone, Debug)]
pub struct MeanVarianceEngine {
  config: MeanVarianceConfig,
}

impl MeanVarianceEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: MeanVarianceConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &MeanVarianceConfig {
    &self.config
  }

  /// Global minimum-variance allocation for the universe under `corr`.
  pub fn min_variance(
    &self,
    universe: &AssetUniverse,
    corr: &Array2<f64>,
  ) -> Result<PortfolioResult, PortfolioError> {
    self.validate(universe, corr)?;

    let cov = covariance_matrix(&universe.sigmas, corr)?;
    let inv_cov = inverse_covariance_with_tolerance(&cov, self.config.condition_tolerance)?;
    let weights = min_variance_weights(&inv_cov)?;

    let expected_return = weights.dot(&universe.mus);
    let volatility = weights.dot(&cov.dot(&weights)).max(0.0).sqrt();

    Ok(PortfolioResult {
      weights,
      expected_return,
      volatility,
    })
  }

  /// Minimum-variance allocation hitting the configured target return.
  pub fn solve_target(
    &self,
    universe: &AssetUniverse,
    corr: &Array2<f64>,
  ) -> Result<PortfolioResult, PortfolioError> {
    self.validate(universe, corr)?;
    self.check_target(universe)?;

    let cov = covariance_matrix(&universe.sigmas, corr)?;
    target_return_weights_with_tolerances(
      &cov,
      &universe.mus,
      self.config.target_return,
      self.config.condition_tolerance,
      self.config.discriminant_tolerance,
    )
  }

  fn validate(&self, universe: &AssetUniverse, corr: &Array2<f64>) -> Result<(), PortfolioError> {
    if !self.config.validate_inputs {
      return Ok(());
    }

    for (index, &value) in universe.sigmas.iter().enumerate() {
      if value <= 0.0 || value.is_nan() {
        return Err(PortfolioError::InvalidVolatility { index, value });
      }
    }

    validate_correlation(corr)?;
    if !is_positive_definite(corr) {
      return Err(PortfolioError::InvalidCorrelation(
        "correlation matrix is not positive definite".to_string(),
      ));
    }

    Ok(())
  }

  fn check_target(&self, universe: &AssetUniverse) -> Result<(), PortfolioError> {
    let target = self.config.target_return;
    let lo = universe.mus.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = universe
      .mus
      .iter()
      .cloned()
      .fold(f64::NEG_INFINITY, f64::max);

    if target >= lo && target <= hi {
      return Ok(());
    }

    match self.config.target_policy {
      TargetPolicy::Warn => {
        warn!(
          target,
          lo, hi, "target return needs leverage or short positions"
        );
        Ok(())
      }
      TargetPolicy::Reject => Err(PortfolioError::InfeasibleTarget { target, lo, hi }),
      TargetPolicy::Silent => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;
  use ndarray::Array2;
  use tracing_test::traced_test;

  use crate::correlation::constant_correlation_matrix;

  use super::*;

  fn engine_with_target(target_return: f64, target_policy: TargetPolicy) -> MeanVarianceEngine {
    MeanVarianceEngine::new(MeanVarianceConfig {
      target_return,
      target_policy,
      ..MeanVarianceConfig::default()
    })
  }

  #[test]
  fn pipeline_produces_fully_invested_weights() {
    let universe = AssetUniverse::reference();
    let corr = constant_correlation_matrix(universe.len(), 0.2);
    let engine = MeanVarianceEngine::new(MeanVarianceConfig::default());

    let gmv = engine.min_variance(&universe, &corr).unwrap();
    assert_relative_eq!(gmv.weights.sum(), 1.0, epsilon = 1e-9);
    assert!(gmv.volatility > 0.0);

    let engine = engine_with_target(0.08, TargetPolicy::Silent);
    let solved = engine.solve_target(&universe, &corr).unwrap();
    assert_relative_eq!(solved.weights.sum(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(solved.expected_return, 0.08, epsilon = 1e-9);
  }

  #[test]
  fn reject_policy_fails_on_unreachable_target() {
    let universe = AssetUniverse::reference();
    let corr = Array2::<f64>::eye(universe.len());
    let engine = engine_with_target(0.5, TargetPolicy::Reject);

    assert!(matches!(
      engine.solve_target(&universe, &corr),
      Err(PortfolioError::InfeasibleTarget { .. })
    ));
  }

  #[test]
  #[traced_test]
  fn warn_policy_logs_and_still_solves() {
    let universe = AssetUniverse::reference();
    let corr = Array2::<f64>::eye(universe.len());
    let engine = engine_with_target(0.5, TargetPolicy::Warn);

    let result = engine.solve_target(&universe, &corr).unwrap();
    assert_relative_eq!(result.expected_return, 0.5, epsilon = 1e-9);
    assert!(logs_contain("needs leverage or short positions"));
  }

  #[test]
  fn validation_rejects_bad_inputs() {
    let engine = MeanVarianceEngine::new(MeanVarianceConfig::default());

    let universe = AssetUniverse {
      tickers: vec!["A".to_string(), "B".to_string()],
      mus: array![0.05, 0.07],
      sigmas: array![0.07, -0.1],
    };
    let corr = Array2::<f64>::eye(2);
    assert!(matches!(
      engine.min_variance(&universe, &corr),
      Err(PortfolioError::InvalidVolatility { index: 1, .. })
    ));

    let universe = AssetUniverse::reference();
    let non_psd = array![
      [1.0, 0.9, -0.9, 0.0],
      [0.9, 1.0, 0.9, 0.0],
      [-0.9, 0.9, 1.0, 0.0],
      [0.0, 0.0, 0.0, 1.0]
    ];
    assert!(matches!(
      engine.min_variance(&universe, &non_psd),
      Err(PortfolioError::InvalidCorrelation(_))
    ));
  }

  #[test]
  fn validation_can_be_disabled() {
    let universe = AssetUniverse::reference();
    let corr = constant_correlation_matrix(universe.len(), 0.2);
    let engine = MeanVarianceEngine::new(MeanVarianceConfig {
      validate_inputs: false,
      ..MeanVarianceConfig::default()
    });

    assert!(engine.min_variance(&universe, &corr).is_ok());
  }
}
