//! # Asset Universe
//!
//! $$
//! (\mu_i, \sigma_i)_{i=1}^{N}
//! $$
//!
//! Manual and randomized construction of per-asset expected returns and
//! volatilities feeding the covariance builder.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Uniform;

use crate::error::PortfolioError;

/// Sampling range for randomly generated expected returns.
const MU_RANGE: (f64, f64) = (0.01, 0.15);
/// Sampling range for randomly generated volatilities.
const SIGMA_RANGE: (f64, f64) = (0.05, 0.40);

/// Per-asset statistics for a universe of N assets.
///
/// `mus` and `sigmas` share the same asset ordering as `tickers`.
#[derive(ImplNew, Clone, Debug)]
pub struct AssetUniverse {
  /// Asset identifiers.
  pub tickers: Vec<String>,
  /// Expected returns, one per asset.
  pub mus: Array1<f64>,
  /// Volatilities, one per asset, all positive.
  pub sigmas: Array1<f64>,
}

impl AssetUniverse {
  /// Build a universe from manually specified statistics.
  pub fn from_stats(
    tickers: Vec<String>,
    mus: Array1<f64>,
    sigmas: Array1<f64>,
  ) -> Result<Self, PortfolioError> {
    if tickers.len() != mus.len() || mus.len() != sigmas.len() {
      return Err(PortfolioError::Dimension(format!(
        "got {} tickers, {} expected returns and {} volatilities",
        tickers.len(),
        mus.len(),
        sigmas.len()
      )));
    }

    for (index, &value) in sigmas.iter().enumerate() {
      if value <= 0.0 || value.is_nan() {
        return Err(PortfolioError::InvalidVolatility { index, value });
      }
    }

    Ok(Self {
      tickers,
      mus,
      sigmas,
    })
  }

  /// Generate a random universe of `n` assets, reproducible when `seed` is
  /// supplied.
  pub fn random(n: usize, seed: Option<u64>) -> Self {
    let mut rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    let mus = Array1::random_using(n, Uniform::new(MU_RANGE.0, MU_RANGE.1), &mut rng);
    let sigmas = Array1::random_using(n, Uniform::new(SIGMA_RANGE.0, SIGMA_RANGE.1), &mut rng);

    Self {
      tickers: (0..n).map(spreadsheet_ticker).collect(),
      mus,
      sigmas,
    }
  }

  /// The four-asset reference dataset used by the demo binary and tests.
  pub fn reference() -> Self {
    Self {
      tickers: ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect(),
      mus: Array1::from(vec![0.05, 0.07, 0.12, 0.03]),
      sigmas: Array1::from(vec![0.07, 0.28, 0.35, 0.18]),
    }
  }

  /// Number of assets.
  pub fn len(&self) -> usize {
    self.mus.len()
  }

  /// True when the universe holds no assets.
  pub fn is_empty(&self) -> bool {
    self.mus.is_empty()
  }
}

/// Spreadsheet-style ticker for index `i`: A..Z, AA, AB, ...
fn spreadsheet_ticker(mut i: usize) -> String {
  let mut out = String::new();
  loop {
    out.insert(0, (b'A' + (i % 26) as u8) as char);
    i /= 26;
    if i == 0 {
      break;
    }
    i -= 1;
  }
  out
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn manual_universe_keeps_supplied_statistics() {
    let universe = AssetUniverse::from_stats(
      vec!["A".to_string(), "B".to_string()],
      array![0.05, 0.07],
      array![0.07, 0.28],
    )
    .unwrap();

    assert_eq!(universe.len(), 2);
    assert_eq!(universe.mus[1], 0.07);
    assert_eq!(universe.sigmas[0], 0.07);
  }

  #[test]
  fn mismatched_lengths_are_rejected() {
    let result = AssetUniverse::from_stats(
      vec!["A".to_string()],
      array![0.05, 0.07],
      array![0.07, 0.28],
    );

    assert!(matches!(result, Err(PortfolioError::Dimension(_))));
  }

  #[test]
  fn non_positive_volatility_is_rejected() {
    let result = AssetUniverse::from_stats(
      vec!["A".to_string(), "B".to_string()],
      array![0.05, 0.07],
      array![0.07, 0.0],
    );

    assert!(matches!(
      result,
      Err(PortfolioError::InvalidVolatility { index: 1, .. })
    ));
  }

  #[test]
  fn seeded_generation_is_reproducible() {
    let first = AssetUniverse::random(5, Some(42));
    let second = AssetUniverse::random(5, Some(42));

    assert_eq!(first.tickers, second.tickers);
    for i in 0..5 {
      assert_eq!(first.mus[i], second.mus[i]);
      assert_eq!(first.sigmas[i], second.sigmas[i]);
    }
  }

  #[test]
  fn random_statistics_stay_in_range() {
    let universe = AssetUniverse::random(64, Some(7));

    assert_eq!(universe.len(), 64);
    for &mu in universe.mus.iter() {
      assert!(mu >= MU_RANGE.0 && mu < MU_RANGE.1);
    }
    for &sigma in universe.sigmas.iter() {
      assert!(sigma >= SIGMA_RANGE.0 && sigma < SIGMA_RANGE.1);
    }
  }

  #[test]
  fn tickers_extend_past_the_alphabet() {
    assert_eq!(spreadsheet_ticker(0), "A");
    assert_eq!(spreadsheet_ticker(25), "Z");
    assert_eq!(spreadsheet_ticker(26), "AA");
    assert_eq!(spreadsheet_ticker(27), "AB");
    assert_eq!(spreadsheet_ticker(52), "BA");
  }

  #[test]
  fn reference_universe_matches_the_dataset() {
    let universe = AssetUniverse::reference();

    assert_eq!(universe.tickers, vec!["A", "B", "C", "D"]);
    assert_eq!(universe.sigmas[2], 0.35);
    assert_eq!(universe.mus[3], 0.03);
  }
}
