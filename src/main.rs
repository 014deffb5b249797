use anyhow::Result;
use markowitz_rs::correlation::constant_correlation_matrix;
use markowitz_rs::correlation::transform_corr_matrix;
use markowitz_rs::data::AssetUniverse;
use markowitz_rs::engine::MeanVarianceConfig;
use markowitz_rs::engine::MeanVarianceEngine;
use markowitz_rs::types::PortfolioResult;
use prettytable::row;
use prettytable::Table;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let universe = AssetUniverse::reference();

  // Damp a constant-correlation structure toward independence.
  let corr = constant_correlation_matrix(universe.len(), 0.25);
  let corr = transform_corr_matrix(&corr, 0.8)?;

  let engine = MeanVarianceEngine::new(MeanVarianceConfig {
    target_return: 0.08,
    ..MeanVarianceConfig::default()
  });

  let gmv = engine.min_variance(&universe, &corr)?;
  print_allocation("Global minimum variance", &universe, &gmv);

  let solved = engine.solve_target(&universe, &corr)?;
  print_allocation("Minimum variance at 8% target return", &universe, &solved);

  Ok(())
}

fn print_allocation(title: &str, universe: &AssetUniverse, result: &PortfolioResult) {
  println!("\n{title}");

  let mut table = Table::new();
  table.add_row(row!["asset", "mu", "sigma", "weight"]);
  for (i, ticker) in universe.tickers.iter().enumerate() {
    table.add_row(row![
      ticker,
      format!("{:.4}", universe.mus[i]),
      format!("{:.4}", universe.sigmas[i]),
      format!("{:.4}", result.weights[i]),
    ]);
  }
  table.printstd();

  println!(
    "expected return: {:.4}  volatility: {:.4}",
    result.expected_return, result.volatility
  );
}
