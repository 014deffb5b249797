//! # Mean-Variance Portfolio Analytics
//!
//! $$
//! \min_{\mathbf{w}} \ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{w}^\top \mathbf{1} = 1,\ \mathbf{w}^\top \mu = r^\*
//! $$
//!
//! `markowitz-rs` computes closed-form mean-variance optimal portfolio weights
//! from asset statistics: expected returns, volatilities and a correlation
//! structure. The covariance matrix is derived from volatilities and
//! correlations, inverted, and fed to the two Lagrangian solutions — the
//! global minimum-variance portfolio and the minimum-variance portfolio
//! achieving a requested target return.
//!
//! ## Modules
//!
//! | Module          | Description                                                          |
//! |-----------------|----------------------------------------------------------------------|
//! | [`data`]        | Asset universe construction, manual or randomized with a seed.       |
//! | [`correlation`] | Correlation validation and the identity-rescaling transformer.       |
//! | [`covariance`]  | Covariance construction from volatilities and correlations.          |
//! | [`optimizers`]  | Dense inversion and the closed-form weight solutions.                |
//! | [`engine`]      | Configuration and single-entry-point orchestration.                  |
//! | [`types`]       | Result containers, frontier scalars and target policies.             |
//! | [`error`]       | Typed failures for shape, conditioning and degeneracy problems.      |
//!
//! Every operation is a pure, synchronous function over dense in-memory
//! matrices; independent calls can run in parallel with no coordination.

pub mod correlation;
pub mod covariance;
pub mod data;
pub mod engine;
pub mod error;
pub mod optimizers;
pub mod types;
