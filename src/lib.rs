//! Interactive dashboard over precomputed disease-seasonality artifacts.
//!
//! The heavy lifting (dimensionality-reduction embeddings, Bayesian
//! seasonality curves, plot geometry) happens offline; this crate loads the
//! resulting bundle once at startup and serves two O(1) lookups: an
//! (algorithm, dimensionality) pair to its stored embedding figures, and a
//! hovered point to its condition's seasonal band plot.

pub mod artifact;
pub mod calendar;
pub mod config;
pub mod figures;
pub mod layout;
pub mod logging;
pub mod select;
pub mod server;
