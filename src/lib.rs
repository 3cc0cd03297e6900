//! # percolate
//!
//! Monte Carlo estimation of continuum percolation on a square lattice.
//!
//! Particles are dropped one at a time on the interior of an `L x L`
//! lattice. Each new particle bonds to earlier particles, and to the two
//! electrode rows, that lie within Euclidean radius `R`. A trial ends when
//! a chain of bonds joins the bottom electrode to the top one, or when the
//! target particle count is placed. Repeating trials gives an empirical
//! distribution of the particle count at which percolation occurs.
//!
//! ## Modules
//!
//! - [`collections`]: union-find connectivity engine
//! - [`lattice`]: positions, coordinates and electrode layout
//! - [`params`]: validated trial parameters
//! - [`random`]: seeded RNGs and the injectable draw source
//! - [`trial`]: a single growth process and its rendering snapshot
//! - [`stats`]: mean, variance, confidence interval, empirical CDF
//! - [`experiment`]: repeated trials feeding [`stats::Summary`]
//!
//! ## Design Philosophy
//!
//! - **Deterministic by construction**: randomness is always passed in,
//!   so a seed or a scripted draw list reproduces a run exactly
//! - **Simulation only**: the crate produces plain data snapshots and
//!   leaves drawing and plotting to the caller

pub mod collections;
pub mod experiment;
pub mod lattice;
pub mod params;
pub mod random;
pub mod stats;
pub mod trial;
