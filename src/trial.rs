//! One percolation trial: drop particles until the electrodes connect.
//!
//! # Algorithm
//!
//! A fresh [`UnionFind`] over `L*L + 2` elements is built for every run.
//! Row `0` is unioned into the bottom electrode and row `L - 1` into the
//! top electrode. Particles are then dropped uniformly on the interior
//! rows; a draw that hits an occupied cell is discarded and redrawn.
//!
//! A new particle at `(x, y)` bonds to every cell `(i, j)` with
//! `(i - x)² + (j - y)² <= R²` that is either already occupied or lies on
//! an electrode row. Empty interior cells are never bonded: a particle
//! only links back to particles placed before it.
//!
//! After each bond the electrodes are tested. The first time they share
//! a root the trial stops, even mid-scan, and records the particle count.
//! Otherwise the trial stops once the (capped) target count is placed.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::collections::UnionFind;
use crate::lattice::{Lattice, Site};
use crate::params::{ParameterError, TrialParams};
use crate::random::PositionSource;

/// Where a trial is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    Growing,
    /// The electrodes connected or the target count was placed.
    Done,
}

/// Result of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialOutcome {
    pub percolates: bool,
    /// Number of particles placed when the electrodes connected.
    pub particles_at_percolation: Option<usize>,
}

/// An admitted bond between two cells.
///
/// `from` is the cell on the lower row when the rows differ; the direction
/// carries no connectivity meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bond {
    pub from: usize,
    pub to: usize,
    /// `from` ended the run in the same component as the bottom electrode.
    pub bottom_connected: bool,
}

/// A cell of the lattice as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub position: usize,
    pub x: usize,
    pub y: usize,
    pub site: Site,
}

/// Read-only picture of the last run, detached from the trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatticeSnapshot {
    pub side: usize,
    pub percolates: bool,
    pub vertices: Vec<Vertex>,
    pub bonds: Vec<Bond>,
}

impl LatticeSnapshot {
    /// Bonds reachable from the bottom electrode.
    pub fn bottom_connected_bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter().filter(|bond| bond.bottom_connected)
    }
}

/// A reusable percolation trial.
///
/// Every [`run`](Trial::run) starts from an empty lattice; the only state
/// carried between runs is the [`history`](Trial::history) of particle
/// counts at which earlier runs percolated.
///
/// # Examples
/// ```
/// use percolate::params::TrialParams;
/// use percolate::random::ScriptedDraws;
/// use percolate::trial::Trial;
///
/// // A single particle in the middle of a 3x3 lattice touches both
/// // electrode rows.
/// let mut trial = Trial::new(TrialParams::new(3, 1, 3).unwrap());
/// let outcome = trial.run(&mut ScriptedDraws::new([4]));
/// assert!(outcome.percolates);
/// assert_eq!(outcome.particles_at_percolation, Some(1));
/// assert_eq!(trial.history(), &[1]);
/// ```
#[derive(Debug, Clone)]
pub struct Trial {
    params: TrialParams,
    lattice: Lattice,
    occupied: Vec<bool>,
    particles: Vec<usize>,
    bonds: Vec<Bond>,
    state: TrialState,
    outcome: Option<TrialOutcome>,
    history: Vec<usize>,
}

impl Trial {
    pub fn new(params: TrialParams) -> Self {
        let lattice = params.lattice();
        Self {
            params,
            lattice,
            occupied: vec![false; lattice.len()],
            particles: Vec::new(),
            bonds: Vec::new(),
            state: TrialState::Growing,
            outcome: None,
            history: Vec::new(),
        }
    }

    pub fn params(&self) -> &TrialParams {
        &self.params
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Changes the target particle count for subsequent runs.
    ///
    /// # Errors
    /// Returns [`ParameterError::TargetNotPositive`] if `target == 0`.
    pub fn set_target(&mut self, target: usize) -> Result<(), ParameterError> {
        self.params = self.params.with_target(target)?;
        Ok(())
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    /// Outcome of the last completed run.
    pub fn outcome(&self) -> Option<TrialOutcome> {
        self.outcome
    }

    /// Particle counts of every run that percolated, in run order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Positions of the particles placed in the last run, in drop order.
    pub fn particles(&self) -> &[usize] {
        &self.particles
    }

    /// # Panics
    /// Panics if `position >= L*L`.
    pub fn is_occupied(&self, position: usize) -> bool {
        self.occupied[position]
    }

    /// Bonds admitted during the last run, in admission order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Runs one growth process to completion.
    ///
    /// Clears the lattice, wires the electrodes and drops particles drawn
    /// from `source` until percolation or until the target count (capped
    /// at the interior size) is placed.
    pub fn run<S: PositionSource + ?Sized>(&mut self, source: &mut S) -> TrialOutcome {
        self.reset();
        let mut uf = self.wire_electrodes();

        let target = self.params.effective_target();
        if target < self.params.target() {
            warn!(
                "target {} exceeds the {} interior cells of a {}x{} lattice, capping",
                self.params.target(),
                target,
                self.lattice.side(),
                self.lattice.side()
            );
        }

        let interior = self.lattice.interior();
        let mut percolates = false;
        while !percolates && self.particles.len() < target {
            let position = source.draw(interior.clone());
            if self.occupied[position] {
                continue;
            }
            self.occupied[position] = true;
            self.particles.push(position);
            percolates = self.attach(position, &mut uf);
        }

        let bottom = self.lattice.bottom_electrode();
        for bond in &mut self.bonds {
            bond.bottom_connected = uf.connected(bottom, self.lattice.element(bond.from));
        }

        let outcome = if percolates {
            let count = self.particles.len();
            self.history.push(count);
            debug!("percolated after {count} particles, {} bonds", self.bonds.len());
            TrialOutcome {
                percolates: true,
                particles_at_percolation: Some(count),
            }
        } else {
            debug!(
                "no percolation after {} particles, {} components left",
                self.particles.len(),
                uf.component_count()
            );
            TrialOutcome {
                percolates: false,
                particles_at_percolation: None,
            }
        };

        self.state = TrialState::Done;
        self.outcome = Some(outcome);
        outcome
    }

    /// Copies the last run into a renderer-facing snapshot.
    pub fn snapshot(&self) -> LatticeSnapshot {
        let vertices = (0..self.lattice.len())
            .map(|position| {
                let (x, y) = self.lattice.coords(position);
                let site = if self.occupied[position] {
                    Site::Occupied
                } else if self.lattice.is_electrode_row(x) {
                    Site::Electrode
                } else {
                    Site::Empty
                };
                Vertex {
                    position,
                    x,
                    y,
                    site,
                }
            })
            .collect();

        LatticeSnapshot {
            side: self.lattice.side(),
            percolates: self.outcome.is_some_and(|o| o.percolates),
            vertices,
            bonds: self.bonds.clone(),
        }
    }

    fn reset(&mut self) {
        self.occupied.clear();
        self.occupied.resize(self.lattice.len(), false);
        self.particles.clear();
        self.bonds.clear();
        self.state = TrialState::Growing;
        self.outcome = None;
    }

    fn wire_electrodes(&self) -> UnionFind {
        let lattice = self.lattice;
        let mut uf = UnionFind::new(lattice.element_count());
        for position in lattice.bottom_row() {
            uf.union(lattice.element(position), lattice.bottom_electrode());
        }
        for position in lattice.top_row() {
            uf.union(lattice.element(position), lattice.top_electrode());
        }
        uf
    }

    /// Bonds a freshly placed particle; returns `true` on percolation.
    fn attach(&mut self, position: usize, uf: &mut UnionFind) -> bool {
        let lattice = self.lattice;
        let (x, _) = lattice.coords(position);
        let (bottom, top) = (lattice.bottom_electrode(), lattice.top_electrode());

        for (i, j) in lattice.neighbours(position, self.params.radius(), self.params.radius_squared()) {
            let candidate = lattice.position(i, j);
            if !self.occupied[candidate] && !lattice.is_electrode_row(i) {
                continue;
            }

            let (from, to) = if i <= x {
                (candidate, position)
            } else {
                (position, candidate)
            };
            uf.union(lattice.element(from), lattice.element(to));
            self.bonds.push(Bond {
                from,
                to,
                bottom_connected: false,
            });
            trace!("bond {from} -> {to}");

            if uf.connected(bottom, top) {
                return true;
            }
        }
        false
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn particles_distinct_and_interior(
            seed in 0_u64..10000,
            side in 3_usize..12,
            radius in 1_usize..4,
            target in 1_usize..150,
        ) {
            let mut t = Trial::new(TrialParams::new(side, radius, target).unwrap());
            let outcome = t.run(&mut create_rng(seed));
            let lattice = t.lattice();

            let mut seen = vec![false; lattice.len()];
            for &p in t.particles() {
                prop_assert!(lattice.interior().contains(&p));
                prop_assert!(!seen[p], "duplicate particle {p}");
                seen[p] = true;
            }
            prop_assert!(t.particles().len() <= t.params().effective_target());
            if !outcome.percolates {
                prop_assert_eq!(t.particles().len(), t.params().effective_target());
            } else {
                prop_assert_eq!(outcome.particles_at_percolation, Some(t.particles().len()));
            }
        }

        #[test]
        fn bonds_respect_admission_rule(
            seed in 0_u64..10000,
            side in 3_usize..10,
            radius in 1_usize..3,
        ) {
            let mut t = Trial::new(TrialParams::new(side, radius, side * side).unwrap());
            t.run(&mut create_rng(seed));
            let lattice = t.lattice();
            let r2 = t.params().radius_squared();

            for bond in t.bonds() {
                let (fx, fy) = lattice.coords(bond.from);
                let (tx, ty) = lattice.coords(bond.to);
                prop_assert!(fx <= tx);
                prop_assert!(fx.abs_diff(tx).pow(2) + fy.abs_diff(ty).pow(2) <= r2);
                for (p, x) in [(bond.from, fx), (bond.to, tx)] {
                    prop_assert!(t.is_occupied(p) || lattice.is_electrode_row(x));
                }
            }
        }
    }
}
