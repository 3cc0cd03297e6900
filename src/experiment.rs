//! Repeated trials and their aggregate statistics.
//!
//! An [`Experiment`] reuses one [`Trial`] with the target widened to the
//! whole lattice, so every run grows until the electrodes connect. The
//! particle count of each percolating run feeds a [`Summary`].

use log::info;
use serde::Serialize;

use crate::params::{ParameterError, TrialParams};
use crate::random::PositionSource;
use crate::stats::{RunningStats, Summary, DEFAULT_CDF_POINTS};
use crate::trial::Trial;

/// Counts and statistics produced by [`Experiment::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    /// Number of trials run.
    pub trials: usize,
    /// Particle count at percolation of every trial that percolated, in
    /// run order.
    pub counts: Vec<usize>,
    /// `None` when fewer than two trials percolated.
    pub summary: Option<Summary>,
}

impl ExperimentReport {
    /// Fraction of trials that percolated.
    pub fn percolation_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.counts.len() as f64 / self.trials as f64
    }
}

/// A batch of exhaustive-growth trials on one lattice.
///
/// # Examples
/// ```
/// use percolate::experiment::Experiment;
/// use percolate::params::TrialParams;
/// use percolate::random::create_rng;
///
/// let params = TrialParams::new(8, 1, 1).unwrap();
/// let report = Experiment::new(params, 50).unwrap().run(&mut create_rng(1));
/// assert_eq!(report.counts.len(), 50);
/// assert!(report.summary.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Experiment {
    params: TrialParams,
    trials: usize,
    cdf_points: usize,
}

impl Experiment {
    /// Prepares `trials` runs on the lattice of `params`; the target of
    /// `params` is replaced by `L*L`.
    ///
    /// # Errors
    /// Propagates [`ParameterError`] from widening the target.
    pub fn new(params: TrialParams, trials: usize) -> Result<Self, ParameterError> {
        let exhaustive = params.side() * params.side();
        Ok(Self {
            params: params.with_target(exhaustive)?,
            trials,
            cdf_points: DEFAULT_CDF_POINTS,
        })
    }

    /// Caps the number of points in the sampled CDF.
    pub fn with_cdf_points(mut self, cdf_points: usize) -> Self {
        self.cdf_points = cdf_points;
        self
    }

    pub fn params(&self) -> &TrialParams {
        &self.params
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn run<S: PositionSource + ?Sized>(&self, source: &mut S) -> ExperimentReport {
        let mut trial = Trial::new(self.params);
        let mut running = RunningStats::new();
        let progress_every = (self.trials / 10).max(1);

        for index in 0..self.trials {
            if let Some(count) = trial.run(source).particles_at_percolation {
                running.update(count as f64);
            }
            if (index + 1) % progress_every == 0 {
                info!(
                    "{}/{} trials, {} percolated, running mean {:.2}",
                    index + 1,
                    self.trials,
                    running.count(),
                    running.mean().unwrap_or(f64::NAN)
                );
            }
        }

        let counts = trial.history().to_vec();
        ExperimentReport {
            trials: self.trials,
            summary: Summary::from_counts(&counts, self.cdf_points),
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_target_widened_to_lattice() {
        let params = TrialParams::new(5, 1, 2).unwrap();
        let experiment = Experiment::new(params, 3).unwrap();
        assert_eq!(experiment.params().target(), 25);
        assert_eq!(experiment.params().radius(), 1);
        assert_eq!(experiment.trials(), 3);
    }

    #[test]
    fn test_every_exhaustive_trial_percolates() {
        let params = TrialParams::new(10, 1, 1).unwrap();
        let report = Experiment::new(params, 40).unwrap().run(&mut create_rng(5));
        assert_eq!(report.trials, 40);
        assert_eq!(report.counts.len(), 40);
        assert_eq!(report.percolation_rate(), 1.0);

        let summary = report.summary.unwrap();
        assert_eq!(summary.count, 40);
        // A radius-1 path needs at least L - 2 particles.
        assert!(summary.mean >= 8.0 && summary.mean <= 80.0, "mean {}", summary.mean);
        let (lo, hi) = summary.confidence_interval;
        assert!(lo <= summary.mean && summary.mean <= hi);
        assert!(summary.cdf.len() <= 40);
    }

    #[test]
    fn test_larger_radius_percolates_sooner() {
        let small = TrialParams::new(16, 1, 1).unwrap();
        let large = TrialParams::new(16, 3, 1).unwrap();
        let small = Experiment::new(small, 60).unwrap().run(&mut create_rng(8));
        let large = Experiment::new(large, 60).unwrap().run(&mut create_rng(8));
        let small_mean = small.summary.unwrap().mean;
        let large_mean = large.summary.unwrap().mean;
        assert!(large_mean < small_mean, "R=3 mean {large_mean} vs R=1 mean {small_mean}");
    }

    #[test]
    fn test_seeded_experiment_is_reproducible() {
        let params = TrialParams::new(7, 2, 1).unwrap();
        let experiment = Experiment::new(params, 25).unwrap();
        let a = experiment.run(&mut create_rng(77));
        let b = experiment.run(&mut create_rng(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_trials_for_summary() {
        let params = TrialParams::new(6, 1, 1).unwrap();
        let report = Experiment::new(params, 1).unwrap().run(&mut create_rng(2));
        assert_eq!(report.counts.len(), 1);
        assert_eq!(report.summary, None);

        let report = Experiment::new(params, 0).unwrap().run(&mut create_rng(2));
        assert!(report.counts.is_empty());
        assert_eq!(report.percolation_rate(), 0.0);
    }

    #[test]
    fn test_cdf_points_cap() {
        let params = TrialParams::new(6, 1, 1).unwrap();
        let report = Experiment::new(params, 200)
            .unwrap()
            .with_cdf_points(10)
            .run(&mut create_rng(4));
        let cdf = report.summary.unwrap().cdf;
        assert!(!cdf.is_empty() && cdf.len() <= 10, "{} points", cdf.len());
    }
}
