//! Statistics over the particle counts at which trials percolated.
//!
//! All functions are stateless and return `None` instead of a sentinel
//! when the input cannot support the statistic (empty, too short, or
//! containing NaN/Inf).
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-compensated (Kahan) summation.
//! - **Variance/StdDev**: Welford's online algorithm, sample variance
//!   with denominator `n − 1`.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation,
//!   `mean ± 1.96 · s / √n`.

use serde::Serialize;

/// Two-sided 95% quantile of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Default number of points kept by [`empirical_cdf_sample`] in a [`Summary`].
pub const DEFAULT_CDF_POINTS: usize = 100;

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolate::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance (Bessel's correction, denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolate::stats::variance;
/// assert_eq!(variance(&[2.0, 4.0]), Some(2.0));
/// assert_eq!(variance(&[2.0]), None);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = RunningStats::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// 95% confidence interval for the mean, `(lower, upper)`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolate::stats::confidence_interval_95;
/// let (lo, hi) = confidence_interval_95(&[2.0, 4.0]).unwrap();
/// assert!((lo - 1.04).abs() < 1e-12);
/// assert!((hi - 4.96).abs() < 1e-12);
/// ```
pub fn confidence_interval_95(data: &[f64]) -> Option<(f64, f64)> {
    let avg = mean(data)?;
    let sd = std_dev(data)?;
    let half_width = Z_95 * sd / (data.len() as f64).sqrt();
    Some((avg - half_width, avg + half_width))
}

/// One point of a sampled empirical CDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    pub value: f64,
    /// `index / len` for the last sampled index holding `value`.
    pub fraction: f64,
}

/// Samples at most about `max_points` points of the empirical CDF of
/// `sorted`.
///
/// Every `stride`-th element is taken, `stride = max(len / max_points, 1)`,
/// paired with `index / len`. When a value is sampled more than once only
/// its last sampled fraction is kept.
///
/// Returns an empty vector for empty input or `max_points == 0`.
///
/// # Examples
/// ```
/// use percolate::stats::empirical_cdf_sample;
/// let points = empirical_cdf_sample(&[1.0, 1.0, 2.0, 3.0], 100);
/// let pairs: Vec<_> = points.iter().map(|p| (p.value, p.fraction)).collect();
/// assert_eq!(pairs, vec![(1.0, 0.25), (2.0, 0.5), (3.0, 0.75)]);
/// ```
pub fn empirical_cdf_sample(sorted: &[f64], max_points: usize) -> Vec<CdfPoint> {
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "empirical_cdf_sample expects sorted input"
    );
    if sorted.is_empty() || max_points == 0 {
        return Vec::new();
    }

    let len = sorted.len();
    let stride = (len / max_points).max(1);
    let mut points: Vec<CdfPoint> = Vec::with_capacity(len.min(max_points + 1));
    for index in (0..len).step_by(stride) {
        let point = CdfPoint {
            value: sorted[index],
            fraction: index as f64 / len as f64,
        };
        match points.last_mut() {
            Some(last) if last.value == point.value => *last = point,
            _ => points.push(point),
        }
    }
    points
}

/// Compensated summation (Neumaier's variant of Kahan summation).
///
/// Handles the case where the addend is larger in magnitude than the
/// running sum.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Streaming accumulator
// ---------------------------------------------------------------------------

/// Streaming mean and variance (Welford).
///
/// Used to report progress while trials are still running, without
/// re-scanning the outcome list.
///
/// # Examples
/// ```
/// use percolate::stats::RunningStats;
/// let mut acc = RunningStats::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Returns the sample variance (n − 1 denominator), or `None` if fewer
    /// than 2 samples have been added.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Descriptive statistics of a set of percolation counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub confidence_interval: (f64, f64),
    /// Sparse empirical CDF of the sorted counts.
    pub cdf: Vec<CdfPoint>,
}

impl Summary {
    /// Summarises the particle counts recorded by percolating trials.
    ///
    /// # Returns
    /// - `None` if fewer than two counts are given.
    ///
    /// # Examples
    /// ```
    /// use percolate::stats::Summary;
    /// let summary = Summary::from_counts(&[4, 2, 3, 1], 100).unwrap();
    /// assert_eq!(summary.mean, 2.5);
    /// assert_eq!(summary.cdf.len(), 4);
    /// assert_eq!(summary.cdf[0].value, 1.0);
    /// ```
    pub fn from_counts(counts: &[usize], max_cdf_points: usize) -> Option<Self> {
        let mut sorted: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count: sorted.len(),
            mean: mean(&sorted)?,
            std_dev: std_dev(&sorted)?,
            confidence_interval: confidence_interval_95(&sorted)?,
            cdf: empirical_cdf_sample(&sorted, max_cdf_points),
        })
    }
}
