//! Benchmark harness: generates seeded inputs, times every algorithm call, records peak heap
//! usage and cross-checks results before they land in a [`Report`].
//!
//! ```text
//!  BenchConfig ──► Harness::run
//!                   ├─ for n in array_sizes:  values ─► select_kth, count_inversions
//!                   └─ for n in point_sizes:  points ─► closest_pair
//!                        each call wrapped in measure() ─► Row ─► Report
//! ```
pub mod alloc;
pub mod data;
pub mod report;

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::closest::{self, Point};
use crate::error::{Error, Result};
use crate::inversions;
use crate::select;

pub use alloc::PeakAlloc;
pub use report::{Algorithm, Check, Report, Row};

/// Which order statistic the selection benchmark asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankRule {
    /// `max(n / 2, 1)`
    Median,
    /// `(n + 3) / 4`
    LowerQuartile,
    /// The same `k` for every size.
    Fixed(usize),
}

impl RankRule {
    pub fn rank_for(&self, n: usize) -> usize {
        match *self {
            RankRule::Median => (n / 2).max(1),
            RankRule::LowerQuartile => (n + 3) / 4,
            RankRule::Fixed(k) => k,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Sequence lengths for selection and inversion counting.
    pub array_sizes: Vec<usize>,
    /// Point-set sizes for the closest-pair search.
    pub point_sizes: Vec<usize>,
    pub seed: u64,
    pub rank: RankRule,
    pub value_range: RangeInclusive<i64>,
    pub coordinate_range: RangeInclusive<u32>,
    /// Cross-check results against the reference implementations.
    pub verify: bool,
    /// Largest input handed to the quadratic references.
    pub verify_limit: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            array_sizes: vec![100, 1_000, 10_000, 100_000],
            point_sizes: vec![10, 100, 1_000, 100_000],
            seed: 12345,
            rank: RankRule::Median,
            value_range: 1..=1_000_000,
            coordinate_range: 0..=1_000_000,
            verify: true,
            verify_limit: 2_000,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.array_sizes.is_empty() && self.point_sizes.is_empty() {
            return Err(Error::configuration("no input sizes to benchmark"));
        }
        if self.array_sizes.contains(&0) {
            return Err(Error::configuration("sequence sizes must be at least 1"));
        }
        if let Some(&n) = self.point_sizes.iter().find(|&&n| n < 2) {
            return Err(Error::configuration(format!(
                "point sets need at least 2 points, got size {n}"
            )));
        }
        if let RankRule::Fixed(k) = self.rank {
            if let Some(&n) = self.array_sizes.iter().find(|&&n| k == 0 || k > n) {
                return Err(Error::configuration(format!(
                    "rank {k} is not valid for sequence size {n}"
                )));
            }
        }
        if self.value_range.is_empty() {
            return Err(Error::configuration("value range is empty"));
        }
        if self.coordinate_range.is_empty() {
            return Err(Error::configuration("coordinate range is empty"));
        }
        Ok(())
    }
}

/// Result of one timed call.
#[derive(Debug, Clone)]
pub struct Measurement<T> {
    pub value: T,
    pub elapsed: Duration,
    /// Peak heap bytes allocated during the call, `None` without a tracker.
    pub peak_bytes: Option<usize>,
}

/// Runs `f` once, timing it and, when `tracker` is the installed global allocator, recording how
/// far the heap rose above its level at entry.
pub fn measure<T>(tracker: Option<&PeakAlloc>, f: impl FnOnce() -> T) -> Measurement<T> {
    let baseline = tracker.map(PeakAlloc::reset_peak);
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    let peak_bytes = tracker
        .zip(baseline)
        .map(|(tracker, baseline)| tracker.peak().saturating_sub(baseline));

    Measurement {
        value,
        elapsed,
        peak_bytes,
    }
}

fn check(verified: Option<bool>) -> Check {
    match verified {
        Some(true) => Check::Passed,
        Some(false) => Check::Failed,
        None => Check::Skipped,
    }
}

pub struct Harness<'a> {
    config: BenchConfig,
    tracker: Option<&'a PeakAlloc>,
    rng: ChaCha8Rng,
}

impl<'a> Harness<'a> {
    /// Validates `config`. Pass the process' global allocator as `tracker` to get memory figures.
    pub fn new(config: BenchConfig, tracker: Option<&'a PeakAlloc>) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            tracker,
            rng,
        })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Benchmarks every configured size and returns the table. Stops at the first error.
    pub fn run(&mut self) -> Result<Report> {
        let mut report = Report::new();

        for n in self.config.array_sizes.clone() {
            let values = data::random_values(n, self.config.value_range.clone(), &mut self.rng);
            report.push(self.bench_select(&values)?);
            report.push(self.bench_inversions(&values));
        }

        for n in self.config.point_sizes.clone() {
            let range = self.config.coordinate_range.clone();
            let points = data::random_points(n, range, &mut self.rng);
            report.push(self.bench_closest_pair(&points)?);
        }

        for row in report.failures() {
            warn!("{} on n={} disagreed with the reference", row.algorithm, row.size);
        }
        Ok(report)
    }

    fn should_verify(&self, n: usize) -> bool {
        self.config.verify && n <= self.config.verify_limit
    }

    fn record(&self, algorithm: Algorithm, n: usize, elapsed: Duration, peak_bytes: Option<usize>) {
        debug!(
            "{algorithm} n={n}: {:?}, peak {}",
            elapsed,
            peak_bytes.map_or_else(|| "untracked".to_string(), |b| format!("{b} B"))
        );
    }

    fn bench_select(&mut self, values: &[i64]) -> Result<Row> {
        let n = values.len();
        let k = self.config.rank.rank_for(n);
        info!("{} n={n} k={k}", Algorithm::QuickSelect);

        let rng = &mut self.rng;
        let m = measure(self.tracker, || select::select_kth_with_rng(values, k, rng));
        let value = m.value?;
        self.record(Algorithm::QuickSelect, n, m.elapsed, m.peak_bytes);

        // A full sort is cheap enough to verify every size.
        let verified = self.config.verify.then(|| {
            let mut sorted = values.to_vec();
            sorted.sort_unstable();
            sorted[k - 1] == value
        });

        Ok(Row {
            algorithm: Algorithm::QuickSelect,
            size: n,
            elapsed: m.elapsed,
            peak_bytes: m.peak_bytes,
            result: format!("k={k}, value={value}"),
            check: check(verified),
        })
    }

    fn bench_inversions(&self, values: &[i64]) -> Row {
        let n = values.len();
        info!("{} n={n}", Algorithm::CountInversions);

        let m = measure(self.tracker, || inversions::count_inversions(values));
        self.record(Algorithm::CountInversions, n, m.elapsed, m.peak_bytes);

        let verified = self
            .should_verify(n)
            .then(|| inversions::count_inversions_naive(values) == m.value);

        Row {
            algorithm: Algorithm::CountInversions,
            size: n,
            elapsed: m.elapsed,
            peak_bytes: m.peak_bytes,
            result: format!("{} inv.", m.value),
            check: check(verified),
        }
    }

    fn bench_closest_pair(&self, points: &[Point]) -> Result<Row> {
        let n = points.len();
        info!("{} n={n}", Algorithm::ClosestPair);

        let m = measure(self.tracker, || closest::closest_pair_distance(points));
        let distance = m.value?;
        self.record(Algorithm::ClosestPair, n, m.elapsed, m.peak_bytes);

        let verified = self.should_verify(n).then(|| {
            closest::brute_force(points).map(|pair| pair.distance) == Some(distance)
        });

        Ok(Row {
            algorithm: Algorithm::ClosestPair,
            size: n,
            elapsed: m.elapsed,
            peak_bytes: m.peak_bytes,
            result: format!("dist={distance:.4}"),
            check: check(verified),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchConfig {
        BenchConfig {
            array_sizes: vec![1, 10, 500],
            point_sizes: vec![2, 10, 300],
            seed: 7,
            ..BenchConfig::default()
        }
    }

    #[test]
    fn rank_rules() {
        assert_eq!(RankRule::Median.rank_for(100), 50);
        assert_eq!(RankRule::Median.rank_for(1), 1);
        assert_eq!(RankRule::LowerQuartile.rank_for(100), 25);
        assert_eq!(RankRule::LowerQuartile.rank_for(1), 1);
        assert_eq!(RankRule::Fixed(3).rank_for(100), 3);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_configs() {
        let cases = [
            BenchConfig {
                array_sizes: vec![],
                point_sizes: vec![],
                ..BenchConfig::default()
            },
            BenchConfig {
                array_sizes: vec![10, 0],
                ..BenchConfig::default()
            },
            BenchConfig {
                point_sizes: vec![1],
                ..BenchConfig::default()
            },
            BenchConfig {
                array_sizes: vec![100, 5],
                rank: RankRule::Fixed(6),
                ..BenchConfig::default()
            },
            BenchConfig {
                rank: RankRule::Fixed(0),
                ..BenchConfig::default()
            },
            BenchConfig {
                value_range: 10..=1,
                ..BenchConfig::default()
            },
        ];

        for config in cases {
            let err = Harness::new(config, None).err().unwrap();
            assert!(matches!(err, Error::Configuration { .. }), "{err}");
        }
    }

    #[test]
    fn measure_without_tracker() {
        let m = measure(None, || (0..1_000u64).sum::<u64>());
        assert_eq!(m.value, 499_500);
        assert_eq!(m.peak_bytes, None);
    }

    #[test]
    fn measure_with_local_tracker() {
        // Not the global allocator, so nothing is counted during the call.
        let tracker = PeakAlloc::new();
        let m = measure(Some(&tracker), || vec![0u8; 1024].len());
        assert_eq!(m.value, 1024);
        assert_eq!(m.peak_bytes, Some(0));
    }

    #[test]
    fn run_verifies_every_row() {
        let mut harness = Harness::new(small_config(), None).unwrap();
        let report = harness.run().unwrap();

        assert_eq!(report.rows().len(), 3 * 2 + 3);
        assert!(report.rows().iter().all(|row| row.check == Check::Passed));
        assert_eq!(report.failures().count(), 0);

        let algorithms: Vec<Algorithm> = report.rows().iter().map(|row| row.algorithm).collect();
        assert_eq!(
            &algorithms[..2],
            &[Algorithm::QuickSelect, Algorithm::CountInversions]
        );
        assert_eq!(algorithms[6..], [Algorithm::ClosestPair; 3]);
    }

    #[test]
    fn verify_limit_skips_references() {
        let config = BenchConfig {
            verify_limit: 50,
            ..small_config()
        };
        let report = Harness::new(config, None).unwrap().run().unwrap();

        for row in report.rows() {
            let expected = if row.algorithm == Algorithm::QuickSelect || row.size <= 50 {
                Check::Passed
            } else {
                Check::Skipped
            };
            assert_eq!(row.check, expected, "{:?} n={}", row.algorithm, row.size);
        }
    }

    #[test]
    fn same_seed_same_results() {
        let first = Harness::new(small_config(), None).unwrap().run().unwrap();
        let second = Harness::new(small_config(), None).unwrap().run().unwrap();

        let results = |report: &Report| -> Vec<String> {
            report.rows().iter().map(|row| row.result.clone()).collect()
        };
        assert_eq!(results(&first), results(&second));
    }
}
