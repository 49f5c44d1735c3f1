//! Seeded input generation.
use std::ops::RangeInclusive;

use rand::{Rng, RngExt};

use crate::closest::Point;

/// `n` integers drawn uniformly from `range`.
pub fn random_values<R: Rng + ?Sized>(
    n: usize,
    range: RangeInclusive<i64>,
    rng: &mut R,
) -> Vec<i64> {
    (0..n).map(|_| rng.random_range(range.clone())).collect()
}

/// `n` points whose coordinates are integers drawn uniformly from `range`.
///
/// Integer coordinates make exact duplicates possible, which the closest-pair search must handle.
pub fn random_points<R: Rng + ?Sized>(
    n: usize,
    range: RangeInclusive<u32>,
    rng: &mut R,
) -> Vec<Point> {
    (0..n)
        .map(|_| {
            let x = rng.random_range(range.clone());
            let y = rng.random_range(range.clone());
            Point::new(x as f64, y as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn values_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let values = random_values(1_000, 1..=10, &mut rng);
        assert_eq!(values.len(), 1_000);
        assert!(values.iter().all(|v| (1..=10).contains(v)));
    }

    #[test]
    fn points_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let points = random_points(500, 0..=100, &mut rng);
        assert_eq!(points.len(), 500);
        let in_range = |c: f64| (0.0..=100.0).contains(&c);
        assert!(points.iter().all(|p| in_range(p.x) && in_range(p.y)));
    }

    #[test]
    fn same_seed_same_data() {
        let a = random_values(64, 0..=1_000_000, &mut ChaCha8Rng::seed_from_u64(12345));
        let b = random_values(64, 0..=1_000_000, &mut ChaCha8Rng::seed_from_u64(12345));
        assert_eq!(a, b);
    }
}
