//! Peak-memory figures with the tracker installed as this test binary's allocator.
//!
//! Kept to a single test: the counters are process-wide and parallel tests would skew them.

use dnc::harness::{BenchConfig, Harness, PeakAlloc, measure};
use dnc::{Point, closest_pair_distance, count_inversions, select_kth};

#[global_allocator]
static ALLOC: PeakAlloc = PeakAlloc::new();

#[test]
fn working_memory_is_counted() {
    let values: Vec<i64> = (0..10_000).rev().collect();
    let bytes = values.len() * size_of::<i64>();

    // Private copy only.
    let m = measure(Some(&ALLOC), || select_kth(&values, 5_000));
    assert_eq!(m.value, Ok(4_999));
    assert!(m.peak_bytes.unwrap() >= bytes);

    // Sorted copy plus merge scratch.
    let m = measure(Some(&ALLOC), || count_inversions(&values));
    assert_eq!(m.value, 10_000 * 9_999 / 2);
    assert!(m.peak_bytes.unwrap() >= 2 * bytes);

    let points: Vec<Point> = (0..1_000).map(|i| Point::new(i as f64, 0.0)).collect();
    let m = measure(Some(&ALLOC), || closest_pair_distance(&points));
    assert_eq!(m.value, Ok(1.0));
    assert!(m.peak_bytes.unwrap() >= points.len() * size_of::<Point>());

    let config = BenchConfig {
        array_sizes: vec![1_000],
        point_sizes: vec![1_000],
        ..BenchConfig::default()
    };
    let report = Harness::new(config, Some(&ALLOC)).unwrap().run().unwrap();
    assert_eq!(report.rows().len(), 3);
    assert!(report.rows().iter().all(|row| row.peak_bytes.unwrap() > 0));
    assert_eq!(report.failures().count(), 0);
}
