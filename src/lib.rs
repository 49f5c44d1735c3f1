//! Divide-and-conquer classics with a small measurement harness.
//!
//! - [`select_kth`]: k-th smallest element by randomized quickselect, expected O(n).
//! - [`count_inversions`]: out-of-order pairs counted during a merge sort, O(n log n).
//! - [`closest_pair_distance`]: closest two points in the plane, O(n log n).
//!
//! The [`harness`] module times these over seeded inputs and renders a results table.
pub mod closest;
pub mod error;
pub mod harness;
pub mod inversions;
pub mod select;

pub use closest::{ClosestPair, Point, brute_force, closest_pair, closest_pair_distance};
pub use error::{Error, Result};
pub use inversions::{count_inversions, count_inversions_naive, sort_and_count};
pub use select::{select_kth, select_kth_in_place, select_kth_with_rng};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reexports_cover_the_three_algorithms() {
        assert_eq!(select_kth(&[5, 3, 8, 1, 9, 2], 3), Ok(3));
        assert_eq!(count_inversions(&[4, 3, 2, 1]), 6);

        let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        assert_eq!(closest_pair_distance(&points), Ok(5.0));
    }
}
