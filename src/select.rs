//! Order-statistic selection.
use rand::{Rng, RngExt};

use crate::error::{Error, Result};

/// Quickselect is a selection algorithm to find the kth smallest element in an unordered list.
///
/// Every round partitions the active range around a pivot drawn uniformly at random and keeps only
/// the side that holds the target index. Random pivots make the expected cost O(N) for any input
/// order, including already sorted or reversed data that defeats a fixed middle pivot.
struct QuickSelect;

impl QuickSelect {
    /// Lomuto partition scheme as used in quicksort.
    fn partition<T: Ord>(data: &mut [T], left: usize, right: usize, pivot: usize) -> usize {
        if data.is_empty() || left >= right {
            return left;
        }
        // Move pivot to the end.
        data.swap(pivot, right);
        let mut store = left;

        for i in left..right {
            if data[i] < data[right] {
                data.swap(store, i);
                store += 1;
            }
        }

        // Move pivot to its final place.
        data.swap(right, store);

        store
    }

    /// Returns the element that belongs at index `k` of the sorted order, searching left..right
    /// inclusive. Requires `left <= k <= right`.
    fn select<T: Ord + Copy, R: Rng + ?Sized>(
        data: &mut [T],
        left: usize,
        right: usize,
        k: usize,
        rng: &mut R,
    ) -> T {
        let mut left = left;
        let mut right = right;
        loop {
            if left == right {
                return data[left];
            }

            let pivot = rng.random_range(left..=right);
            let pivot = Self::partition(data, left, right, pivot);

            if k == pivot {
                return data[k];
            } else if k < pivot {
                right = pivot - 1;
            } else {
                left = pivot + 1;
            }
        }
    }
}

fn check_rank(len: usize, k: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::invalid_argument(
            "cannot select from an empty sequence",
        ));
    }
    if k == 0 || k > len {
        return Err(Error::rank_out_of_range(k, len));
    }
    Ok(())
}

/// Returns the k-th smallest value (1-indexed) of `data`, reordering `data` in the process.
pub fn select_kth_in_place<T: Ord + Copy, R: Rng + ?Sized>(
    data: &mut [T],
    k: usize,
    rng: &mut R,
) -> Result<T> {
    check_rank(data.len(), k)?;
    let right = data.len() - 1;
    Ok(QuickSelect::select(data, 0, right, k - 1, rng))
}

/// Returns the k-th smallest value (1-indexed) of `data` drawing pivots from `rng`.
///
/// `data` is left untouched; partitioning happens on a private copy.
pub fn select_kth_with_rng<T: Ord + Copy, R: Rng + ?Sized>(
    data: &[T],
    k: usize,
    rng: &mut R,
) -> Result<T> {
    check_rank(data.len(), k)?;
    let mut scratch = data.to_vec();
    let right = scratch.len() - 1;
    Ok(QuickSelect::select(&mut scratch, 0, right, k - 1, rng))
}

/// Returns the k-th smallest value (1-indexed) of `data`, i.e. `sorted(data)[k - 1]`.
///
/// Fails with [`Error::InvalidArgument`] when `data` is empty or `k` is outside `1..=data.len()`.
pub fn select_kth<T: Ord + Copy>(data: &[T], k: usize) -> Result<T> {
    select_kth_with_rng(data, k, &mut rand::rng())
}
