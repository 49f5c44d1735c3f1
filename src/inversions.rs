//! Inversion counting via merge sort.
//!
//! An inversion is a pair of indices `(i, j)` with `i < j` and `data[i] > data[j]`. Counts are
//! `u64`: the largest possible count, n(n-1)/2, fits for every n below ~6·10⁹, which is past any
//! slice that can be held in memory.

/// Merges `left` and `right` (both sorted) into `out`, returning the number of cross inversions.
///
/// When the head of `right` is taken while `left` still holds `r` elements, all `r` of them are
/// larger, so the whole run is counted at once.
fn merge_and_count<T: Ord + Copy>(left: &[T], right: &[T], out: &mut [T]) -> u64 {
    debug_assert_eq!(left.len() + right.len(), out.len());
    let (mut i, mut j, mut k) = (0, 0, 0);
    let mut inversions = 0u64;

    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            out[k] = left[i];
            i += 1;
        } else {
            out[k] = right[j];
            j += 1;
            inversions += (left.len() - i) as u64;
        }
        k += 1;
    }

    // Copy whichever side is left over.
    let rest_left = left.len() - i;
    out[k..k + rest_left].copy_from_slice(&left[i..]);
    out[k + rest_left..].copy_from_slice(&right[j..]);

    inversions
}

/// Sorts `data` in place and returns its inversion count. `scratch` must be as long as `data`.
fn sort_count<T: Ord + Copy>(data: &mut [T], scratch: &mut [T]) -> u64 {
    if data.len() <= 1 {
        return 0;
    }

    let mid = data.len() / 2;
    let mut inversions = {
        let (left, right) = data.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        sort_count(left, scratch_left) + sort_count(right, scratch_right)
    };

    let (left, right) = data.split_at(mid);
    inversions += merge_and_count(left, right, scratch);
    data.copy_from_slice(scratch);

    inversions
}

/// Returns a sorted copy of `data` together with the number of inversions in `data`.
pub fn sort_and_count<T: Ord + Copy>(data: &[T]) -> (Vec<T>, u64) {
    let mut sorted = data.to_vec();
    let mut scratch = data.to_vec();
    let inversions = sort_count(&mut sorted, &mut scratch);
    (sorted, inversions)
}

/// Counts pairs `(i, j)` with `i < j` and `data[i] > data[j]` in O(n log n).
///
/// `data` is not modified.
pub fn count_inversions<T: Ord + Copy>(data: &[T]) -> u64 {
    sort_and_count(data).1
}

/// Quadratic reference count, for verification of small inputs.
pub fn count_inversions_naive<T: Ord>(data: &[T]) -> u64 {
    let mut inversions = 0;
    for (i, a) in data.iter().enumerate() {
        inversions += data[i + 1..].iter().filter(|b| a > *b).count() as u64;
    }
    inversions
}
