//! Vector operations

use std::ops::Range;

use rand::Rng;

/// Flip the sign of every element strictly between `low` and `high`
pub fn negate_where_between(values: &mut [i64], low: i64, high: i64) {
    for v in values.iter_mut() {
        if *v > low && *v < high {
            *v = -*v;
        }
    }
}

/// Replace the first maximum element with zero
///
/// Empty input is a no-op.
pub fn zero_out_max(values: &mut [i64]) {
    let mut max_idx: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match max_idx {
            Some(m) if v <= values[m] => {}
            _ => max_idx = Some(i),
        }
    }
    if let Some(i) = max_idx {
        values[i] = 0;
    }
}

/// Run-length encode a slice into (value, run length) pairs
pub fn run_length_encode<T: PartialEq + Clone>(values: &[T]) -> Vec<(T, usize)> {
    let mut runs: Vec<(T, usize)> = Vec::new();
    for v in values {
        match runs.last_mut() {
            Some((current, count)) if current == v => *count += 1,
            _ => runs.push((v.clone(), 1)),
        }
    }
    runs
}

/// Maximum element immediately preceded by a zero
///
/// Returns None when no element follows a zero.
#[must_use]
pub fn max_after_zero(values: &[i64]) -> Option<i64> {
    values
        .windows(2)
        .filter(|w| w[0] == 0)
        .map(|w| w[1])
        .max()
}

/// Whether two slices are equal as multisets
#[must_use]
pub fn multisets_equal<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Generate a vector of random integers in a half-open range
#[must_use]
pub fn random_vector(len: usize, range: Range<i64>) -> Vec<i64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}
