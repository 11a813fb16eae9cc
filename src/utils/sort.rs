use core::cmp::Ordering;

use num::Float;

/// Top `n` entries by descending weight.
/// - Stable: equal weights keep their input order
/// - NaN weights are dropped before sorting
///
/// Complexity: O(m log m) for m input entries
pub fn top_n_desc<K, N: Float>(mut entries: Vec<(K, N)>, n: usize) -> Vec<(K, N)> {
    entries.retain(|(_, w)| !w.is_nan());
    // slice::sort_by is stable
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}
