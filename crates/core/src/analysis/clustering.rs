//! Tolerance-based coordinate clustering.
//!
//! Two well-defined schemes, chosen per use:
//!
//! * [`cluster_objects`] — sort once by a coordinate key, then merge
//!   adjacent keys within tolerance in a single pass. Used for
//!   axis-position merging. A chain of near-duplicates can drift past the
//!   tolerance transitively; callers surface that as a diagnostic rather
//!   than silently re-splitting.
//! * [`bucket_key`] — quantize a coordinate onto the tolerance grid. Used
//!   for alignment grouping, where two coordinates belong together iff they
//!   round to the same grid cell, independent of input ordering.

use ordered_float::OrderedFloat;

/// Cluster objects by a coordinate key function, single-pass over the
/// sorted keys.
pub fn cluster_objects<T, F: Fn(&T) -> f64>(
    xs: Vec<T>,
    key_fn: F,
    tolerance: f64,
) -> Vec<Vec<T>> {
    let mut keyed: Vec<(f64, T)> = xs.into_iter().map(|x| (key_fn(&x), x)).collect();
    keyed.sort_by_key(|entry| OrderedFloat(entry.0));

    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut last: Option<f64> = None;
    for (key, item) in keyed {
        match last {
            Some(prev) if key >= prev + tolerance => {
                groups.push(std::mem::take(&mut current));
                current.push(item);
            }
            _ => current.push(item),
        }
        last = Some(key);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Quantize a coordinate onto the tolerance grid. Coordinates share a
/// bucket iff they round to the same cell.
#[inline]
pub fn bucket_key(value: f64, tolerance: f64) -> i64 {
    (value / tolerance).round() as i64
}

/// The total span of a sorted cluster; above tolerance it indicates
/// transitive drift.
pub fn cluster_span(cluster: &[f64]) -> f64 {
    match (cluster.first(), cluster.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_objects_merges_adjacent() {
        let groups = cluster_objects(vec![10.2, 10.0, 120.0, 119.5], |&x| x, 1.0);
        assert_eq!(groups, vec![vec![10.0, 10.2], vec![119.5, 120.0]]);
    }

    #[test]
    fn cluster_objects_chain_drifts_transitively() {
        // Adjacent gaps stay below tolerance, total span does not.
        let groups = cluster_objects(vec![0.0, 0.9, 1.8, 2.7], |&x| x, 1.0);
        assert_eq!(groups.len(), 1);
        assert!(cluster_span(&groups[0]) > 1.0);
    }

    #[test]
    fn bucket_key_splits_across_cells() {
        // 10.0 and 10.2 share a cell at tolerance 5.0, 14.9 rounds into
        // the next one.
        assert_eq!(bucket_key(10.0, 5.0), bucket_key(10.2, 5.0));
        assert_ne!(bucket_key(10.2, 5.0), bucket_key(14.9, 5.0));
    }

    #[test]
    fn cluster_objects_groups_pairs() {
        let items = vec![(10.0, "a"), (119.5, "c"), (10.2, "b")];
        let groups = cluster_objects(items, |i| i.0, 1.0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
    }
}
