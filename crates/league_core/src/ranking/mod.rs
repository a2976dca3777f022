//! # Ranking
//!
//! Stable ordering and extremal selection over read-only slices.
//!
//! Two strategies are provided and are interchangeable:
//! - [`merge_sort_by_key`] / [`merge_sort_by_key_desc`]: full stable merge sort
//! - [`smallest_n`] / [`largest_n`]: bounded binary-heap selection
//!
//! For any key function and any `n`, `merge_sort_by_key(items, key)[..n]`
//! equals `smallest_n(items, n, key)` and the descending sort prefix equals
//! `largest_n(items, n, key)`. Equal keys always keep their input order.
//!
//! Keys are any `Ord` value; composite keys are tuples, with
//! [`std::cmp::Reverse`] marking a descending field and [`Metric`] wrapping
//! floating point averages.
//!
//! ```
//! use std::cmp::Reverse;
//! use league_core::ranking::merge_sort_by_key;
//!
//! // (score, age): score ascending, then older first
//! let rows = [(70, 20), (50, 30), (70, 25)];
//! let sorted = merge_sort_by_key(&rows, |&(score, age)| (score, Reverse(age)));
//! assert_eq!(sorted, vec![(50, 30), (70, 25), (70, 20)]);
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};


/// Totally ordered `f64` for use inside sort keys.
///
/// Ordering follows [`f64::total_cmp`], so `NaN` sorts after every number
/// instead of poisoning the comparison.
#[derive(Debug, Clone, Copy)]
pub struct Metric(pub f64);

impl PartialEq for Metric {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Metric {}

impl PartialOrd for Metric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Metric {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric(value)
    }
}

/// Presentation direction for ranked listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!(
                "unknown sort order '{}' (expected ascending or descending)",
                other
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Stable merge sort returning a new vector in non-decreasing key order.
///
/// Keys are extracted once per element.
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    let keys: Vec<K> = items.iter().map(&key).collect();
    let indices: Vec<usize> = (0..items.len()).collect();
    merge_sort_by(&indices, &|a: &usize, b: &usize| keys[*a].cmp(&keys[*b]))
        .into_iter()
        .map(|index| items[index].clone())
        .collect()
}

/// Stable merge sort returning a new vector in non-increasing key order.
///
/// Elements with equal keys keep their input order, so this is not the
/// reverse of [`merge_sort_by_key`].
pub fn merge_sort_by_key_desc<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    merge_sort_by_key(items, |item| Reverse(key(item)))
}

/// Stable sort in the requested direction.
pub fn sort_by_key_in<T, K, F>(items: &[T], order: SortOrder, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    match order {
        SortOrder::Ascending => merge_sort_by_key(items, key),
        SortOrder::Descending => merge_sort_by_key_desc(items, key),
    }
}

/// The `n` lowest-keyed elements in ascending key order.
///
/// Keeps a max-heap of at most `n` candidates; the remainder is never sorted.
/// `n` larger than the slice yields every element.
pub fn smallest_n<T, K, F>(items: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    if n == 0 {
        return Vec::new();
    }

    // Index as the last tuple field makes ties resolve to the earlier element.
    let mut heap: BinaryHeap<(K, usize)> = BinaryHeap::with_capacity(n.min(items.len()) + 1);
    for (index, item) in items.iter().enumerate() {
        heap.push((key(item), index));
        if heap.len() > n {
            heap.pop();
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|(_, index)| items[index].clone())
        .collect()
}

/// The `n` highest-keyed elements in descending key order, ties in input order.
pub fn largest_n<T, K, F>(items: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    smallest_n(items, n, |item| Reverse(key(item)))
}

fn merge_sort_by<T, C>(items: &[T], cmp: &C) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort_by(&items[..mid], cmp);
    let right = merge_sort_by(&items[mid..], cmp);
    merge(&left, &right, cmp)
}

fn merge<T, C>(left: &[T], right: &[T], cmp: &C) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        // Right side wins only when strictly smaller.
        if cmp(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j].clone());
            j += 1;
        } else {
            merged.push(left[i].clone());
            i += 1;
        }
    }

    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
