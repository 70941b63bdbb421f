/// Read-only aggregations over a (filtered) trip table.
///
/// Every module returns plain data; rendering lives in `crate::report`.
/// Modes and frequency tables share one ordering rule: higher count first,
/// and among equal counts the value seen first in row order.
pub mod duration;
pub mod station;
pub mod temporal;
pub mod user;

use std::collections::HashMap;
use std::hash::Hash;

pub use duration::DurationStats;
pub use station::StationStats;
pub use temporal::TemporalStats;
pub use user::{Availability, UserStats};

/// Frequency table of `values`, most frequent first. Ties keep the order in
/// which the values first appeared.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    // value → (count, first position)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    let mut table: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    table.into_iter().map(|(value, count, _)| (value, count)).collect()
}

/// Most frequent value, or `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}
