use std::cmp::Ordering;
use std::collections::HashMap;

pub type Count = usize;

/// Field value to number of records carrying it. Iteration order is
/// meaningless; use [`ranked`] when a display order is needed.
pub type FrequencyTable<K> = HashMap<K, Count>;

/// Field value to the records carrying it.
pub type GroupedTable<K, R> = HashMap<K, Vec<R>>;

pub fn total<K>(table: &FrequencyTable<K>) -> Count {
    table.values().sum()
}

/// Number of records under each key of a grouped table.
pub fn group_sizes<K: AsRef<str>, R>(table: &GroupedTable<K, R>) -> FrequencyTable<&str> {
    table
        .iter()
        .map(|(key, group)| (key.as_ref(), group.len()))
        .collect()
}

/// Entries sorted by descending count, ties broken by ascending label.
pub fn ranked<K: AsRef<str>>(table: &FrequencyTable<K>) -> Vec<(&str, Count)> {
    let mut entries: Vec<(&str, Count)> = table
        .iter()
        .map(|(key, count)| (key.as_ref(), *count))
        .collect();
    entries.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    entries
}
