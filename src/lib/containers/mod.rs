//! Small collection utilities for preparing template data.
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
    hash::Hash,
};

use color_eyre::eyre::eyre;
use itertools::Itertools;

/// Counts how often each item was seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counter<T: Ord> {
    pub result: BTreeMap<T, usize>,
    total: usize,
}

impl<T: Ord> Default for Counter<T> {
    fn default() -> Self {
        Self {
            result: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T: Ord + Clone> Counter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        *self.result.entry(item).or_default() += 1;
        self.total += 1;
    }

    /// Number of items added, counting repeats.
    pub fn total(&self) -> usize {
        self.total
    }

    /// `(count, item)` pairs, most frequent first; ties are in item order.
    pub fn get_popular(&self, max_items: Option<usize>) -> Vec<(usize, T)> {
        let popular = self
            .result
            .iter()
            .map(|(item, count)| (*count, item.clone()))
            .sorted_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        match max_items {
            Some(max) => popular.take(max).collect(),
            None => popular.collect(),
        }
    }

    /// `(item, count)` pairs in item order.
    pub fn get_sorted_items(&self) -> Vec<(T, usize)> {
        self.result
            .iter()
            .map(|(item, count)| (item.clone(), *count))
            .collect()
    }
}

impl<T: Ord + Clone> Extend<T> for Counter<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

/// All values registered for each key, in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator<K: Ord, V> {
    pub result: BTreeMap<K, Vec<V>>,
}

impl<K: Ord, V> Default for Accumulator<K, V> {
    fn default() -> Self {
        Self {
            result: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Accumulator<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, value: V) {
        self.result.entry(key).or_default().push(value);
    }
}

/// The distinct values registered for each key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniqueAccumulator<K: Ord, V: Ord> {
    pub result: BTreeMap<K, BTreeSet<V>>,
}

impl<K: Ord, V: Ord> Default for UniqueAccumulator<K, V> {
    fn default() -> Self {
        Self {
            result: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V: Ord> UniqueAccumulator<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, value: V) {
        self.result.entry(key).or_default().insert(value);
    }
}

/// First occurrences only, in their original order.
pub fn unique<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    items.into_iter().unique().collect()
}

/// A copy of `map` holding only `keys`. Every key must be present.
pub fn only_some_keys<K, V>(map: &BTreeMap<K, V>, keys: &[K]) -> color_eyre::Result<BTreeMap<K, V>>
where
    K: Ord + Clone + Debug,
    V: Clone,
{
    keys.iter()
        .map(|key| match map.get(key) {
            Some(value) => Ok((key.clone(), value.clone())),
            None => Err(eyre!("key {key:?} is not in the mapping")),
        })
        .collect()
}

/// A copy of `map` without `keys`. Missing keys are ignored.
pub fn except_keys<K, V>(map: &BTreeMap<K, V>, keys: &[K]) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    map.iter()
        .filter(|(key, _)| !keys.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Split `map` into the entries for `keys` and everything else. Every key
/// must be present.
pub fn extract_keys<K, V>(
    map: &BTreeMap<K, V>,
    keys: &[K],
) -> color_eyre::Result<(BTreeMap<K, V>, BTreeMap<K, V>)>
where
    K: Ord + Clone + Debug,
    V: Clone,
{
    if let Some(missing) = keys.iter().find(|key| !map.contains_key(key)) {
        return Err(eyre!("key {missing:?} is not in the mapping"));
    }
    Ok(map
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .partition(|(key, _)| keys.contains(key)))
}

/// Entries in `key_order` first, then (with `other_keys`) the rest in key
/// order.
///
/// Keys missing from the map yield `default` when one is given and are
/// skipped otherwise.
pub fn ordered_items<K, V>(
    map: &BTreeMap<K, V>,
    key_order: &[K],
    other_keys: bool,
    default: Option<&V>,
) -> Vec<(K, V)>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut items: Vec<(K, V)> = key_order
        .iter()
        .filter_map(|key| {
            map.get(key)
                .or(default)
                .map(|value| (key.clone(), value.clone()))
        })
        .collect();
    if other_keys {
        items.extend(
            map.iter()
                .filter(|(key, _)| !key_order.contains(key))
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    items
}

/// Remove `keys` from `map`, ignoring the ones that are not there.
pub fn del_quiet<K: Ord, V>(map: &mut BTreeMap<K, V>, keys: &[K]) {
    for key in keys {
        map.remove(key);
    }
}

/// Lay `items` out in `columns` columns.
///
/// Horizontally, each returned list is a row and rows are filled left to
/// right. Vertically, each returned list is a column and columns are filled
/// top to bottom, all `ceil(len / columns)` long. Either way, missing cells
/// are `fill`.
pub fn distribute<T: Clone>(
    items: &[T],
    columns: usize,
    horizontal: bool,
    fill: T,
) -> color_eyre::Result<Vec<Vec<T>>> {
    if columns < 1 {
        return Err(eyre!("cannot distribute into {columns} columns"));
    }

    let pad = |chunk: &[T], len: usize| {
        let mut line = chunk.to_vec();
        line.resize(len, fill.clone());
        line
    };

    if horizontal {
        return Ok(items.chunks(columns).map(|row| pad(row, columns)).collect());
    }

    let column_len = items.len().div_ceil(columns);
    Ok((0..columns)
        .map(|column| {
            let start = (column * column_len).min(items.len());
            let end = (start + column_len).min(items.len());
            pad(&items[start..end], column_len)
        })
        .collect())
}
