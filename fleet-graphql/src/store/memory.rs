use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Filter, SortOrder};
use crate::{
    error::Result,
    pagination::{Counter, Fetcher},
};

/// An in-memory collection of rows.
///
/// Useful for tests and demos, or any small dataset that fits in memory. Every fetch filters and sorts the whole
/// collection before slicing it.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> FromIterator<T> for MemoryCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            rows: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<T> MemoryCollection<T> {
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row to the collection
    pub fn insert(&self, row: T) {
        self.rows.write().push(row);
    }

    /// Returns the first row matching the given predicate
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        self.rows.read().iter().find(|r| predicate(r)).cloned()
    }
}

#[async_trait]
impl<T, F> Counter<F> for MemoryCollection<T>
where
    T: Send + Sync,
    F: Filter<T>,
{
    async fn count(&self, filter: &F) -> Result<u64> {
        Ok(self.rows.read().iter().filter(|r| filter.matches(r)).count() as u64)
    }
}

#[async_trait]
impl<T, F, S> Fetcher<F, S> for MemoryCollection<T>
where
    T: Clone + Send + Sync,
    F: Filter<T>,
    S: SortOrder<T>,
{
    type Node = T;

    async fn fetch(&self, filter: &F, sort: &S, offset: u64, limit: Option<u64>) -> Result<Vec<T>> {
        let mut rows = self
            .rows
            .read()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| sort.compare(a, b));

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }
}
