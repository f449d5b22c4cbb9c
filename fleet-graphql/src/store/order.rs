use std::{cmp::Ordering, fmt};

use super::Identified;

/// Sorting direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// An ordering of rows of type `T`
pub trait SortOrder<T>: Send + Sync {
    /// Compares two rows
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders rows by a comparison function in the given direction.
///
/// Rows comparing equal are always ordered by their id, ascending, so the order is total.
pub struct OrderBy<T> {
    compare: fn(&T, &T) -> Ordering,
    direction: SortDirection,
}

impl<T> OrderBy<T> {
    /// Creates a new [OrderBy]
    pub fn new(compare: fn(&T, &T) -> Ordering, direction: SortDirection) -> Self {
        Self { compare, direction }
    }

    /// Ascending order by the given comparison
    pub fn asc(compare: fn(&T, &T) -> Ordering) -> Self {
        Self::new(compare, SortDirection::Asc)
    }

    /// Descending order by the given comparison
    pub fn desc(compare: fn(&T, &T) -> Ordering) -> Self {
        Self::new(compare, SortDirection::Desc)
    }
}

impl<T> Clone for OrderBy<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for OrderBy<T> {}

impl<T> fmt::Debug for OrderBy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy").field("direction", &self.direction).finish()
    }
}

impl<T: Identified> SortOrder<T> for OrderBy<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = (self.compare)(a, b);
        let ordering = match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id().cmp(b.id()))
    }
}
