//! Row filtering and ordering contracts shared by the stores backing the list queries

crate::using! {
    pub order,
    pub memory
}

/// A predicate selecting rows of type `T`
pub trait Filter<T>: Send + Sync {
    /// Wether the row matches this filter
    fn matches(&self, row: &T) -> bool;
}

/// Rows with a unique, totally ordered identifier
pub trait Identified {
    /// The identifier type
    type Id: Ord;

    /// The identifier of this row
    fn id(&self) -> &Self::Id;
}
