use serde::{Deserialize, Serialize};

use super::{decode_offset, Cursor, PaginationErrorCode};
use crate::{err, error::Result};

/// A forward page request: at most `first` rows right after the `after` cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// How many items to return, all of the remaining ones when missing
    pub first: Option<u64>,
    /// Return items only after the given cursor (excluded), as provided by the client
    pub after: Option<String>,
}

impl PageRequest {
    /// Creates a new [PageRequest]
    pub fn new(first: Option<u64>, after: Option<Cursor>) -> Self {
        Self {
            first,
            after: after.map(|c| c.encode()),
        }
    }

    /// Decodes the raw page arguments into a [PageRequest], validating them.
    ///
    /// When `first` is missing, `default_page_size` is used instead (if any). When `max_page_size` is set, the
    /// resulting `first` can't exceed it.
    pub fn decode(
        first: Option<i64>,
        after: Option<String>,
        default_page_size: Option<u64>,
        max_page_size: Option<u64>,
    ) -> Result<Self> {
        let first = match first {
            Some(first) if first < 0 => return Err(err!(PaginationErrorCode::PageNegativeInput { field: "first" })),
            Some(first) => Some(first as u64),
            None => default_page_size,
        };
        if let (Some(first), Some(max)) = (first, max_page_size) {
            if first > max {
                return Err(err!(PaginationErrorCode::PageExceedsLimit { field: "first", max }));
            }
        }

        let request = Self { first, after };
        // reject malformed cursors before reaching the store
        request.offset()?;
        Ok(request)
    }

    /// The offset of the first row of the requested slice
    pub fn offset(&self) -> Result<u64> {
        decode_offset(self.after.as_deref())
    }
}

/// An edge in a [Page]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// A cursor for use in pagination
    pub cursor: Cursor,
    /// The item at the end of the edge
    pub node: T,
}

/// Page information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Wether there are rows before this page
    pub has_previous_page: bool,
    /// Wether there are rows after this page
    pub has_next_page: bool,
    /// The cursor of the first edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<Cursor>,
    /// The cursor of the last edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<Cursor>,
}

/// One page of a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The current page information
    pub page_info: PageInfo,
    /// Total number of rows matching the filter, before slicing
    pub total_count: u64,
    /// The edges on this page
    pub edges: Vec<Edge<T>>,
}

impl<T> Page<T> {
    /// Builds the [Page] for a slice fetched at `offset`.
    ///
    /// Each item gets the cursor of its position in the whole result set. If more than `first` items are given,
    /// the extra ones are dropped.
    pub fn paginate(total_count: u64, mut items: Vec<T>, offset: u64, first: Option<u64>) -> Self {
        if let Some(first) = first {
            items.truncate(usize::try_from(first).unwrap_or(usize::MAX));
        }

        let returned = items.len() as u64;
        let edges = items
            .into_iter()
            .zip(offset..)
            .map(|(node, position)| Edge {
                cursor: Cursor::new(position),
                node,
            })
            .collect::<Vec<_>>();

        Self {
            page_info: PageInfo {
                has_previous_page: offset > 0,
                has_next_page: offset.saturating_add(returned) < total_count,
                start_cursor: edges.first().map(|e| e.cursor),
                end_cursor: edges.last().map(|e| e.cursor),
            },
            total_count,
            edges,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type IntoIter = std::vec::IntoIter<Edge<T>>;
    type Item = Edge<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}
