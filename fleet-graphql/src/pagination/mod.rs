//! Offset-based cursor pagination following the [Relay connection](https://relay.dev/graphql/connections.htm) shape
//!
//! A [Cursor] encodes the zero-based offset of a row within a stably ordered result set. The [ConnectionPager]
//! turns a [PageRequest] into a concurrent count and slice fetch against a [ConnectionSource], and wraps the slice
//! into a [Page].
//!
//! Offsets assume the ordering doesn't change between requests, rows written in between pages may be skipped or
//! returned twice.

crate::using! {
    pub error,
    pub cursor,
    pub page,
    pub pager
}
