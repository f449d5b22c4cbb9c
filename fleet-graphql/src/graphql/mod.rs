//! Adapters exposing pages and membership checks through [async-graphql]

crate::using! {
    pub connection,
    pub guard
}
