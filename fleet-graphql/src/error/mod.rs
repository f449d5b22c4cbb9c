//! Error types shared by the pager, the membership policy and the GraphQL layer

crate::using! {
    pub core
}

#[cfg(feature = "graphql")]
crate::using!(pub graphql);
