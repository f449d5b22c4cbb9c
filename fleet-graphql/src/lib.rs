pub mod auth;
pub mod error;
pub mod pagination;
pub mod store;

pub use error::{Error, Result};
#[cfg(feature = "graphql")]
pub use error::{GraphQLError, GraphQLResult};

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "graphql")]
pub mod graphql;

#[cfg(feature = "fleet")]
pub mod fleet;

pub mod macros;
