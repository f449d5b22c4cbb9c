use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use super::{FleetQuery, FleetStore};
use crate::{
    auth::AuthorizationService,
    pagination::{ConnectionPager, PaginationConfig},
};

/// The fleet GraphQL schema
pub type FleetSchema = Schema<FleetQuery, EmptyMutation, EmptySubscription>;

/// Collaborators of the fleet resolvers, available as schema data
#[derive(Clone)]
pub struct FleetContext {
    pub pager: ConnectionPager,
    pub store: FleetStore,
}

/// Builds the fleet [FleetSchema].
///
/// Requests must carry the authenticated [Subject](crate::auth::Subject) as data, otherwise every query fails with
/// `AuthMissing`. Fails if the pagination config is inconsistent.
pub fn build_schema(
    config: PaginationConfig,
    store: FleetStore,
    authz: Arc<dyn AuthorizationService>,
) -> anyhow::Result<FleetSchema> {
    tracing::debug!(
        "Building fleet schema (default page size: {:?}, max page size: {:?})",
        config.default_page_size,
        config.max_page_size
    );
    let pager = ConnectionPager::new(config)?;
    Ok(Schema::build(FleetQuery, EmptyMutation, EmptySubscription)
        .data(FleetContext { pager, store })
        .data(authz)
        .finish())
}
