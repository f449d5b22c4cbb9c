use std::sync::Arc;

use async_graphql::{Context, Guard, Result};
use uuid::Uuid;

use crate::{
    auth::{AuthErrorCode, AuthorizationService, OrganisationRole, Subject},
    error::GraphQLError,
};

/// Organisation membership [Guard].
///
/// This guard will use the [Subject] and `Arc<dyn AuthorizationService>` from the GraphQL context to check the
/// subject holds at least the required role in the organisation, failing if they're not available.
pub struct OrganisationGuard {
    organisation_id: Uuid,
    required: OrganisationRole,
}

impl OrganisationGuard {
    /// Creates a new guard requiring the given role in the organisation
    pub fn new(organisation_id: Uuid, required: OrganisationRole) -> Self {
        Self {
            organisation_id,
            required,
        }
    }
}

impl Guard for OrganisationGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<Subject>() {
            Some(sub) => {
                let authz = ctx
                    .data::<Arc<dyn AuthorizationService>>()
                    .map_err(Box::<GraphQLError>::from)?;
                authz
                    .authorize(sub, self.organisation_id, self.required)
                    .await
                    .map_err(GraphQLError::from_err)?;
                Ok(())
            }
            None => Err(GraphQLError::from_err(crate::err!(
                AuthErrorCode::AuthMissing,
                "The subject must be authenticated"
            ))
            .into()),
        }
    }
}
