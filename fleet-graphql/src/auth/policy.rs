use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthErrorCode, OrganisationRole, Subject};
use crate::{err, error::Result};

/// Looks up memberships of users within organisations
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    /// Retrieves the role of the user in the organisation, if they're a member
    async fn role_of(&self, user_id: Uuid, organisation_id: Uuid) -> Result<Option<OrganisationRole>>;
}

/// Authorization service
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Validates if the _subject_ holds at least the _required_ role in the _organisation_
    async fn authorize(&self, subject: &Subject, organisation_id: Uuid, required: OrganisationRole) -> Result<()>;
}

/// [AuthorizationService] granting access based on the role of the subject's membership
#[derive(Clone)]
pub struct MembershipPolicy {
    memberships: Arc<dyn MembershipLookup>,
}

impl MembershipPolicy {
    /// Creates a new [MembershipPolicy]
    pub fn new(memberships: Arc<dyn MembershipLookup>) -> Self {
        Self { memberships }
    }
}

#[async_trait]
impl AuthorizationService for MembershipPolicy {
    async fn authorize(&self, subject: &Subject, organisation_id: Uuid, required: OrganisationRole) -> Result<()> {
        match self.memberships.role_of(subject.user_id, organisation_id).await? {
            None => Err(err!(
                AuthErrorCode::AuthNotMember,
                "{subject} is not a member of organisation {organisation_id}"
            )),
            Some(role) if !role.grants(required) => Err(err!(
                AuthErrorCode::AuthInsufficientRole { required },
                "{subject} is {role} on organisation {organisation_id}, {required} required"
            )),
            Some(role) => {
                tracing::trace!("{subject} authorized as {role} on organisation {organisation_id}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Directory(HashMap<(Uuid, Uuid), OrganisationRole>);

    #[async_trait]
    impl MembershipLookup for Directory {
        async fn role_of(&self, user_id: Uuid, organisation_id: Uuid) -> Result<Option<OrganisationRole>> {
            Ok(self.0.get(&(user_id, organisation_id)).copied())
        }
    }

    const ORGANISATION: Uuid = Uuid::from_u128(1);
    const ADMIN: Uuid = Uuid::from_u128(10);
    const DRIVER: Uuid = Uuid::from_u128(11);
    const STRANGER: Uuid = Uuid::from_u128(12);

    fn policy() -> MembershipPolicy {
        MembershipPolicy::new(Arc::new(Directory(HashMap::from([
            ((ADMIN, ORGANISATION), OrganisationRole::Admin),
            ((DRIVER, ORGANISATION), OrganisationRole::Driver),
        ]))))
    }

    #[tokio::test]
    async fn test_members_are_authorized() {
        let policy = policy();

        let admin = Subject::new(ADMIN);
        assert!(policy.authorize(&admin, ORGANISATION, OrganisationRole::Admin).await.is_ok());
        assert!(policy.authorize(&admin, ORGANISATION, OrganisationRole::Driver).await.is_ok());

        let driver = Subject::new(DRIVER);
        assert!(policy.authorize(&driver, ORGANISATION, OrganisationRole::Driver).await.is_ok());
    }

    #[tokio::test]
    async fn test_insufficient_role() {
        let err = policy()
            .authorize(&Subject::new(DRIVER), ORGANISATION, OrganisationRole::Admin)
            .await
            .unwrap_err();

        assert_eq!(err.info().code(), "AuthInsufficientRole");
        assert_eq!(err.info().status(), http::StatusCode::FORBIDDEN);
        assert_eq!(err.info().message(), "The action requires the Admin role");
    }

    #[tokio::test]
    async fn test_non_members_are_rejected() {
        let policy = policy();

        let err = policy
            .authorize(&Subject::new(STRANGER), ORGANISATION, OrganisationRole::Driver)
            .await
            .unwrap_err();
        assert_eq!(err.info().code(), "AuthNotMember");

        let err = policy
            .authorize(&Subject::new(ADMIN), Uuid::from_u128(2), OrganisationRole::Driver)
            .await
            .unwrap_err();
        assert_eq!(err.info().code(), "AuthNotMember");
    }
}
