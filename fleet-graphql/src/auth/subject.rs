use std::fmt;

use strum::Display;
use uuid::Uuid;

/// The authenticated user performing a request.
///
/// Authentication happens before reaching this crate, the subject is just attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subject {
    /// The identifier of the user
    pub user_id: Uuid,
}

impl Subject {
    /// Creates a new [Subject]
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.user_id)
    }
}

/// The role of a user within an organisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
pub enum OrganisationRole {
    Owner,
    Admin,
    Member,
    Driver,
}

impl OrganisationRole {
    fn rank(&self) -> u8 {
        match self {
            OrganisationRole::Owner => 3,
            OrganisationRole::Admin => 2,
            OrganisationRole::Member => 1,
            OrganisationRole::Driver => 0,
        }
    }

    /// Wether this role allows everything the `required` one does
    pub fn grants(&self, required: OrganisationRole) -> bool {
        self.rank() >= required.rank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(OrganisationRole::Owner.grants(OrganisationRole::Admin));
        assert!(OrganisationRole::Admin.grants(OrganisationRole::Admin));
        assert!(OrganisationRole::Member.grants(OrganisationRole::Driver));
        assert!(!OrganisationRole::Driver.grants(OrganisationRole::Member));
        assert!(!OrganisationRole::Member.grants(OrganisationRole::Owner));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(OrganisationRole::Member.to_string(), "Member");
        assert_eq!(Subject::new(Uuid::from_u128(1)).to_string(), format!("user:{}", Uuid::from_u128(1)));
    }
}
