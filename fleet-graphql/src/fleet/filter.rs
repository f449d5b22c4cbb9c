use uuid::Uuid;

use super::{Depot, FuelCard, Infringement, InfringementStatus, Invite, Membership, TollTag, Vehicle};
use crate::{auth::OrganisationRole, store::Filter};

/// Case-insensitive containment, always matching when there's no search term
fn contains(value: &str, search: Option<&str>) -> bool {
    match search.map(str::trim) {
        None | Some("") => true,
        Some(search) => value.to_lowercase().contains(&search.to_lowercase()),
    }
}

/// Rows belonging to an organisation, with no further criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganisationFilter {
    pub organisation_id: Uuid,
}

impl Filter<Invite> for OrganisationFilter {
    fn matches(&self, row: &Invite) -> bool {
        row.organisation_id == self.organisation_id
    }
}

/// Depots of an organisation, optionally searching by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepotFilter {
    pub organisation_id: Uuid,
    pub search: Option<String>,
}

impl Filter<Depot> for DepotFilter {
    fn matches(&self, row: &Depot) -> bool {
        row.organisation_id == self.organisation_id && contains(&row.name, self.search.as_deref())
    }
}

/// Vehicles of an organisation, optionally based at a depot and searching by registration, make or model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFilter {
    pub organisation_id: Uuid,
    pub depot_id: Option<Uuid>,
    pub search: Option<String>,
}

impl Filter<Vehicle> for VehicleFilter {
    fn matches(&self, row: &Vehicle) -> bool {
        let search = self.search.as_deref();
        row.organisation_id == self.organisation_id
            && self.depot_id.map_or(true, |depot_id| row.depot_id == Some(depot_id))
            && (contains(&row.registration, search) || contains(&row.make, search) || contains(&row.model, search))
    }
}

/// Fuel cards or toll tags of an organisation, optionally by wether they're assigned to a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub organisation_id: Uuid,
    pub assigned: Option<bool>,
}

impl AssignmentFilter {
    /// Rows of the organisation not assigned to any vehicle
    pub fn not_assigned(organisation_id: Uuid) -> Self {
        Self {
            organisation_id,
            assigned: Some(false),
        }
    }

    fn matches_assignment(&self, organisation_id: Uuid, vehicle_id: Option<Uuid>) -> bool {
        organisation_id == self.organisation_id && self.assigned.map_or(true, |a| a == vehicle_id.is_some())
    }
}

impl Filter<FuelCard> for AssignmentFilter {
    fn matches(&self, row: &FuelCard) -> bool {
        self.matches_assignment(row.organisation_id, row.vehicle_id)
    }
}

impl Filter<TollTag> for AssignmentFilter {
    fn matches(&self, row: &TollTag) -> bool {
        self.matches_assignment(row.organisation_id, row.vehicle_id)
    }
}

/// Infringements of an organisation, optionally by status and driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfringementFilter {
    pub organisation_id: Uuid,
    pub status: Option<InfringementStatus>,
    pub driver_id: Option<Uuid>,
}

impl Filter<Infringement> for InfringementFilter {
    fn matches(&self, row: &Infringement) -> bool {
        row.organisation_id == self.organisation_id
            && self.status.map_or(true, |status| row.status == status)
            && self.driver_id.map_or(true, |driver_id| row.driver_id == Some(driver_id))
    }
}

/// Members of an organisation, optionally with a given role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipFilter {
    pub organisation_id: Uuid,
    pub role: Option<OrganisationRole>,
}

impl Filter<Membership> for MembershipFilter {
    fn matches(&self, row: &Membership) -> bool {
        row.organisation_id == self.organisation_id && self.role.map_or(true, |role| row.role == role)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn vehicle(registration: &str, make: &str, model: &str, depot_id: Option<Uuid>) -> Vehicle {
        Vehicle {
            id: Uuid::from_u128(100),
            organisation_id: Uuid::from_u128(1),
            depot_id,
            registration: registration.into(),
            make: make.into(),
            model: model.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_vehicle_search() {
        let depot = Uuid::from_u128(7);
        let filter = |search: Option<&str>, depot_id: Option<Uuid>| VehicleFilter {
            organisation_id: Uuid::from_u128(1),
            depot_id,
            search: search.map(String::from),
        };
        let van = vehicle("ABC-123", "Ford", "Transit", Some(depot));

        assert!(filter(None, None).matches(&van));
        assert!(filter(Some("  "), None).matches(&van));
        assert!(filter(Some("abc"), None).matches(&van));
        assert!(filter(Some("TRANS"), Some(depot)).matches(&van));
        assert!(!filter(Some("hilux"), None).matches(&van));
        assert!(!filter(None, Some(Uuid::from_u128(8))).matches(&van));
        assert!(!VehicleFilter {
            organisation_id: Uuid::from_u128(2),
            depot_id: None,
            search: None
        }
        .matches(&van));
    }

    #[test]
    fn test_assignment() {
        let card = |vehicle_id: Option<Uuid>| FuelCard {
            id: Uuid::from_u128(100),
            organisation_id: Uuid::from_u128(1),
            card_number: "7034 0001".into(),
            provider: "Shell".into(),
            vehicle_id,
            expires_at: None,
        };
        let not_assigned = AssignmentFilter::not_assigned(Uuid::from_u128(1));
        let any = AssignmentFilter {
            organisation_id: Uuid::from_u128(1),
            assigned: None,
        };

        assert!(not_assigned.matches(&card(None)));
        assert!(!not_assigned.matches(&card(Some(Uuid::from_u128(3)))));
        assert!(any.matches(&card(Some(Uuid::from_u128(3)))));
    }
}
