use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    AssignmentFilter, Depot, DepotFilter, FuelCard, Infringement, InfringementFilter, Invite, Membership,
    MembershipFilter, OrganisationFilter, TollTag, Vehicle, VehicleFilter,
};
use crate::{
    auth::{MembershipLookup, MembershipPolicy, OrganisationRole},
    error::Result,
    pagination::ConnectionSource,
    store::{MemoryCollection, OrderBy},
};

/// A shared [ConnectionSource] of `N` rows, filtered by `F` and sorted by an [OrderBy]
pub type Source<F, N> = Arc<dyn ConnectionSource<F, OrderBy<N>, Node = N>>;

/// The collections backing every fleet list query
#[derive(Clone)]
pub struct FleetStore {
    pub depots: Source<DepotFilter, Depot>,
    pub vehicles: Source<VehicleFilter, Vehicle>,
    pub fuel_cards: Source<AssignmentFilter, FuelCard>,
    pub toll_tags: Source<AssignmentFilter, TollTag>,
    pub infringements: Source<InfringementFilter, Infringement>,
    pub memberships: Source<MembershipFilter, Membership>,
    pub invites: Source<OrganisationFilter, Invite>,
}

impl Depot {
    /// By name, ascending
    pub fn order() -> OrderBy<Self> {
        OrderBy::asc(|a: &Self, b: &Self| a.name.cmp(&b.name))
    }
}

impl Vehicle {
    /// By registration, ascending
    pub fn order() -> OrderBy<Self> {
        OrderBy::asc(|a: &Self, b: &Self| a.registration.cmp(&b.registration))
    }
}

impl FuelCard {
    /// By card number, ascending
    pub fn order() -> OrderBy<Self> {
        OrderBy::asc(|a: &Self, b: &Self| a.card_number.cmp(&b.card_number))
    }
}

impl TollTag {
    /// By tag number, ascending
    pub fn order() -> OrderBy<Self> {
        OrderBy::asc(|a: &Self, b: &Self| a.tag_number.cmp(&b.tag_number))
    }
}

impl Infringement {
    /// Most recent first
    pub fn order() -> OrderBy<Self> {
        OrderBy::desc(|a: &Self, b: &Self| a.occurred_at.cmp(&b.occurred_at))
    }
}

impl Membership {
    /// Oldest members first
    pub fn order() -> OrderBy<Self> {
        OrderBy::asc(|a: &Self, b: &Self| a.joined_at.cmp(&b.joined_at))
    }
}

impl Invite {
    /// Most recent first
    pub fn order() -> OrderBy<Self> {
        OrderBy::desc(|a: &Self, b: &Self| a.created_at.cmp(&b.created_at))
    }
}

#[async_trait]
impl MembershipLookup for MemoryCollection<Membership> {
    async fn role_of(&self, user_id: Uuid, organisation_id: Uuid) -> Result<Option<OrganisationRole>> {
        Ok(self
            .find(|m| m.user_id == user_id && m.organisation_id == organisation_id)
            .map(|m| m.role))
    }
}

/// An in-memory fleet, holding every collection
#[derive(Default, Clone)]
pub struct InMemoryFleet {
    pub depots: Arc<MemoryCollection<Depot>>,
    pub vehicles: Arc<MemoryCollection<Vehicle>>,
    pub fuel_cards: Arc<MemoryCollection<FuelCard>>,
    pub toll_tags: Arc<MemoryCollection<TollTag>>,
    pub infringements: Arc<MemoryCollection<Infringement>>,
    pub memberships: Arc<MemoryCollection<Membership>>,
    pub invites: Arc<MemoryCollection<Invite>>,
}

impl InMemoryFleet {
    /// Creates a new empty fleet
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the [FleetStore] reading from this fleet
    pub fn store(&self) -> FleetStore {
        FleetStore {
            depots: self.depots.clone(),
            vehicles: self.vehicles.clone(),
            fuel_cards: self.fuel_cards.clone(),
            toll_tags: self.toll_tags.clone(),
            infringements: self.infringements.clone(),
            memberships: self.memberships.clone(),
            invites: self.invites.clone(),
        }
    }

    /// Builds the [MembershipPolicy] checking the memberships of this fleet
    pub fn policy(&self) -> MembershipPolicy {
        MembershipPolicy::new(self.memberships.clone())
    }
}
