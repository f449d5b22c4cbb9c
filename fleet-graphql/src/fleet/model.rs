use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use strum::Display;
use uuid::Uuid;

use crate::{auth::OrganisationRole, store::Identified};

/// A depot of an organisation, where vehicles are based
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Depot {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A vehicle of the fleet
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Vehicle {
    pub id: Uuid,
    pub organisation_id: Uuid,
    /// The depot the vehicle is based at, if any
    pub depot_id: Option<Uuid>,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

/// A fuel card, optionally assigned to a vehicle
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct FuelCard {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub card_number: String,
    pub provider: String,
    pub vehicle_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A toll tag, optionally assigned to a vehicle
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct TollTag {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub tag_number: String,
    pub provider: String,
    pub vehicle_id: Option<Uuid>,
}

/// Lifecycle of an [Infringement]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Enum)]
pub enum InfringementStatus {
    Pending,
    Paid,
    Disputed,
}

/// A traffic infringement incurred by a vehicle
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Infringement {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub vehicle_id: Uuid,
    /// The driver at the time of the infringement, when known
    pub driver_id: Option<Uuid>,
    pub reference: String,
    pub description: String,
    /// Fine amount, in cents
    pub amount: i64,
    pub status: InfringementStatus,
    pub occurred_at: DateTime<Utc>,
}

/// The membership of a user in an organisation
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Membership {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: OrganisationRole,
    pub joined_at: DateTime<Utc>,
}

/// A pending invitation to join an organisation
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Invite {
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub email: String,
    pub role: OrganisationRole,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

macro_rules! identified {
    ($($ty:ty),*) => {
        $(
            impl Identified for $ty {
                type Id = Uuid;

                fn id(&self) -> &Uuid {
                    &self.id
                }
            }
        )*
    };
}

identified!(Depot, Vehicle, FuelCard, TollTag, Infringement, Membership, Invite);
