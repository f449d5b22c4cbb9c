use async_graphql::{Context, Object};
use uuid::Uuid;

use super::{
    AssignmentFilter, Depot, DepotFilter, FleetContext, FuelCard, Infringement, InfringementFilter,
    InfringementStatus, Invite, Membership, MembershipFilter, OrganisationFilter, TollTag, Vehicle, VehicleFilter,
};
use crate::{
    auth::OrganisationRole,
    error::GraphQLResult,
    graphql::{FleetConnection, IntoConnection, OrganisationGuard},
};

/// Root of the fleet list queries.
///
/// Every query is guarded by the membership of the subject in the organisation, before any row is read.
pub struct FleetQuery;

#[Object]
impl FleetQuery {
    /// Depots of the organisation, by name
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Driver)")]
    async fn depots(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Depot>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let filter = DepotFilter { organisation_id, search };
        let page = fleet
            .pager
            .paginate(fleet.store.depots.as_ref(), &request, &filter, &Depot::order())
            .await?;
        Ok(page.into_connection())
    }

    /// Vehicles of the organisation, by registration
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Driver)")]
    async fn vehicles(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        depot_id: Option<Uuid>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Vehicle>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let filter = VehicleFilter {
            organisation_id,
            depot_id,
            search,
        };
        let page = fleet
            .pager
            .paginate(fleet.store.vehicles.as_ref(), &request, &filter, &Vehicle::order())
            .await?;
        Ok(page.into_connection())
    }

    /// Fuel cards of the organisation not assigned to any vehicle
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Member)")]
    async fn fuel_cards_not_assigned(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<FuelCard>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let page = fleet
            .pager
            .paginate(
                fleet.store.fuel_cards.as_ref(),
                &request,
                &AssignmentFilter::not_assigned(organisation_id),
                &FuelCard::order(),
            )
            .await?;
        Ok(page.into_connection())
    }

    /// Toll tags of the organisation not assigned to any vehicle
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Member)")]
    async fn toll_tags_not_assigned(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<TollTag>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let page = fleet
            .pager
            .paginate(
                fleet.store.toll_tags.as_ref(),
                &request,
                &AssignmentFilter::not_assigned(organisation_id),
                &TollTag::order(),
            )
            .await?;
        Ok(page.into_connection())
    }

    /// Infringements of the organisation, most recent first
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Member)")]
    async fn infringements(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        status: Option<InfringementStatus>,
        driver_id: Option<Uuid>,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Infringement>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let filter = InfringementFilter {
            organisation_id,
            status,
            driver_id,
        };
        let page = fleet
            .pager
            .paginate(
                fleet.store.infringements.as_ref(),
                &request,
                &filter,
                &Infringement::order(),
            )
            .await?;
        Ok(page.into_connection())
    }

    /// Members of the organisation, oldest first
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Driver)")]
    async fn organisation_members(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Membership>> {
        self.members(ctx, organisation_id, None, first, after).await
    }

    /// Members of the organisation with the driver role, oldest first
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Driver)")]
    async fn drivers(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Membership>> {
        self.members(ctx, organisation_id, Some(OrganisationRole::Driver), first, after)
            .await
    }

    /// Pending invites of the organisation, most recent first
    #[graphql(guard = "OrganisationGuard::new(organisation_id, OrganisationRole::Admin)")]
    async fn invites(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Invite>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let page = fleet
            .pager
            .paginate(
                fleet.store.invites.as_ref(),
                &request,
                &OrganisationFilter { organisation_id },
                &Invite::order(),
            )
            .await?;
        Ok(page.into_connection())
    }
}

impl FleetQuery {
    async fn members(
        &self,
        ctx: &Context<'_>,
        organisation_id: Uuid,
        role: Option<OrganisationRole>,
        first: Option<i32>,
        after: Option<String>,
    ) -> GraphQLResult<FleetConnection<Membership>> {
        let fleet = ctx.data::<FleetContext>()?;
        let request = fleet.pager.request(first, after)?;
        let page = fleet
            .pager
            .paginate(
                fleet.store.memberships.as_ref(),
                &request,
                &MembershipFilter { organisation_id, role },
                &Membership::order(),
            )
            .await?;
        Ok(page.into_connection())
    }
}
