use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::bundles::{list_purchasable_bundles, EnrichedBundle};
use super::inventory::{compute_offering_urgency, compute_tier_urgency, Urgency};
use super::resolver::{resolve_current_price, ResolvedPrice};
use super::status::{resolve_status, OfferingContext, StatusSummary};
use crate::models::{Bundle, Location, Offering, OfferingKind, TicketTier};

#[derive(Debug, Clone, Serialize)]
pub struct TierDetails {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price: i64,
    #[serde(flatten)]
    pub pricing: ResolvedPrice,
    pub quantity: i32,
    pub sold: i32,
    pub remaining: i64,
    pub urgency: Urgency,
}

/// Everything the public event page needs, computed at a single instant.
#[derive(Debug, Clone, Serialize)]
pub struct OfferingDetails {
    pub id: Uuid,
    pub kind: OfferingKind,
    pub title: String,
    pub description: Option<String>,
    pub location: Location,
    pub location_display: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub tiers: Vec<TierDetails>,
    pub bundles: Vec<EnrichedBundle>,
    pub urgency: Urgency,
    pub lowest_price: Option<i64>,
    #[serde(flatten)]
    pub status: StatusSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub id: Uuid,
    pub title: String,
    pub location: Location,
    pub location_display: String,
    pub start_time: DateTime<Utc>,
    pub lowest_price: Option<i64>,
    pub urgency: Urgency,
    #[serde(flatten)]
    pub status: StatusSummary,
}

fn tier_details(tier: &TicketTier, now: DateTime<Utc>) -> TierDetails {
    TierDetails {
        id: tier.id,
        name: tier.name.clone(),
        description: tier.description.clone(),
        base_price: tier.base_price,
        pricing: resolve_current_price(tier, now),
        quantity: tier.quantity,
        sold: tier.sold,
        remaining: tier.remaining(),
        urgency: compute_tier_urgency(tier),
    }
}

/// Cheapest current price among active tiers that still have stock.
pub fn lowest_price(tiers: &[TicketTier], now: DateTime<Utc>) -> Option<i64> {
    tiers
        .iter()
        .filter(|tier| tier.is_active && tier.remaining() > 0)
        .map(|tier| resolve_current_price(tier, now).current_price)
        .min()
}

pub fn build_offering_details(
    offering: &Offering,
    tiers: &[TicketTier],
    bundles: &[Bundle],
    now: DateTime<Utc>,
) -> OfferingDetails {
    let ctx = OfferingContext::for_offering(offering, now);
    let status = resolve_status(&ctx, tiers);

    tracing::debug!(
        offering_id = %offering.id,
        status = status.status.as_str(),
        tiers = tiers.len(),
        bundles = bundles.len(),
        "Built offering details"
    );

    OfferingDetails {
        id: offering.id,
        kind: offering.kind,
        title: offering.title.clone(),
        description: offering.description.clone(),
        location: offering.location.clone(),
        location_display: offering.location.display(),
        start_time: offering.start_time,
        end_time: offering.end_time,
        tiers: tiers
            .iter()
            .filter(|tier| tier.is_active)
            .map(|tier| tier_details(tier, now))
            .collect(),
        bundles: list_purchasable_bundles(bundles, now),
        urgency: compute_offering_urgency(tiers),
        lowest_price: lowest_price(tiers, now),
        status,
    }
}

pub fn summarize_class(offering: &Offering, tiers: &[TicketTier], now: DateTime<Utc>) -> ClassSummary {
    let ctx = OfferingContext::for_offering(offering, now);

    ClassSummary {
        id: offering.id,
        title: offering.title.clone(),
        location: offering.location.clone(),
        location_display: offering.location.display(),
        start_time: offering.start_time,
        lowest_price: lowest_price(tiers, now),
        urgency: compute_offering_urgency(tiers),
        status: resolve_status(&ctx, tiers),
    }
}
