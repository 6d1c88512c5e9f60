use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Offering, TicketTier};

/// Per-request flags that decide what a buyer is told about an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferingContext {
    pub now: DateTime<Utc>,
    pub tickets_visible: bool,
    pub payment_configured: bool,
    pub event_ended: bool,
}

impl OfferingContext {
    pub fn for_offering(offering: &Offering, now: DateTime<Utc>) -> Self {
        Self {
            now,
            tickets_visible: offering.tickets_visible,
            payment_configured: offering.payment_configured,
            event_ended: offering.has_ended(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingStatus {
    EventEnded,
    Hidden,
    PaymentNotConfigured,
    SoldOut,
    Available,
}

impl OfferingStatus {
    pub fn message(&self) -> &'static str {
        match self {
            OfferingStatus::EventEnded => "This event has already taken place.",
            OfferingStatus::Hidden => {
                "Tickets are not yet available for this event. Check back soon!"
            }
            OfferingStatus::PaymentNotConfigured => {
                "The organizer is still setting up ticket sales. Please check back later or contact the organizer."
            }
            OfferingStatus::SoldOut => "All tickets for this event have sold out!",
            OfferingStatus::Available => "Tickets available for purchase.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingStatus::EventEnded => "event_ended",
            OfferingStatus::Hidden => "hidden",
            OfferingStatus::PaymentNotConfigured => "payment_not_configured",
            OfferingStatus::SoldOut => "sold_out",
            OfferingStatus::Available => "available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub status: OfferingStatus,
    pub message: &'static str,
}

impl From<OfferingStatus> for StatusSummary {
    fn from(status: OfferingStatus) -> Self {
        Self {
            status,
            message: status.message(),
        }
    }
}

/// Recomputed on every read; nothing here is persisted.
pub fn resolve_status(ctx: &OfferingContext, tiers: &[TicketTier]) -> StatusSummary {
    let status = if ctx.event_ended {
        OfferingStatus::EventEnded
    } else if !ctx.tickets_visible {
        OfferingStatus::Hidden
    } else if !ctx.payment_configured {
        OfferingStatus::PaymentNotConfigured
    } else if all_active_tiers_sold_out(tiers) {
        OfferingStatus::SoldOut
    } else {
        OfferingStatus::Available
    };

    status.into()
}

/// Vacuously true when tiers exist but none is active.
fn all_active_tiers_sold_out(tiers: &[TicketTier]) -> bool {
    !tiers.is_empty()
        && tiers
            .iter()
            .filter(|tier| tier.is_active)
            .all(TicketTier::is_sold_out)
}
