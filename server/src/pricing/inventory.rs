use rust_decimal::Decimal;
use serde::Serialize;

use super::{percent_of, round_half_up};
use crate::models::TicketTier;

const LAST_FEW_REMAINING: i64 = 5;
const ALMOST_SOLD_OUT_REMAINING: i64 = 10;
const ALMOST_SOLD_OUT_PERCENT: i64 = 90;
const LIMITED_REMAINING: i64 = 20;
const LIMITED_PERCENT: i64 = 80;
const SELLING_FAST_PERCENT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    None,
    LastFew,
    AlmostSoldOut,
    Limited,
    SellingFast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Urgency {
    pub tickets_remaining: i64,
    /// Rounded for display. Thresholds are checked against the exact value.
    pub percent_sold: i64,
    pub urgency_level: UrgencyLevel,
    pub message: &'static str,
}

/// Classifies scarcity from capacity and sales. First matching rule wins.
pub fn compute_urgency(total_capacity: i64, total_sold: i64) -> Urgency {
    let tickets_remaining = total_capacity - total_sold;
    let percent_sold = percent_of(total_sold, total_capacity);
    let at_least = |threshold: i64| percent_sold >= Decimal::from(threshold);

    let (urgency_level, message) = if tickets_remaining <= 0 {
        (UrgencyLevel::None, "Sold Out")
    } else if tickets_remaining <= LAST_FEW_REMAINING {
        (UrgencyLevel::LastFew, "Last Few Spots!")
    } else if tickets_remaining <= ALMOST_SOLD_OUT_REMAINING || at_least(ALMOST_SOLD_OUT_PERCENT) {
        (UrgencyLevel::AlmostSoldOut, "Almost Sold Out!")
    } else if tickets_remaining <= LIMITED_REMAINING || at_least(LIMITED_PERCENT) {
        (UrgencyLevel::Limited, "Limited Tickets")
    } else if at_least(SELLING_FAST_PERCENT) {
        (UrgencyLevel::SellingFast, "Selling Fast!")
    } else {
        (UrgencyLevel::None, "")
    };

    Urgency {
        tickets_remaining,
        percent_sold: round_half_up(percent_sold),
        urgency_level,
        message,
    }
}

/// Sums capacity and sales over active tiers only; inactive tiers are ignored.
pub fn aggregate_capacity(tiers: &[TicketTier]) -> (i64, i64) {
    tiers
        .iter()
        .filter(|tier| tier.is_active)
        .fold((0, 0), |(capacity, sold), tier| {
            (capacity + i64::from(tier.quantity), sold + i64::from(tier.sold))
        })
}

pub fn compute_offering_urgency(tiers: &[TicketTier]) -> Urgency {
    let (capacity, sold) = aggregate_capacity(tiers);
    compute_urgency(capacity, sold)
}

pub fn compute_tier_urgency(tier: &TicketTier) -> Urgency {
    compute_urgency(i64::from(tier.quantity), i64::from(tier.sold))
}
