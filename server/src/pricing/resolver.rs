use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{PricingWindow, TicketTier};

/// The next scheduled price a buyer will see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    pub date: DateTime<Utc>,
    pub price: i64,
    pub tier_name: String,
}

impl From<&PricingWindow> for PriceChange {
    fn from(window: &PricingWindow) -> Self {
        Self {
            date: window.available_from,
            price: window.price,
            tier_name: window.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    pub current_price: i64,
    pub current_tier_name: Option<String>,
    pub next_price_change: Option<PriceChange>,
    pub is_early_bird: bool,
}

impl ResolvedPrice {
    fn base(base_price: i64) -> Self {
        Self {
            current_price: base_price,
            current_tier_name: None,
            next_price_change: None,
            is_early_bird: false,
        }
    }

    fn windowed(window: &PricingWindow, next_price_change: Option<PriceChange>) -> Self {
        Self {
            current_price: window.price,
            current_tier_name: Some(window.name.clone()),
            next_price_change,
            is_early_bird: true,
        }
    }
}

/// Price of `tier` at `now`, taking its pricing windows into account.
pub fn resolve_current_price(tier: &TicketTier, now: DateTime<Utc>) -> ResolvedPrice {
    resolve_price(tier.base_price, &tier.pricing_windows, now)
}

/// Windows are evaluated in `available_from` order; windows starting at the
/// same instant keep their input order. The first active window wins even if
/// later windows overlap it.
pub fn resolve_price(base_price: i64, windows: &[PricingWindow], now: DateTime<Utc>) -> ResolvedPrice {
    let mut ordered: Vec<&PricingWindow> = windows.iter().collect();
    ordered.sort_by_key(|window| window.available_from);

    let (Some(&first), Some(&last)) = (ordered.first(), ordered.last()) else {
        return ResolvedPrice::base(base_price);
    };

    if let Some(index) = ordered.iter().position(|window| window.is_active_at(now)) {
        let current = ordered[index];
        // Reported even when the next window does not start where this one ends.
        let next = current
            .available_until
            .and(ordered.get(index + 1))
            .map(|window| PriceChange::from(*window));
        return ResolvedPrice::windowed(current, next);
    }

    if now < first.available_from {
        return ResolvedPrice {
            next_price_change: Some(PriceChange::from(first)),
            ..ResolvedPrice::base(base_price)
        };
    }

    // Between or after windows: the last window keeps applying until it expires.
    if last.available_until.map_or(true, |until| now <= until) {
        ResolvedPrice::windowed(last, None)
    } else {
        ResolvedPrice::base(base_price)
    }
}
