use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-bounded price override for a ticket tier ("Early Bird", "Last Call").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingWindow {
    pub name: String,
    /// Minor currency units.
    pub price: i64,
    pub available_from: DateTime<Utc>,
    /// Unset means open-ended.
    pub available_until: Option<DateTime<Utc>>,
}

impl PricingWindow {
    /// Both bounds are inclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.available_from && self.available_until.map_or(true, |until| now <= until)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketTier {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Minor currency units.
    pub base_price: i64,
    pub quantity: i32,
    pub sold: i32,
    #[serde(default)]
    pub pricing_windows: Vec<PricingWindow>,
    pub is_active: bool,
}

impl TicketTier {
    pub fn remaining(&self) -> i64 {
        i64::from(self.quantity) - i64::from(self.sold)
    }

    pub fn is_sold_out(&self) -> bool {
        self.sold >= self.quantity
    }
}
