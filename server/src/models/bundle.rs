use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A multi-ticket package sold at a discount against its regular price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bundle {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub total_quantity: i32,
    pub sold: i32,
    pub regular_price: i64,
    pub bundle_price: i64,
    /// Stored as `regular_price - bundle_price` by the write path.
    pub savings: i64,
    pub sale_start: Option<DateTime<Utc>>,
    pub sale_end: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Bundle {
    pub fn remaining(&self) -> i64 {
        i64::from(self.total_quantity) - i64::from(self.sold)
    }

    pub fn is_on_sale_at(&self, now: DateTime<Utc>) -> bool {
        self.sale_start.map_or(true, |start| now >= start)
            && self.sale_end.map_or(true, |end| now <= end)
    }
}
