use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{percent_of, round_half_up};
use crate::models::Bundle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedBundle {
    #[serde(flatten)]
    pub bundle: Bundle,
    pub available: i64,
    pub percentage_savings: i64,
}

/// Bundles a buyer can purchase at `now`, in input order.
pub fn list_purchasable_bundles(bundles: &[Bundle], now: DateTime<Utc>) -> Vec<EnrichedBundle> {
    bundles
        .iter()
        .filter(|bundle| bundle.is_active)
        .filter(|bundle| bundle.is_on_sale_at(now))
        .filter(|bundle| bundle.remaining() > 0)
        .map(|bundle| EnrichedBundle {
            available: bundle.remaining(),
            percentage_savings: percentage_savings(bundle),
            bundle: bundle.clone(),
        })
        .collect()
}

pub fn percentage_savings(bundle: &Bundle) -> i64 {
    round_half_up(percent_of(bundle.savings, bundle.regular_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    }

    fn bundle(name: &str, total_quantity: i32, sold: i32) -> Bundle {
        Bundle {
            id: Uuid::new_v4(),
            offering_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            total_quantity,
            sold,
            regular_price: 4000,
            bundle_price: 3000,
            savings: 1000,
            sale_start: None,
            sale_end: None,
            is_active: true,
        }
    }

    #[test]
    fn test_filters_inactive_out_of_window_and_sold_out() {
        let mut inactive = bundle("inactive", 10, 0);
        inactive.is_active = false;

        let mut not_started = bundle("not started", 10, 0);
        not_started.sale_start = Some(now() + Duration::hours(1));

        let mut ended = bundle("ended", 10, 0);
        ended.sale_end = Some(now() - Duration::seconds(1));

        let sold_out = bundle("sold out", 10, 10);

        let mut open = bundle("open", 10, 3);
        open.sale_start = Some(now());
        open.sale_end = Some(now());

        let result = list_purchasable_bundles(&[inactive, not_started, ended, sold_out, open], now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].bundle.name, "open");
        assert_eq!(result[0].available, 7);
        assert_eq!(result[0].percentage_savings, 25);
    }

    #[test]
    fn test_preserves_input_order() {
        let bundles = vec![bundle("Group of 10", 5, 0), bundle("Pair", 50, 1), bundle("Family", 20, 2)];
        let names: Vec<_> = list_purchasable_bundles(&bundles, now())
            .into_iter()
            .map(|b| b.bundle.name)
            .collect();

        assert_eq!(names, vec!["Group of 10", "Pair", "Family"]);
    }

    #[test]
    fn test_zero_regular_price_yields_zero_savings() {
        let mut free = bundle("free", 10, 0);
        free.regular_price = 0;
        free.bundle_price = 0;
        free.savings = 0;

        let result = list_purchasable_bundles(&[free], now());
        assert_eq!(result[0].percentage_savings, 0);
    }

    #[test]
    fn test_savings_rounds_half_up() {
        let mut pack = bundle("pack", 10, 0);
        pack.regular_price = 800;
        pack.savings = 100; // 12.5%
        assert_eq!(percentage_savings(&pack), 13);
    }

    #[test]
    fn test_repeated_evaluation_is_identical() {
        let bundles = vec![bundle("a", 10, 1), bundle("b", 3, 3)];
        assert_eq!(
            list_purchasable_bundles(&bundles, now()),
            list_purchasable_bundles(&bundles, now())
        );
    }
}
