use serde::Serialize;
use std::slice;
use thiserror::Error;
use uuid::Uuid;

use super::resolver::resolve_current_price;
use super::settlement::{split_payment, CommissionLevel, PaymentSplit, SettlementError};
use super::status::{resolve_status, OfferingContext, OfferingStatus};
use crate::models::TicketTier;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Tickets cannot be purchased: {}", .0.message())]
    NotPurchasable(OfferingStatus),

    #[error("Ticket tier '{0}' is not on sale")]
    TierInactive(String),

    #[error("Quantity {0} is not valid for this purchase")]
    InvalidQuantity(u32),

    #[error("Requested {requested} tickets but only {remaining} remain")]
    InsufficientInventory { requested: u32, remaining: i64 },

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseQuote {
    pub tier_id: Uuid,
    pub tier_name: String,
    pub price_label: Option<String>,
    pub is_early_bird: bool,
    pub quantity: u32,
    pub unit_price: i64,
    pub subtotal: i64,
    pub settlement: PaymentSplit,
}

/// Prices `quantity` tickets of `tier` at `ctx.now`. Does not reserve inventory.
pub fn quote_tier_purchase(
    ctx: &OfferingContext,
    tier: &TicketTier,
    quantity: u32,
    chain: &[CommissionLevel],
    platform_fee_bps: u32,
) -> Result<PurchaseQuote, QuoteError> {
    if !tier.is_active {
        return Err(QuoteError::TierInactive(tier.name.clone()));
    }
    let status = resolve_status(ctx, slice::from_ref(tier)).status;
    if status != OfferingStatus::Available {
        return Err(QuoteError::NotPurchasable(status));
    }
    if quantity == 0 {
        return Err(QuoteError::InvalidQuantity(quantity));
    }

    let remaining = tier.remaining();
    if i64::from(quantity) > remaining {
        return Err(QuoteError::InsufficientInventory {
            requested: quantity,
            remaining,
        });
    }

    let price = resolve_current_price(tier, ctx.now);
    let subtotal = price
        .current_price
        .checked_mul(i64::from(quantity))
        .ok_or(QuoteError::InvalidQuantity(quantity))?;
    let settlement = split_payment(subtotal, platform_fee_bps, chain)?;

    tracing::debug!(
        tier_id = %tier.id,
        quantity,
        unit_price = price.current_price,
        subtotal,
        "Quoted ticket purchase"
    );

    Ok(PurchaseQuote {
        tier_id: tier.id,
        tier_name: tier.name.clone(),
        price_label: price.current_tier_name,
        is_early_bird: price.is_early_bird,
        quantity,
        unit_price: price.current_price,
        subtotal,
        settlement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingWindow;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 4, 10, 0, 0).unwrap()
    }

    fn ctx() -> OfferingContext {
        OfferingContext {
            now: now(),
            tickets_visible: true,
            payment_configured: true,
            event_ended: false,
        }
    }

    fn tier(quantity: i32, sold: i32) -> TicketTier {
        TicketTier {
            id: Uuid::new_v4(),
            offering_id: Uuid::new_v4(),
            name: "VIP".to_string(),
            description: None,
            base_price: 5_000,
            quantity,
            sold,
            pricing_windows: vec![PricingWindow {
                name: "Early Bird".to_string(),
                price: 4_000,
                available_from: now() - Duration::days(1),
                available_until: Some(now() + Duration::days(1)),
            }],
            is_active: true,
        }
    }

    #[test]
    fn test_quote_uses_active_window_price() {
        let quote = quote_tier_purchase(&ctx(), &tier(10, 2), 3, &[], 500).unwrap();

        assert_eq!(quote.unit_price, 4_000);
        assert_eq!(quote.subtotal, 12_000);
        assert_eq!(quote.price_label.as_deref(), Some("Early Bird"));
        assert!(quote.is_early_bird);
        assert_eq!(quote.settlement.platform_fee, 600);
        assert_eq!(quote.settlement.organizer_amount, 11_400);
    }

    #[test]
    fn test_quote_pays_commission_chain() {
        let seller = CommissionLevel {
            staff_id: Uuid::new_v4(),
            rate_bps: 1_000,
        };
        let quote = quote_tier_purchase(&ctx(), &tier(10, 0), 1, &[seller], 0).unwrap();

        assert_eq!(quote.settlement.commissions[0].amount, 400);
        assert_eq!(quote.settlement.organizer_amount, 3_600);
    }

    #[test]
    fn test_rejects_quantity_above_remaining() {
        let err = quote_tier_purchase(&ctx(), &tier(10, 8), 3, &[], 500).unwrap_err();
        assert_eq!(
            err,
            QuoteError::InsufficientInventory {
                requested: 3,
                remaining: 2,
            }
        );
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let err = quote_tier_purchase(&ctx(), &tier(10, 0), 0, &[], 500).unwrap_err();
        assert_eq!(err, QuoteError::InvalidQuantity(0));
    }

    #[test]
    fn test_rejects_sold_out_tier() {
        let err = quote_tier_purchase(&ctx(), &tier(10, 10), 1, &[], 500).unwrap_err();
        assert_eq!(err, QuoteError::NotPurchasable(OfferingStatus::SoldOut));
    }

    #[test]
    fn test_rejects_inactive_tier() {
        let mut inactive = tier(10, 0);
        inactive.is_active = false;
        let err = quote_tier_purchase(&ctx(), &inactive, 1, &[], 500).unwrap_err();
        assert_eq!(err, QuoteError::TierInactive("VIP".to_string()));
    }

    #[test]
    fn test_rejects_when_payment_not_configured() {
        let ctx = OfferingContext {
            payment_configured: false,
            ..ctx()
        };
        let err = quote_tier_purchase(&ctx, &tier(10, 0), 1, &[], 500).unwrap_err();
        assert_eq!(
            err,
            QuoteError::NotPurchasable(OfferingStatus::PaymentNotConfigured)
        );
    }
}
