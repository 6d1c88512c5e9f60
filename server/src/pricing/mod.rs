//! Buyer-facing pricing and availability.
//!
//! Everything here is a pure function of an in-memory snapshot and an explicit
//! evaluation instant. Callers read the clock once at the request boundary.

pub mod bundles;
pub mod details;
pub mod inventory;
pub mod quote;
pub mod resolver;
pub mod settlement;
pub mod status;

pub use bundles::{list_purchasable_bundles, EnrichedBundle};
pub use details::{build_offering_details, summarize_class, ClassSummary, OfferingDetails};
pub use inventory::{compute_offering_urgency, compute_urgency, Urgency, UrgencyLevel};
pub use quote::{quote_tier_purchase, PurchaseQuote, QuoteError};
pub use resolver::{resolve_current_price, PriceChange, ResolvedPrice};
pub use settlement::{split_payment, CommissionLevel, PaymentSplit, SettlementError};
pub use status::{resolve_status, OfferingContext, OfferingStatus, StatusSummary};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// `part / whole * 100`, exact up to decimal precision. Zero when `whole <= 0`.
pub(crate) fn percent_of(part: i64, whole: i64) -> Decimal {
    if whole <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)
}

/// Rounds to the nearest integer, ties toward positive infinity.
pub(crate) fn round_half_up(value: Decimal) -> i64 {
    (value + Decimal::new(5, 1)).floor().to_i64().unwrap_or_default()
}
