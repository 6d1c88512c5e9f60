//! Splitting a sale between the platform, commissioned staff and the organizer.
//!
//! All rates are in basis points where 10000 is 100%.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const BASIS_POINTS_SCALE: i64 = 10_000;

/// Upper bound on how many uplines a commission chain may walk.
pub const MAX_HIERARCHY_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionLevel {
    pub staff_id: Uuid,
    pub rate_bps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommissionShare {
    pub staff_id: Uuid,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSplit {
    pub gross: i64,
    pub platform_fee: i64,
    pub commissions: Vec<CommissionShare>,
    pub organizer_amount: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Gross amount must not be negative, got {0}")]
    NegativeGross(i64),

    #[error("Rate of {0} bps exceeds 100%")]
    RateTooHigh(u32),

    #[error("Deductions of {deductions} exceed the gross amount of {gross}")]
    DeductionsExceedGross { gross: i64, deductions: i64 },
}

fn share_of(gross: i64, rate_bps: u32) -> Result<i64, SettlementError> {
    if i64::from(rate_bps) > BASIS_POINTS_SCALE {
        return Err(SettlementError::RateTooHigh(rate_bps));
    }
    // i128 keeps large gross amounts from overflowing before the division.
    let share = i128::from(gross) * i128::from(rate_bps) / i128::from(BASIS_POINTS_SCALE);
    Ok(share as i64)
}

/// Commissions are each taken from the gross, seller first, then uplines.
pub fn split_payment(
    gross: i64,
    platform_fee_bps: u32,
    chain: &[CommissionLevel],
) -> Result<PaymentSplit, SettlementError> {
    if gross < 0 {
        return Err(SettlementError::NegativeGross(gross));
    }

    let platform_fee = share_of(gross, platform_fee_bps)?;
    let commissions = chain
        .iter()
        .map(|level| {
            Ok(CommissionShare {
                staff_id: level.staff_id,
                amount: share_of(gross, level.rate_bps)?,
            })
        })
        .collect::<Result<Vec<_>, SettlementError>>()?;

    let deductions = commissions
        .iter()
        .fold(platform_fee, |total, share| total.saturating_add(share.amount));
    if deductions > gross {
        return Err(SettlementError::DeductionsExceedGross { gross, deductions });
    }

    Ok(PaymentSplit {
        gross,
        platform_fee,
        commissions,
        organizer_amount: gross - deductions,
    })
}
