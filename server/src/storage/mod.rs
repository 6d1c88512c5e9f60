//! Read-only access to offering data.
//!
//! Implementations return a point-in-time snapshot per offering so that tier
//! and bundle counters are consistent with each other.

use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{Bundle, Offering, TicketTier};
use crate::pricing::settlement::MAX_HIERARCHY_DEPTH;
use crate::pricing::CommissionLevel;
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgOfferingStore;

#[derive(Debug, Clone)]
pub struct OfferingSnapshot {
    pub offering: Offering,
    pub tiers: Vec<TicketTier>,
    pub bundles: Vec<Bundle>,
}

impl OfferingSnapshot {
    pub fn tier(&self, tier_id: Uuid) -> Option<&TicketTier> {
        self.tiers.iter().find(|tier| tier.id == tier_id)
    }
}

#[async_trait]
pub trait OfferingStore: Send + Sync {
    async fn offering_snapshot(&self, id: Uuid) -> Result<Option<OfferingSnapshot>, AppError>;

    /// Published class offerings, earliest start first.
    async fn published_class_snapshots(&self) -> Result<Vec<OfferingSnapshot>, AppError>;

    /// Commission levels for a sale made through `invite_code`, seller first.
    /// `None` when the code is unknown for this offering.
    async fn commission_chain(
        &self,
        offering_id: Uuid,
        invite_code: &str,
    ) -> Result<Option<Vec<CommissionLevel>>, AppError>;
}

/// Truncates an upline walk at the first repeated member or the depth cap.
pub(crate) fn collect_chain(levels: impl IntoIterator<Item = CommissionLevel>) -> Vec<CommissionLevel> {
    let mut seen = HashSet::new();
    levels
        .into_iter()
        .take(MAX_HIERARCHY_DEPTH)
        .take_while(|level| seen.insert(level.staff_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_chain_stops_at_cycle() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let levels = [a, b, a, b].map(|staff_id| CommissionLevel {
            staff_id,
            rate_bps: 100,
        });

        let chain = collect_chain(levels);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].staff_id, a);
        assert_eq!(chain[1].staff_id, b);
    }

    #[test]
    fn test_collect_chain_caps_depth() {
        let levels = (0..20).map(|_| CommissionLevel {
            staff_id: Uuid::new_v4(),
            rate_bps: 10,
        });
        assert_eq!(collect_chain(levels).len(), MAX_HIERARCHY_DEPTH);
    }
}
