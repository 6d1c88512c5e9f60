use async_trait::async_trait;
use std::collections::HashMap;
use std::iter;
use uuid::Uuid;

use super::{collect_chain, OfferingSnapshot, OfferingStore};
use crate::models::{OfferingKind, StaffMember};
use crate::pricing::CommissionLevel;
use crate::utils::error::AppError;

/// In-process store, populated up front.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshots: HashMap<Uuid, OfferingSnapshot>,
    staff: HashMap<Uuid, StaffMember>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_offering(&mut self, snapshot: OfferingSnapshot) {
        self.snapshots.insert(snapshot.offering.id, snapshot);
    }

    pub fn insert_staff(&mut self, member: StaffMember) {
        self.staff.insert(member.id, member);
    }

    pub fn with_offering(mut self, snapshot: OfferingSnapshot) -> Self {
        self.insert_offering(snapshot);
        self
    }

    pub fn with_staff(mut self, member: StaffMember) -> Self {
        self.insert_staff(member);
        self
    }
}

#[async_trait]
impl OfferingStore for MemoryStore {
    async fn offering_snapshot(&self, id: Uuid) -> Result<Option<OfferingSnapshot>, AppError> {
        Ok(self.snapshots.get(&id).cloned())
    }

    async fn published_class_snapshots(&self) -> Result<Vec<OfferingSnapshot>, AppError> {
        let mut classes: Vec<OfferingSnapshot> = self
            .snapshots
            .values()
            .filter(|snapshot| snapshot.offering.is_public(OfferingKind::Class))
            .cloned()
            .collect();
        classes.sort_by_key(|snapshot| (snapshot.offering.start_time, snapshot.offering.id));
        Ok(classes)
    }

    async fn commission_chain(
        &self,
        offering_id: Uuid,
        invite_code: &str,
    ) -> Result<Option<Vec<CommissionLevel>>, AppError> {
        let Some(seller) = self.staff.values().find(|member| {
            member.offering_id == offering_id && member.invite_code.as_deref() == Some(invite_code)
        }) else {
            return Ok(None);
        };

        let uplines = iter::successors(Some(seller), |member| {
            member
                .parent_id
                .and_then(|parent| self.staff.get(&parent))
                .filter(|parent| parent.offering_id == offering_id)
        });

        Ok(Some(collect_chain(uplines.map(|member| CommissionLevel {
            staff_id: member.id,
            rate_bps: member.commission_bps,
        }))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(offering_id: Uuid, parent_id: Option<Uuid>, bps: u32, code: Option<&str>) -> StaffMember {
        StaffMember {
            id: Uuid::new_v4(),
            offering_id,
            parent_id,
            name: "Staff".to_string(),
            commission_bps: bps,
            invite_code: code.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_commission_chain_walks_uplines() {
        let offering_id = Uuid::new_v4();
        let director = member(offering_id, None, 100, None);
        let manager = member(offering_id, Some(director.id), 300, None);
        let seller = member(offering_id, Some(manager.id), 1_000, Some("SELL-42"));

        let store = MemoryStore::new()
            .with_staff(director.clone())
            .with_staff(manager.clone())
            .with_staff(seller.clone());

        let chain = store
            .commission_chain(offering_id, "SELL-42")
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<_> = chain.iter().map(|level| level.staff_id).collect();
        assert_eq!(ids, vec![seller.id, manager.id, director.id]);
        assert_eq!(chain[1].rate_bps, 300);
    }

    #[tokio::test]
    async fn test_invite_code_is_scoped_to_offering() {
        let offering_id = Uuid::new_v4();
        let store = MemoryStore::new().with_staff(member(offering_id, None, 500, Some("VIP")));

        assert!(store.commission_chain(Uuid::new_v4(), "VIP").await.unwrap().is_none());
        assert!(store.commission_chain(offering_id, "vip").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cyclic_hierarchy_terminates() {
        let offering_id = Uuid::new_v4();
        let mut a = member(offering_id, None, 100, Some("LOOP"));
        let b = member(offering_id, Some(a.id), 100, None);
        a.parent_id = Some(b.id);

        let store = MemoryStore::new().with_staff(a).with_staff(b);
        let chain = store.commission_chain(offering_id, "LOOP").await.unwrap().unwrap();
        assert_eq!(chain.len(), 2);
    }
}
