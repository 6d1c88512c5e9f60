use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A seller or manager earning commission on sales for one offering.
///
/// `parent_id` points at the member's upline; the top of the hierarchy has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub commission_bps: u32,
    pub invite_code: Option<String>,
}
