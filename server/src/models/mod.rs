pub mod bundle;
pub mod offering;
pub mod staff;
pub mod ticket;

pub use bundle::Bundle;
pub use offering::{Location, Offering, OfferingKind, StructuredLocation};
pub use staff::StaffMember;
pub use ticket::{PricingWindow, TicketTier};
