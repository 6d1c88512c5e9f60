use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::storage::OfferingStore;

/// Source of the evaluation instant for a request.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OfferingStore>,
    pub clock: Arc<dyn Clock>,
    pub platform_fee_bps: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn OfferingStore>, platform_fee_bps: u32) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            platform_fee_bps,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}
