use chrono::{FixedOffset, Offset, Utc};
use std::sync::Arc;

use crate::app::ports::{Clock, EventSource, SystemClock};
use crate::constants::DEFAULT_REFRESH_INTERVAL_SECS;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EventSource>,
    pub clock: Arc<dyn Clock>,
    /// Offset used for calendar dates and clock times on pages
    pub offset: FixedOffset,
    pub refresh_interval_secs: u64,
}

impl AppState {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            offset: Utc.fix(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_refresh_interval(mut self, secs: u64) -> Self {
        self.refresh_interval_secs = secs.max(1);
        self
    }
}
