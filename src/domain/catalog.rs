use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::event::Event;
use crate::domain::filter::{categories, filter_events, FilterContext, FilterCriteria, StatusTab, TabCounts};

/// One data load: the immutable event collection plus what is derived from
/// it once on arrival.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: Arc<Vec<Event>>,
    categories: Vec<String>,
    tab_counts: TabCounts,
    loaded_at: DateTime<Utc>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>, now: DateTime<Utc>) -> Self {
        let categories = categories(&events);
        let tab_counts = TabCounts::tally(&events, now);
        Self {
            events: Arc::new(events),
            categories,
            tab_counts,
            loaded_at: now,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn tab_counts(&self) -> TabCounts {
        self.tab_counts
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn filter(&self, tab: StatusTab, criteria: &FilterCriteria, ctx: &FilterContext) -> Vec<&Event> {
        filter_events(&self.events, tab, criteria, ctx)
    }
}
