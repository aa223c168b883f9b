//! Client-side narrowing of an event collection.
//!
//! Every predicate is independent and the combination is a plain AND, so
//! the order in which they are checked never changes the result.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::ALL_CATEGORIES;
use crate::domain::event::Event;
use crate::domain::status::EventStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusTab {
    #[default]
    All,
    Upcoming,
    Ongoing,
    Expired,
}

impl StatusTab {
    pub const ALL_TABS: [StatusTab; 4] = [
        StatusTab::All,
        StatusTab::Upcoming,
        StatusTab::Ongoing,
        StatusTab::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTab::All => "all",
            StatusTab::Upcoming => "upcoming",
            StatusTab::Ongoing => "ongoing",
            StatusTab::Expired => "expired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusTab::All => "All",
            StatusTab::Upcoming => "Upcoming",
            StatusTab::Ongoing => "Ongoing",
            StatusTab::Expired => "Expired",
        }
    }

    pub fn matches(&self, status: EventStatus) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::Upcoming => status == EventStatus::Upcoming,
            StatusTab::Ongoing => status == EventStatus::Ongoing,
            StatusTab::Expired => status == EventStatus::Expired,
        }
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusTab::All),
            "upcoming" => Ok(StatusTab::Upcoming),
            "ongoing" => Ok(StatusTab::Ongoing),
            "expired" => Ok(StatusTab::Expired),
            other => Err(format!(
                "Unknown tab '{}'. Expected one of: all, upcoming, ongoing, expired",
                other
            )),
        }
    }
}

/// The instant and calendar offset a filter pass is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FilterContext {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    pub fn utc(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
        }
    }

    fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

/// User-selected narrowing parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: String,
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && !self.has_category() && self.date.is_none()
    }

    /// False when the category is blank or the "all categories" sentinel
    pub fn has_category(&self) -> bool {
        !self.category.is_empty() && self.category != ALL_CATEGORIES
    }

    pub fn matches_search(&self, event: &Event) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        event.title.to_lowercase().contains(&needle) || event.location.to_lowercase().contains(&needle)
    }

    pub fn matches_category(&self, event: &Event) -> bool {
        !self.has_category() || event.event_type == self.category
    }

    /// The selected date must fall within the event's window, compared as
    /// calendar dates with both ends inclusive.
    pub fn matches_date(&self, event: &Event, ctx: &FilterContext) -> bool {
        match self.date {
            None => true,
            Some(date) => {
                ctx.calendar_date(event.starts_at) <= date && date <= ctx.calendar_date(event.expires_at)
            }
        }
    }

    pub fn matches(&self, event: &Event, ctx: &FilterContext) -> bool {
        self.matches_search(event) && self.matches_category(event) && self.matches_date(event, ctx)
    }
}

/// Returns the events visible under `tab` and `criteria`, in input order.
pub fn filter_events<'a>(
    events: &'a [Event],
    tab: StatusTab,
    criteria: &FilterCriteria,
    ctx: &FilterContext,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| tab.matches(event.status_at(ctx.now)))
        .filter(|event| criteria.matches(event, ctx))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabCounts {
    pub all: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub expired: usize,
}

impl TabCounts {
    pub fn tally(events: &[Event], now: DateTime<Utc>) -> Self {
        let mut counts = TabCounts {
            all: events.len(),
            ..Default::default()
        };
        for event in events {
            match event.status_at(now) {
                EventStatus::Upcoming => counts.upcoming += 1,
                EventStatus::Ongoing => counts.ongoing += 1,
                EventStatus::Expired => counts.expired += 1,
            }
        }
        counts
    }

    pub fn get(&self, tab: StatusTab) -> usize {
        match tab {
            StatusTab::All => self.all,
            StatusTab::Upcoming => self.upcoming,
            StatusTab::Ongoing => self.ongoing,
            StatusTab::Expired => self.expired,
        }
    }
}

/// Distinct event types in first-seen order
pub fn categories(events: &[Event]) -> Vec<String> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter(|event| seen.insert(event.event_type.as_str()))
        .map(|event| event.event_type.clone())
        .collect()
}
