#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI32, Ordering};

use event_hub::app::{Clock, EventQuery, EventSource};
use event_hub::domain::Event;
use event_hub::error::{EventHubError, Result};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Moves forward by `step` every time it is read
pub struct SteppingClock {
    start: DateTime<Utc>,
    step: Duration,
    reads: AtomicI32,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicI32::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * n
    }
}

pub fn make_event(
    id: u64,
    title: &str,
    location: &str,
    event_type: &str,
    starts_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Event {
    Event {
        id,
        title: title.to_string(),
        description: format!("All about {}", title),
        image_url: None,
        starts_at,
        expires_at,
        location: location.to_string(),
        event_type: event_type.to_string(),
    }
}

/// Upcoming conference, ongoing festival, expired meetup
pub fn sample_events() -> Vec<Event> {
    let n = now();
    vec![
        make_event(1, "Tech Conference 2025", "Berlin", "conference", n + Duration::days(1), n + Duration::days(3)),
        make_event(2, "Music Festival", "Lisbon", "music", n - Duration::days(1), n + Duration::days(1)),
        make_event(3, "Old Meetup", "Porto", "meetup", n - Duration::days(10), n - Duration::days(9)),
    ]
}

pub struct FakeSource {
    pub events: Vec<Event>,
    pub fail: bool,
}

impl FakeSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            events: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl EventSource for FakeSource {
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        if self.fail {
            return Err(EventHubError::Status {
                status: 503,
                url: "fake://events".to_string(),
            });
        }
        Ok(match query {
            EventQuery::All => self.events.clone(),
            EventQuery::ById(id) => self.events.iter().filter(|e| e.id == *id).cloned().collect(),
        })
    }
}
