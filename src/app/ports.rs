use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::Event;
use crate::error::Result;

/// What to ask the events API for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventQuery {
    All,
    ById(u64),
}

impl EventQuery {
    /// Query string pairs appended to `{base}/events`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            EventQuery::All => Vec::new(),
            EventQuery::ById(id) => vec![("id", id.to_string())],
        }
    }
}

impl fmt::Display for EventQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventQuery::All => f.write_str("all events"),
            EventQuery::ById(id) => write!(f, "event {}", id),
        }
    }
}

/// Read-only access to the remote collection of events
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>>;
}

/// Source of the current instant
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

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;
    use crate::error::EventHubError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Clock that only moves when told to
    pub struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, by: chrono::Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    /// In-memory source answering by id lookup, optionally failing or slow
    pub struct StaticSource {
        pub events: Vec<Event>,
        pub fail: bool,
        pub calls: AtomicUsize,
        /// Per-call delays consumed in order; calls past the end are instant
        pub delays: Mutex<Vec<Duration>>,
    }

    impl StaticSource {
        pub fn new(events: Vec<Event>) -> Self {
            Self {
                events,
                fail: false,
                calls: AtomicUsize::new(0),
                delays: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
            self.delays = Mutex::new(delays);
            self
        }
    }

    #[async_trait]
    impl EventSource for StaticSource {
        async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = {
                let mut delays = self.delays.lock().unwrap();
                if delays.is_empty() {
                    None
                } else {
                    Some(delays.remove(0))
                }
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail {
                return Err(EventHubError::Status {
                    status: 500,
                    url: "mock://events".to_string(),
                });
            }

            Ok(match query {
                EventQuery::All => self.events.clone(),
                EventQuery::ById(id) => self.events.iter().filter(|e| e.id == *id).cloned().collect(),
            })
        }
    }
}
