use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::app::ports::{Clock, EventQuery, EventSource};
use crate::constants::LOAD_EVENTS_FAILED;
use crate::domain::{Event, EventCatalog};
use crate::error::Result;
use crate::observability::metrics;

/// Observable state of an events request
#[derive(Debug, Clone)]
pub enum QueryState {
    Loading,
    /// The request failed; only a generic message reaches the UI
    Failed,
    Loaded(EventCatalog),
}

impl QueryState {
    /// `now` stamps the catalog; its tab counts are tallied at that instant
    pub fn from_result(result: Result<Vec<Event>>, now: DateTime<Utc>, query: &EventQuery) -> Self {
        match result {
            Ok(events) => QueryState::Loaded(EventCatalog::new(events, now)),
            Err(e) => {
                warn!(error = %e, %query, "Event fetch failed");
                QueryState::Failed
            }
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            QueryState::Failed => Some(LOAD_EVENTS_FAILED),
            _ => None,
        }
    }

    pub fn catalog(&self) -> Option<&EventCatalog> {
        match self {
            QueryState::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// Runs event requests against a source and publishes their state.
///
/// Each run takes a fresh generation number. A response is only published
/// if no newer run (or `cancel`) started while it was in flight.
pub struct EventsQuery {
    source: Arc<dyn EventSource>,
    clock: Arc<dyn Clock>,
    generation: AtomicU64,
    state: watch::Sender<QueryState>,
}

impl EventsQuery {
    pub fn new(source: Arc<dyn EventSource>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(QueryState::Loading);
        Self {
            source,
            clock,
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Fetches `query` and publishes the outcome. Returns `None` when the
    /// response was superseded and therefore dropped.
    pub async fn run(&self, query: EventQuery) -> Option<QueryState> {
        // Taking the generation and writing Loading under the channel lock
        // keeps an older run's Loading from landing after a newer result.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = QueryState::Loading;
        });
        debug!(generation, %query, "Fetching events");

        let result = self.source.fetch_events(&query).await;
        let next = QueryState::from_result(result, self.clock.now(), &query);

        // Checked under the channel lock so a newer run's Loading cannot be
        // overwritten by this one.
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = next.clone();
                true
            } else {
                false
            }
        });

        if published {
            Some(next)
        } else {
            debug!(generation, %query, "Discarding superseded response");
            metrics::query::superseded();
            None
        }
    }

    /// Invalidates whatever request is in flight
    pub fn cancel(&self) {
        self.state.send_if_modified(|_| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }
}
