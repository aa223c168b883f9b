use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::app::countdown::CountdownTicker;
use crate::app::events_query::{EventsQuery, QueryState};
use crate::app::ports::{Clock, EventQuery, EventSource};
use crate::domain::Event;

/// Result of looking up a single event by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Found(Event),
    /// The API answered with an empty collection
    NotFound,
    Failed,
}

impl DetailOutcome {
    /// Maps a finished query state; `Loading` has no outcome yet
    pub fn from_state(state: &QueryState) -> Option<Self> {
        match state {
            QueryState::Loading => None,
            QueryState::Failed => Some(DetailOutcome::Failed),
            QueryState::Loaded(catalog) => Some(match catalog.events().first() {
                Some(event) => DetailOutcome::Found(event.clone()),
                None => DetailOutcome::NotFound,
            }),
        }
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            DetailOutcome::Found(event) => Some(event),
            _ => None,
        }
    }
}

/// Parses a route id. Anything that is not a non-negative integer can
/// never match a record, so it is reported as absent.
pub fn parse_event_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// One-shot lookup used by request handlers
pub async fn lookup_event(source: &dyn EventSource, clock: &dyn Clock, id: u64) -> DetailOutcome {
    let query = EventQuery::ById(id);
    let state = QueryState::from_result(source.fetch_events(&query).await, clock.now(), &query);
    let outcome = DetailOutcome::from_state(&state).unwrap_or(DetailOutcome::Failed);
    log_outcome(id, &outcome);
    outcome
}

fn log_outcome(id: u64, outcome: &DetailOutcome) {
    match outcome {
        DetailOutcome::Found(_) => info!(event_id = id, "Event loaded"),
        DetailOutcome::NotFound => warn!(event_id = id, "Event not found"),
        DetailOutcome::Failed => warn!(event_id = id, "Failed to load event details"),
    }
}

/// A detail view: the loaded event plus a countdown bound to it
pub struct EventDetail {
    query: EventsQuery,
    clock: Arc<dyn Clock>,
    current: watch::Sender<Option<Event>>,
}

impl EventDetail {
    pub fn new(source: Arc<dyn EventSource>, clock: Arc<dyn Clock>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            query: EventsQuery::new(source, Arc::clone(&clock)),
            clock,
            current,
        }
    }

    /// Loads `id`, replacing the current event. A superseded load returns
    /// `None` and leaves the current event untouched.
    pub async fn load(&self, id: u64) -> Option<DetailOutcome> {
        let state = self.query.run(EventQuery::ById(id)).await?;
        let outcome = DetailOutcome::from_state(&state)?;
        log_outcome(id, &outcome);

        self.current.send_replace(outcome.event().cloned());
        Some(outcome)
    }

    pub fn current(&self) -> Option<Event> {
        self.current.borrow().clone()
    }

    /// Countdown text for the current event right now
    pub fn time_display(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .map(|event| event.time_display_at(self.clock.now()))
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Event>> {
        self.current.subscribe()
    }

    /// Starts a countdown that follows whatever event is current on each tick
    pub fn start_countdown(&self, period: Duration) -> CountdownTicker {
        CountdownTicker::spawn(self.subscribe(), Arc::clone(&self.clock), period)
    }
}
