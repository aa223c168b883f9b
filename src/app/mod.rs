// Application layer: ports and the use cases built on them

pub mod countdown;
pub mod event_detail;
pub mod events_query;
pub mod ports;

pub use countdown::CountdownTicker;
pub use event_detail::{lookup_event, parse_event_id, DetailOutcome, EventDetail};
pub use events_query::{EventsQuery, QueryState};
pub use ports::{Clock, EventQuery, EventSource, SystemClock};
