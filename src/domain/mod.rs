// Domain data shapes and the pure logic over them

pub mod catalog;
pub mod event;
pub mod filter;
pub mod status;

pub use catalog::EventCatalog;
pub use event::{decode_events, DecodedEvents, Event};
pub use filter::{categories, filter_events, FilterContext, FilterCriteria, StatusTab, TabCounts};
pub use status::{time_display, Countdown, EventStatus};
