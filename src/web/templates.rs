use askama::Template;

use crate::web::models::{EventDetailView, ListingView, Notice};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub listing: ListingView,
    pub notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "events_list.html")]
pub struct EventsListTemplate {
    pub listing: ListingView,
}

#[derive(Template)]
#[template(path = "event_detail.html")]
pub struct EventDetailTemplate {
    pub event: Option<EventDetailView>,
    pub notice: Option<Notice>,
    pub refresh_secs: u64,
}

#[derive(Template)]
#[template(path = "countdown.html")]
pub struct CountdownTemplate {
    pub text: String,
    pub expired: bool,
}
