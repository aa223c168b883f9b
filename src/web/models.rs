use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;

use crate::app::QueryState;
use crate::constants::{
    ALL_CATEGORIES, EVENT_NOT_FOUND, LOAD_EVENT_DETAILS_FAILED, NOTICE_EVENT_NOT_FOUND,
    WELCOME_MESSAGE, WELCOME_TITLE,
};
use crate::domain::{Event, EventStatus, FilterContext, FilterCriteria, StatusTab};

/// Query string accepted by the listing routes
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListingParams {
    pub tab: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub notice: Option<String>,
}

impl ListingParams {
    /// Unknown tab names fall back to `all`
    pub fn tab(&self) -> StatusTab {
        self.tab
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    /// Blank or unparsable dates mean "no date filter"
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            date: self
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
        }
    }

    /// A plain visit gets the welcome notice; unknown keys show nothing
    pub fn notice(&self) -> Option<Notice> {
        match self.notice.as_deref() {
            None => Some(Notice::welcome()),
            Some(key) => Notice::from_key(key),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CountdownParams {
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A toast-style notification shown at the top of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
    pub variant: &'static str,
}

impl Notice {
    pub fn welcome() -> Self {
        Self {
            title: WELCOME_TITLE,
            message: WELCOME_MESSAGE,
            variant: "default",
        }
    }

    pub fn event_not_found() -> Self {
        Self {
            title: "Error",
            message: EVENT_NOT_FOUND,
            variant: "destructive",
        }
    }

    pub fn detail_failed() -> Self {
        Self {
            title: "Error",
            message: LOAD_EVENT_DETAILS_FAILED,
            variant: "destructive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            NOTICE_EVENT_NOT_FOUND => Some(Self::event_not_found()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventCardView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub image_src: String,
    pub status: &'static str,
    pub badge: &'static str,
    pub expired: bool,
    pub date_range: String,
    pub time_display: String,
}

impl EventCardView {
    pub fn new(event: &Event, now: DateTime<Utc>, offset: &FixedOffset) -> Self {
        let status = event.status_at(now);
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            category: event.event_type.clone(),
            image_src: event.image_src().to_string(),
            status: status.as_str(),
            badge: status.badge_variant(),
            expired: status == EventStatus::Expired,
            date_range: event.date_range_label(offset),
            time_display: event.time_display_at(now),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventDetailView {
    pub card: EventCardView,
    pub time_range: String,
    pub starts_at: String,
    pub expires_at: String,
}

impl EventDetailView {
    pub fn new(event: &Event, now: DateTime<Utc>, offset: &FixedOffset) -> Self {
        Self {
            card: EventCardView::new(event, now, offset),
            time_range: event.time_range_label(offset),
            starts_at: event.starts_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            expires_at: event.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabView {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: String,
    pub selected: bool,
}

/// Everything the listing partial needs
#[derive(Debug, Clone)]
pub struct ListingView {
    pub tabs: Vec<TabView>,
    pub cards: Vec<EventCardView>,
    pub categories: Vec<CategoryOption>,
    pub active_tab: &'static str,
    pub search: String,
    pub category: String,
    pub date: String,
    pub all_categories: &'static str,
    pub error: Option<&'static str>,
}

impl ListingView {
    pub fn build(state: &QueryState, tab: StatusTab, criteria: &FilterCriteria, ctx: &FilterContext) -> Self {
        let mut view = ListingView {
            tabs: Vec::new(),
            cards: Vec::new(),
            categories: Vec::new(),
            active_tab: tab.as_str(),
            search: criteria.search.clone(),
            category: criteria.category.clone(),
            date: criteria
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            all_categories: ALL_CATEGORIES,
            error: None,
        };

        let catalog = match state {
            QueryState::Loaded(catalog) => catalog,
            QueryState::Failed => {
                view.error = state.error_message();
                return view;
            }
            QueryState::Loading => return view,
        };

        let counts = catalog.tab_counts();
        view.tabs = StatusTab::ALL_TABS
            .iter()
            .map(|t| TabView {
                key: t.as_str(),
                label: t.label(),
                count: counts.get(*t),
                active: *t == tab,
            })
            .collect();
        view.categories = catalog
            .categories()
            .iter()
            .map(|c| CategoryOption {
                value: c.clone(),
                selected: *c == criteria.category,
            })
            .collect();
        view.cards = catalog
            .filter(tab, criteria, ctx)
            .into_iter()
            .map(|event| EventCardView::new(event, ctx.now, &ctx.offset))
            .collect();

        view
    }
}
