use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use tracing::error;

use crate::app::{lookup_event, parse_event_id, DetailOutcome, EventQuery, QueryState};
use crate::constants::NOTICE_EVENT_NOT_FOUND;
use crate::domain::{time_display, EventStatus, FilterContext};
use crate::observability::{self, metrics};
use crate::web::models::{CountdownParams, EventDetailView, ListingParams, ListingView, Notice};
use crate::web::state::AppState;
use crate::web::templates::{CountdownTemplate, EventDetailTemplate, EventsListTemplate, IndexTemplate};

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// Tab counts and the visible cards are both classified at the same instant
async fn load_listing(state: &AppState, params: &ListingParams) -> ListingView {
    let query = EventQuery::All;
    let result = state.source.fetch_events(&query).await;
    let ctx = FilterContext::new(state.clock.now(), state.offset);
    let loaded = QueryState::from_result(result, ctx.now, &query);
    ListingView::build(&loaded, params.tab(), &params.criteria(), &ctx)
}

pub async fn index(State(state): State<AppState>, Query(params): Query<ListingParams>) -> Response {
    let listing = load_listing(&state, &params).await;
    metrics::web::page_rendered("index");
    render(&IndexTemplate {
        listing,
        notice: params.notice(),
    })
}

pub async fn events_htmx(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
    headers: HeaderMap,
) -> Response {
    let listing = load_listing(&state, &params).await;

    // If it's an HTMX request, return just the partial. Otherwise, return the full page.
    if headers.get("HX-Request").is_some() {
        metrics::web::page_rendered("events_partial");
        render(&EventsListTemplate { listing })
    } else {
        metrics::web::page_rendered("index");
        render(&IndexTemplate {
            listing,
            notice: params.notice(),
        })
    }
}

fn not_found_redirect() -> Response {
    metrics::web::not_found_redirect();
    Redirect::to(&format!("/?notice={}", NOTICE_EVENT_NOT_FOUND)).into_response()
}

pub async fn event_detail(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_event_id(&raw_id) else {
        return not_found_redirect();
    };

    let refresh_secs = state.refresh_interval_secs;
    match lookup_event(state.source.as_ref(), state.clock.as_ref(), id).await {
        DetailOutcome::Found(event) => {
            metrics::web::page_rendered("event_detail");
            render(&EventDetailTemplate {
                event: Some(EventDetailView::new(&event, state.clock.now(), &state.offset)),
                notice: None,
                refresh_secs,
            })
        }
        DetailOutcome::NotFound => not_found_redirect(),
        DetailOutcome::Failed => render(&EventDetailTemplate {
            event: None,
            notice: Some(Notice::detail_failed()),
            refresh_secs,
        }),
    }
}

/// Recomputes a countdown from the timestamps the page already shows
pub async fn countdown(State(state): State<AppState>, Query(params): Query<CountdownParams>) -> Response {
    let now = state.clock.now();
    render(&CountdownTemplate {
        text: time_display(params.starts_at, params.expires_at, now),
        expired: EventStatus::derive(params.starts_at, params.expires_at, now) == EventStatus::Expired,
    })
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "event_hub",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics_text() -> Response {
    match observability::render() {
        Some(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics not enabled").into_response(),
    }
}
