mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use chrono::Duration;
use common::{make_event, now, sample_events, FakeSource, FixedClock, SteppingClock};
use event_hub::web::{app_router, AppState};

fn app(source: FakeSource) -> Router {
    app_router(AppState::new(Arc::new(source)).with_clock(Arc::new(FixedClock(now()))))
}

async fn get(app: Router, uri: &str, htmx: bool) -> (StatusCode, Option<String>, String) {
    let mut request = Request::builder().uri(uri);
    if htmx {
        request = request.header("HX-Request", "true");
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_lists_events_with_tab_counts() {
    let (status, _, body) = get(app(FakeSource::new(sample_events())), "/", false).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("All (3)"));
    assert!(body.contains("Upcoming (1)"));
    assert!(body.contains("Ongoing (1)"));
    assert!(body.contains("Expired (1)"));
    assert!(body.contains("Tech Conference 2025"));
    assert!(body.contains("Music Festival"));
    assert!(body.contains("Old Meetup"));
    assert!(body.contains("Starting in 1 days : 0 hours : 0 minutes"));
    assert!(body.contains("Ending in 1 days : 0 hours : 0 minutes"));
}

#[tokio::test]
async fn test_search_narrows_listing() {
    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/?search=conference", false).await;

    assert!(body.contains("Tech Conference 2025"));
    assert!(!body.contains("Music Festival"));
    // Tab counts still describe the whole collection
    assert!(body.contains("All (3)"));
}

#[tokio::test]
async fn test_tab_and_category_filters() {
    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/?tab=expired", false).await;
    assert!(body.contains("Old Meetup"));
    assert!(!body.contains("Tech Conference 2025"));

    let (_, _, body) = get(
        app(FakeSource::new(sample_events())),
        "/?category=music&date=2025-05-10",
        false,
    )
    .await;
    assert!(body.contains("Music Festival"));
    assert!(!body.contains("Old Meetup"));

    let (_, _, body) = get(
        app(FakeSource::new(sample_events())),
        "/?category=all-categories&date=",
        false,
    )
    .await;
    assert!(body.contains("Old Meetup"));
    assert!(body.contains("Tech Conference 2025"));
}

#[tokio::test]
async fn test_no_matches_shows_empty_state() {
    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/?search=opera", false).await;
    assert!(body.contains("No events found"));
}

#[tokio::test]
async fn test_htmx_request_gets_partial() {
    let (status, _, partial) = get(app(FakeSource::new(sample_events())), "/events?tab=ongoing", true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!partial.contains("<html"));
    assert!(partial.contains("Music Festival"));
    assert!(!partial.contains("Old Meetup"));

    let (_, _, full) = get(app(FakeSource::new(sample_events())), "/events?tab=ongoing", false).await;
    assert!(full.contains("<!DOCTYPE html>"));
    assert!(full.contains("Music Festival"));
}

#[tokio::test]
async fn test_partial_carries_active_tab_into_filter_form() {
    let (_, _, partial) = get(app(FakeSource::new(sample_events())), "/events?tab=upcoming", true).await;
    assert!(partial.contains(r#"<input type="hidden" name="tab" value="upcoming">"#));
    assert!(partial.contains("Apply Filters"));

    // Applying a category afterwards keeps the Upcoming tab
    let (_, _, body) = get(
        app(FakeSource::new(sample_events())),
        "/events?tab=upcoming&category=music",
        true,
    )
    .await;
    assert!(!body.contains("Music Festival"));
    assert!(body.contains("No events found"));
}

#[tokio::test]
async fn test_counts_and_cards_use_one_instant() {
    // The event starts between the first and any second clock read
    let start = now() + Duration::milliseconds(500);
    let source = FakeSource::new(vec![make_event(
        7,
        "Launch Party",
        "Oslo",
        "party",
        start,
        start + Duration::hours(2),
    )]);
    let app = app_router(
        AppState::new(Arc::new(source)).with_clock(Arc::new(SteppingClock::new(now(), Duration::seconds(1)))),
    );

    let (_, _, body) = get(app, "/events?tab=upcoming", true).await;
    assert!(body.contains("Upcoming (1)"));
    assert!(body.contains("Ongoing (0)"));
    assert!(body.contains("Launch Party"));
}

#[tokio::test]
async fn test_plain_visit_shows_welcome_notice() {
    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/", false).await;
    assert!(body.contains("Welcome to Event Hub"));

    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/?notice=event-not-found", false).await;
    assert!(!body.contains("Welcome to Event Hub"));
    assert!(body.contains("Event not found"));
}

#[tokio::test]
async fn test_failed_load_shows_generic_error() {
    let (status, _, body) = get(app(FakeSource::failing()), "/", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load events"));
    assert!(body.contains("Please try again later."));
    assert!(!body.contains("503"));
}

#[tokio::test]
async fn test_not_found_notice_on_listing() {
    let (_, _, body) = get(app(FakeSource::new(sample_events())), "/?notice=event-not-found", false).await;
    assert!(body.contains("Event not found"));
}

#[tokio::test]
async fn test_detail_renders_found_event() {
    let (status, _, body) = get(app(FakeSource::new(sample_events())), "/event/2", false).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Music Festival"));
    assert!(body.contains("About this event"));
    assert!(body.contains("Ending in 1 days : 0 hours : 0 minutes"));
    assert!(body.contains("hx-trigger=\"every 60s\""));
    assert!(body.contains("starts_at=2025-05-09T12:00:00.000Z"));
}

#[tokio::test]
async fn test_detail_unknown_id_redirects_to_listing() {
    for uri in ["/event/999", "/event/not-a-number"] {
        let (status, location, _) = get(app(FakeSource::new(sample_events())), uri, false).await;
        assert_eq!(status, StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location.as_deref(), Some("/?notice=event-not-found"));
    }
}

#[tokio::test]
async fn test_detail_fetch_failure_notifies() {
    let (status, location, body) = get(app(FakeSource::failing()), "/event/2", false).await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Failed to load event details"));
    assert!(body.contains("Event not found"));
}

#[tokio::test]
async fn test_countdown_fragment_recomputes_without_fetching() {
    // A failing source proves the countdown never touches the API
    let (status, _, body) = get(
        app(FakeSource::failing()),
        "/countdown?starts_at=2025-05-11T12:00:00Z&expires_at=2025-05-12T12:00:00Z",
        true,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "Starting in 1 days : 0 hours : 0 minutes");

    let (_, _, body) = get(
        app(FakeSource::failing()),
        "/countdown?starts_at=2025-05-01T12:00:00Z&expires_at=2025-05-02T12:00:00Z",
        true,
    )
    .await;
    assert!(body.contains("Expired"));
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let (status, _, body) = get(app(FakeSource::new(vec![])), "/health", false).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");

    // The recorder is never installed in tests
    let (status, _, _) = get(app(FakeSource::new(vec![])), "/metrics", false).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
