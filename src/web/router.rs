use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::web::handlers::{countdown, event_detail, events_htmx, health, index, metrics_text};
use crate::web::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_methods([Method::GET]).allow_origin(Any);

    Router::new()
        .route("/", get(index))
        .route("/events", get(events_htmx))
        .route("/event/:id", get(event_detail))
        .route("/countdown", get(countdown))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}
