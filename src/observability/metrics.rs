//! Metrics for the event hub
//!
//! Recording functions are cheap no-ops until `init` installs the
//! Prometheus recorder, so library code can call them unconditionally.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::fmt;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Remote API metrics
    ApiRequestsSuccess,
    ApiRequestsError,
    ApiRequestDuration,
    ApiRecordsReceived,
    ApiRecordsRejected,

    // Query metrics
    QueriesSuperseded,

    // Web metrics
    PagesRendered,
    NotFoundRedirects,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ApiRequestsSuccess => "event_hub_api_requests_success_total",
            MetricName::ApiRequestsError => "event_hub_api_requests_error_total",
            MetricName::ApiRequestDuration => "event_hub_api_request_duration_seconds",
            MetricName::ApiRecordsReceived => "event_hub_api_records_received_total",
            MetricName::ApiRecordsRejected => "event_hub_api_records_rejected_total",
            MetricName::QueriesSuperseded => "event_hub_queries_superseded_total",
            MetricName::PagesRendered => "event_hub_pages_rendered_total",
            MetricName::NotFoundRedirects => "event_hub_not_found_redirects_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            ApiRequestsSuccess,
            ApiRequestsError,
            ApiRequestDuration,
            ApiRecordsReceived,
            ApiRecordsRejected,
            QueriesSuperseded,
            PagesRendered,
            NotFoundRedirects,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Installs the global Prometheus recorder. Calling it twice is harmless.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    let _ = METRICS_HANDLE.set(handle);

    info!("Metrics system initialized");
    Ok(())
}

/// Prometheus text exposition, if the recorder is installed
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Remote API Metrics
// ============================================================================

pub mod api {
    use super::MetricName;

    pub fn request_success() {
        ::metrics::counter!(MetricName::ApiRequestsSuccess.as_str()).increment(1);
    }

    /// `kind` is `transport`, `status` or `decode`
    pub fn request_error(kind: &'static str) {
        ::metrics::counter!(MetricName::ApiRequestsError.as_str(), "kind" => kind).increment(1);
    }

    pub fn request_duration(secs: f64) {
        ::metrics::histogram!(MetricName::ApiRequestDuration.as_str()).record(secs);
    }

    pub fn records_received(count: usize) {
        ::metrics::counter!(MetricName::ApiRecordsReceived.as_str()).increment(count as u64);
    }

    pub fn records_rejected(count: usize) {
        if count > 0 {
            ::metrics::counter!(MetricName::ApiRecordsRejected.as_str()).increment(count as u64);
        }
    }
}

// ============================================================================
// Query Metrics
// ============================================================================

pub mod query {
    use super::MetricName;

    pub fn superseded() {
        ::metrics::counter!(MetricName::QueriesSuperseded.as_str()).increment(1);
    }
}

// ============================================================================
// Web Metrics
// ============================================================================

pub mod web {
    use super::MetricName;

    pub fn page_rendered(page: &'static str) {
        ::metrics::counter!(MetricName::PagesRendered.as_str(), "page" => page).increment(1);
    }

    pub fn not_found_redirect() {
        ::metrics::counter!(MetricName::NotFoundRedirects.as_str()).increment(1);
    }
}
