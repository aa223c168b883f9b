use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::app::ports::{EventQuery, EventSource};
use crate::config::ApiConfig;
use crate::constants::EVENTS_PATH;
use crate::domain::{decode_events, Event};
use crate::error::{EventHubError, Result};
use crate::observability::metrics;

/// `EventSource` backed by the remote REST API
#[derive(Debug, Clone)]
pub struct ReqwestEventSource {
    client: Client,
    base_url: String,
}

impl ReqwestEventSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn events_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), EVENTS_PATH)
    }

    async fn get(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let url = self.events_url();
        let resp = self
            .client
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(|e| {
                metrics::api::request_error("transport");
                EventHubError::from(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            metrics::api::request_error("status");
            return Err(EventHubError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| {
            metrics::api::request_error("transport");
            EventHubError::from(e)
        })?;

        let decoded = decode_events(&bytes).map_err(|e| {
            metrics::api::request_error("decode");
            e
        })?;
        metrics::api::records_received(decoded.events.len());
        metrics::api::records_rejected(decoded.rejected);
        metrics::api::request_success();

        debug!(
            received = decoded.events.len(),
            rejected = decoded.rejected,
            "Decoded events response"
        );
        Ok(decoded.events)
    }
}

#[async_trait]
impl EventSource for ReqwestEventSource {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let started = Instant::now();
        let result = self.get(query).await;
        metrics::api::request_duration(started.elapsed().as_secs_f64());
        result
    }
}
