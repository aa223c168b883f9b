use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::constants::PLACEHOLDER_IMAGE;
use crate::domain::status::{time_display, EventStatus};
use crate::error::Result;

/// An event record as served by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(rename = "type", default, deserialize_with = "nullable_string")]
    pub event_type: String,
}

impl Event {
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        EventStatus::derive(self.starts_at, self.expires_at, now)
    }

    pub fn time_display_at(&self, now: DateTime<Utc>) -> String {
        time_display(self.starts_at, self.expires_at, now)
    }

    /// Image to show, falling back to the placeholder when none is set
    pub fn image_src(&self) -> &str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    pub fn date_range_label(&self, offset: &FixedOffset) -> String {
        format!(
            "{} - {}",
            self.starts_at.with_timezone(offset).format("%b %-d, %Y"),
            self.expires_at.with_timezone(offset).format("%b %-d, %Y")
        )
    }

    pub fn time_range_label(&self, offset: &FixedOffset) -> String {
        format!(
            "{} - {}",
            self.starts_at.with_timezone(offset).format("%H:%M"),
            self.expires_at.with_timezone(offset).format("%H:%M")
        )
    }
}

/// Result of decoding an API response body
#[derive(Debug, Default)]
pub struct DecodedEvents {
    pub events: Vec<Event>,
    /// Records dropped because a required field was missing or invalid
    pub rejected: usize,
}

/// Decodes a JSON array of event records.
///
/// A body that is not an array fails as a whole. Individual records that
/// cannot be decoded are skipped and counted.
pub fn decode_events(body: &[u8]) -> Result<DecodedEvents> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let mut decoded = DecodedEvents {
        events: Vec::with_capacity(items.len()),
        rejected: 0,
    };

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Event>(item) {
            Ok(event) => decoded.events.push(event),
            Err(e) => {
                warn!(index, error = %e, "Dropping malformed event record");
                decoded.rejected += 1;
            }
        }
    }

    Ok(decoded)
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid event id '{}'", s))),
    }
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
