use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single webhook delivery as returned by the remote event source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Opaque delivery identifier, unique within one fetch only
    pub delivery_id: String,
    /// Webhook event category ("issues", "check_run", ...), open-ended
    #[serde(rename = "type")]
    pub event_type: String,
    /// Sub-action within the type ("opened", "completed", ...), may be empty
    #[serde(default)]
    pub action: String,
    /// ISO-8601 timestamp as delivered; parsed lazily via `timestamp()`
    #[serde(rename = "date")]
    pub occurred_at: String,
    /// Raw delivery payload
    pub payload: Value,
}

impl WebhookEvent {
    /// Parses the delivery timestamp.
    ///
    /// Returns None for unparseable dates so that one bad record degrades
    /// its own ordering instead of failing the whole fetch.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.occurred_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the named payload sub-object, treating JSON null as absent
    pub fn payload_object(&self, key: &str) -> Option<&Value> {
        self.payload.get(key).filter(|v| !v.is_null())
    }
}

/// Response shape of the per-pull-request events endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub owner: String,
    pub repo: String,
    pub pull_request: u64,
    pub events: Vec<WebhookEvent>,
}
