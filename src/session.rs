use crate::models::WebhookEvent;
use crate::services::sort_chronologically;

/// Owns the in-memory delivery list for one viewing session.
///
/// Snapshots arrive tagged with a fetch generation. An older fetch
/// resolving after a newer one is discarded instead of overwriting
/// fresher state; there is no last-write-wins race.
#[derive(Debug, Default)]
pub struct EventStore {
    generation: u64,
    events: Vec<WebhookEvent>,
    last_error: Option<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the event list with a fetched snapshot, sorted
    /// chronologically. Returns false when the snapshot is stale.
    pub fn apply_events(&mut self, generation: u64, mut events: Vec<WebhookEvent>) -> bool {
        if generation < self.generation {
            return false;
        }
        sort_chronologically(&mut events);
        self.generation = generation;
        self.events = events;
        self.last_error = None;
        true
    }

    /// Records a fetch failure as a display string. The previous event
    /// list is kept so one failed refresh does not blank the view.
    pub fn apply_error(&mut self, generation: u64, message: String) -> bool {
        if generation < self.generation {
            return false;
        }
        self.generation = generation;
        self.last_error = Some(message);
        true
    }

    pub fn events(&self) -> &[WebhookEvent] {
        &self.events
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
