use std::collections::BTreeMap;

use crate::models::WebhookEvent;

use super::correlate::sort_chronologically;

/// Groups deliveries by event type for the collapsible timeline list.
///
/// Types are ordered alphabetically without regard to case; members are
/// ordered chronologically.
pub fn group_events_by_type(events: &[WebhookEvent]) -> Vec<(String, Vec<WebhookEvent>)> {
    let mut by_type: BTreeMap<String, Vec<WebhookEvent>> = BTreeMap::new();
    for event in events {
        by_type
            .entry(event.event_type.clone())
            .or_default()
            .push(event.clone());
    }

    let mut entries: Vec<(String, Vec<WebhookEvent>)> = by_type.into_iter().collect();
    for (_, members) in entries.iter_mut() {
        sort_chronologically(members);
    }
    entries.sort_by_key(|(event_type, _)| event_type.to_lowercase());

    entries
}
