use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{EntityRef, WebhookEvent};

/// Computes the correlation key for a delivery, e.g. "check_7".
///
/// Returns None when the payload carries no recognizable entity; such
/// deliveries participate in no group.
pub fn correlation_key(event: &WebhookEvent) -> Option<String> {
    EntityRef::from_event(event).map(|entity| entity.key())
}

/// Stable ascending sort by delivery timestamp.
///
/// Deliveries with unparseable dates sort ahead of all parsed instants;
/// equal timestamps keep their relative input order.
pub fn sort_chronologically(events: &mut [WebhookEvent]) {
    events.sort_by_key(|event| event.timestamp());
}

/// Partitions deliveries into logical sequences keyed by the underlying
/// domain entity, each sorted chronologically.
pub fn group_events_by_payload_id(
    events: &[WebhookEvent],
) -> BTreeMap<String, Vec<WebhookEvent>> {
    let mut grouped: BTreeMap<String, Vec<WebhookEvent>> = BTreeMap::new();

    for event in events {
        if let Some(key) = correlation_key(event) {
            grouped.entry(key).or_default().push(event.clone());
        }
    }

    for members in grouped.values_mut() {
        sort_chronologically(members);
    }

    grouped
}

/// Groups eligible for the sequence view: more than one member
pub fn relevant_groups(
    grouped: &BTreeMap<String, Vec<WebhookEvent>>,
) -> Vec<(&str, &[WebhookEvent])> {
    grouped
        .iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| (key.as_str(), members.as_slice()))
        .collect()
}

/// Display title for a group, derived from its first member
pub fn group_title(members: &[WebhookEvent]) -> String {
    let first = match members.first() {
        Some(event) => event,
        None => return "Event Sequence".to_string(),
    };

    if let Some(issue) = first.payload_object("issue") {
        return numbered_title("Issue", issue);
    }
    if let Some(pr) = first.payload_object("pull_request") {
        return numbered_title("PR", pr);
    }
    if first.payload_object("comment").is_some() {
        return "Comment Thread".to_string();
    }
    if first.payload_object("review").is_some() {
        return "Review Thread".to_string();
    }
    if let Some(check) = first.payload_object("check_run") {
        return format!("Check: {}", name_of(check, &["name"]));
    }
    if first.payload_object("check_suite").is_some() {
        return "Check Suite".to_string();
    }
    if let Some(run) = first.payload_object("workflow_run") {
        return format!("Workflow: {}", name_of(run, &["name", "workflow_name"]));
    }
    if let Some(job) = first.payload_object("workflow_job") {
        return format!("Job: {}", name_of(job, &["name"]));
    }
    if let Some(release) = first.payload_object("release") {
        return format!("Release: {}", name_of(release, &["name", "tag_name"]));
    }

    "Event Sequence".to_string()
}

fn numbered_title(noun: &str, object: &Value) -> String {
    match object.get("number") {
        Some(Value::Number(n)) => format!("{} #{}", noun, n),
        Some(Value::String(s)) if !s.is_empty() => format!("{} #{}", noun, s),
        _ => noun.to_string(),
    }
}

/// First non-empty string among the candidate fields, else "Unknown"
fn name_of(object: &Value, fields: &[&str]) -> String {
    fields
        .iter()
        .filter_map(|field| object.get(*field).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}
