use crate::models::{ReviewState, RunState, WebhookEvent};

/// Display color bucket for a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusColor {
    Green,
    Red,
    Gray,
    Yellow,
    Purple,
    #[default]
    Blue,
}

/// Human label + color classification for one delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub color: StatusColor,
}

/// Classifies a delivery for display. Pure and total: malformed payloads
/// fall back to the default classification instead of failing.
pub fn classify_event(event: &WebhookEvent) -> Classification {
    Classification {
        label: event_label(event),
        color: event_color(event),
    }
}

/// Human-readable label, first recognized payload object wins
pub fn event_label(event: &WebhookEvent) -> String {
    const NOUNS: [(&str, &str); 9] = [
        ("issue", "Issue"),
        ("pull_request", "PR"),
        ("comment", "Comment"),
        ("review", "Review"),
        ("check_run", "Check"),
        ("check_suite", "Suite"),
        ("workflow_run", "Workflow"),
        ("workflow_job", "Job"),
        ("release", "Release"),
    ];

    for (key, noun) in NOUNS {
        if event.payload_object(key).is_some() {
            return format!("{} {}", noun, event.action);
        }
    }

    if event.action.is_empty() {
        event.event_type.clone()
    } else {
        format!("{}: {}", event.event_type, event.action)
    }
}

/// Status color derived from conclusion-class fields, then lifecycle
/// status, then release actions, defaulting to blue.
pub fn event_color(event: &WebhookEvent) -> StatusColor {
    let conclusion = [
        RunState::of(event, "check_run").conclusion,
        RunState::of(event, "check_suite").conclusion,
        ReviewState::of(event, "status").state,
        ReviewState::of(event, "review").state,
        RunState::of(event, "workflow_run").conclusion,
        RunState::of(event, "workflow_job").conclusion,
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty());

    if let Some(conclusion) = conclusion {
        return conclusion_color(&conclusion);
    }

    let status = [
        RunState::of(event, "workflow_run").status,
        RunState::of(event, "workflow_job").status,
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.is_empty());

    if let Some(status) = status {
        return status_color(&status);
    }

    if event.event_type == "release" {
        return release_color(&event.action);
    }

    StatusColor::Blue
}

fn conclusion_color(conclusion: &str) -> StatusColor {
    match conclusion.to_lowercase().as_str() {
        "success" | "completed" | "approved" => StatusColor::Green,
        "failure" | "failed" | "changes_requested" => StatusColor::Red,
        "cancelled" | "timed_out" | "dismissed" => StatusColor::Gray,
        "neutral" | "pending" | "queued" | "in_progress" => StatusColor::Yellow,
        "skipped" | "stale" => StatusColor::Purple,
        _ => StatusColor::Blue,
    }
}

fn status_color(status: &str) -> StatusColor {
    match status.to_lowercase().as_str() {
        "completed" => StatusColor::Green,
        "in_progress" => StatusColor::Yellow,
        "queued" => StatusColor::Blue,
        "waiting" => StatusColor::Purple,
        _ => StatusColor::Blue,
    }
}

fn release_color(action: &str) -> StatusColor {
    match action {
        "published" | "released" => StatusColor::Green,
        "unpublished" | "deleted" => StatusColor::Red,
        "created" => StatusColor::Blue,
        "edited" => StatusColor::Yellow,
        "prereleased" => StatusColor::Purple,
        _ => StatusColor::Blue,
    }
}
