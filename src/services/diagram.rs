use crate::models::{ReviewState, RunState, WebhookEvent};

/// Cap on sender participants so wide delivery streams stay readable
const MAX_ACTORS: usize = 5;

/// Renders a delivery stream as Mermaid sequence-diagram source.
///
/// Events are expected in chronological order; the caller decides the
/// ordering (the viewer sorts before rendering).
pub fn sequence_diagram(events: &[WebhookEvent]) -> String {
    if events.is_empty() {
        return "sequenceDiagram\n    participant GH as GitHub\n    participant PR as Pull Request\n    Note over GH,PR: No events found".to_string();
    }

    let mut diagram = String::from("sequenceDiagram\n");
    diagram.push_str("    participant GH as GitHub\n");
    diagram.push_str("    participant PR as Pull Request\n");

    // First pass: declare sender participants, first-seen order
    let mut actors: Vec<String> = Vec::new();
    for event in events {
        if let Some(sender) = sender_login(event) {
            if !actors.contains(&sender) && actors.len() < MAX_ACTORS {
                diagram.push_str(&format!(
                    "    participant {} as {}\n",
                    sanitize_participant(&sender),
                    truncate_text(&sender, 15)
                ));
                actors.push(sender);
            }
        }
    }

    // Second pass: one arrow per event, with de-duplicated time notes
    let mut last_time = String::new();
    for (index, event) in events.iter().enumerate() {
        let sender = match sender_login(event) {
            Some(login) if actors.contains(&login) => sanitize_participant(&login),
            _ => "GH".to_string(),
        };

        let message = if event.action.is_empty() {
            event.event_type.clone()
        } else {
            format!("{}:{}", event.event_type, event.action)
        };
        diagram.push_str(&format!(
            "    {}->PR: {}\n",
            sender,
            truncate_text(&message, 25)
        ));

        let time = format_event_time(event);
        if time != last_time {
            diagram.push_str(&format!("    Note over PR: {}\n", time));
            last_time = time;
        }

        let notes = payload_notes(event);
        if !notes.is_empty() {
            diagram.push_str(&format!(
                "    Note over {},PR: {}\n",
                sender,
                truncate_text(&notes.join(", "), 20)
            ));
        }

        if index < events.len() - 1 {
            diagram.push('\n');
        }
    }

    diagram
}

/// Minimal payload annotations: comment presence, review state,
/// check-suite conclusion
fn payload_notes(event: &WebhookEvent) -> Vec<String> {
    let mut notes = Vec::new();

    let has_comment_body = event
        .payload_object("comment")
        .and_then(|c| c.get("body"))
        .and_then(|b| b.as_str())
        .is_some_and(|body| !body.is_empty());
    if has_comment_body {
        notes.push("Comment".to_string());
    }

    if let Some(state) = ReviewState::of(event, "review")
        .state
        .filter(|s| !s.is_empty())
    {
        notes.push(state);
    }

    if let Some(conclusion) = RunState::of(event, "check_suite")
        .conclusion
        .filter(|s| !s.is_empty())
    {
        notes.push(conclusion);
    }

    notes
}

fn sender_login(event: &WebhookEvent) -> Option<String> {
    event
        .payload_object("sender")
        .and_then(|s| s.get("login"))
        .and_then(|l| l.as_str())
        .filter(|login| !login.is_empty())
        .map(|login| login.to_string())
}

/// Mermaid participant ids allow word characters only
fn sanitize_participant(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(20)
        .collect()
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text.chars().take(max_len).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn format_event_time(event: &WebhookEvent) -> String {
    match event.timestamp() {
        Some(instant) => instant.format("%H:%M").to_string(),
        None => "??:??".to_string(),
    }
}
