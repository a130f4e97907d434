use serde::Deserialize;
use serde_json::Value;

use super::event::WebhookEvent;

/// Logical domain entity a delivery payload refers to, with its
/// normalized id. This is the typed replacement for probing raw payload
/// keys at every call site; deliveries that carry none of the recognized
/// objects simply have no `EntityRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Issue(String),
    PullRequest(String),
    Comment(String),
    Review(String),
    CheckRun(String),
    CheckSuite(String),
    WorkflowRun(String),
    WorkflowJob(String),
    Release(String),
}

impl EntityRef {
    /// Recognizes the entity a delivery refers to.
    ///
    /// Payload keys are checked in a fixed priority order. issue_comment
    /// deliveries correlate by comment id even when an issue object is
    /// also present; this override is pinned product behavior.
    pub fn from_event(event: &WebhookEvent) -> Option<Self> {
        if event.event_type == "issue_comment" {
            if let Some(id) = event.payload_object("comment").and_then(entity_id) {
                return Some(EntityRef::Comment(id));
            }
        }

        let rules: [(&str, fn(String) -> EntityRef); 9] = [
            ("issue", EntityRef::Issue),
            ("pull_request", EntityRef::PullRequest),
            ("comment", EntityRef::Comment),
            ("review", EntityRef::Review),
            ("check_run", EntityRef::CheckRun),
            ("check_suite", EntityRef::CheckSuite),
            ("workflow_run", EntityRef::WorkflowRun),
            ("workflow_job", EntityRef::WorkflowJob),
            ("release", EntityRef::Release),
        ];

        for (key, build) in rules {
            if let Some(id) = event.payload_object(key).and_then(entity_id) {
                return Some(build(id));
            }
        }

        None
    }

    /// Correlation key prefix for this entity kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityRef::Issue(_) => "issue",
            EntityRef::PullRequest(_) => "pr",
            EntityRef::Comment(_) => "comment",
            EntityRef::Review(_) => "review",
            EntityRef::CheckRun(_) => "check",
            EntityRef::CheckSuite(_) => "suite",
            EntityRef::WorkflowRun(_) => "workflow",
            EntityRef::WorkflowJob(_) => "job",
            EntityRef::Release(_) => "release",
        }
    }

    /// Normalized entity id
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Issue(id)
            | EntityRef::PullRequest(id)
            | EntityRef::Comment(id)
            | EntityRef::Review(id)
            | EntityRef::CheckRun(id)
            | EntityRef::CheckSuite(id)
            | EntityRef::WorkflowRun(id)
            | EntityRef::WorkflowJob(id)
            | EntityRef::Release(id) => id,
        }
    }

    /// Correlation key, e.g. "check_7"
    pub fn key(&self) -> String {
        format!("{}_{}", self.prefix(), self.id())
    }
}

/// Extracts a primitive entity id. Non-primitive ids (objects, arrays,
/// booleans, null) count as absent.
fn entity_id(object: &Value) -> Option<String> {
    match object.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Lifecycle fields of a CI entity (check run, check suite, workflow run,
/// workflow job). Malformed sub-objects deserialize to the empty view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunState {
    pub status: Option<String>,
    pub conclusion: Option<String>,
}

/// State field of a review (or a commit status) payload object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewState {
    pub state: Option<String>,
}

impl RunState {
    /// Typed view over the named payload sub-object
    pub fn of(event: &WebhookEvent, key: &str) -> Self {
        view(event, key)
    }
}

impl ReviewState {
    /// Typed view over the named payload sub-object
    pub fn of(event: &WebhookEvent, key: &str) -> Self {
        view(event, key)
    }
}

fn view<T: Default + for<'de> Deserialize<'de>>(event: &WebhookEvent, key: &str) -> T {
    event
        .payload_object(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}
