//! Tests for response body parsing
//!
//! Exercises the shape validation the remote event source applies to
//! API responses before they reach the correlation pipeline.

use hooktrace::error::AppError;
use hooktrace::models::{EventsResponse, PullRequestsResponse, Repository};
use hooktrace::source::parse_body;
use pretty_assertions::assert_eq;

// =============================================================================
// Well-formed bodies
// =============================================================================

#[test]
fn test_parses_repository_list() {
    let body = r#"[
        { "id": "1", "owner": "octo", "name": "demo", "full_name": "octo/demo" },
        { "id": "2", "owner": "octo", "name": "other", "full_name": "octo/other" }
    ]"#;

    let repositories: Vec<Repository> = parse_body(body, "/repositories/").unwrap();
    assert_eq!(repositories.len(), 2);
    assert_eq!(repositories[0].full_name, "octo/demo");
}

#[test]
fn test_parses_pull_requests_response() {
    let body = r#"{
        "owner": "octo",
        "repo": "demo",
        "pull_requests": [
            { "number": 7, "title": "Add feature", "date": "2024-03-01T10:00:00Z" }
        ]
    }"#;

    let response: PullRequestsResponse = parse_body(body, "/repositories/octo/demo/pulls").unwrap();
    assert_eq!(response.pull_requests.len(), 1);
    assert_eq!(response.pull_requests[0].number, 7);
}

#[test]
fn test_parses_events_response() {
    let body = r#"{
        "owner": "octo",
        "repo": "demo",
        "pull_request": 7,
        "events": [
            {
                "delivery_id": "d-1",
                "type": "issue_comment",
                "action": "created",
                "date": "2024-03-01T10:00:00Z",
                "payload": { "comment": { "id": 5 }, "issue": { "id": 9 } }
            }
        ]
    }"#;

    let response: EventsResponse = parse_body(body, "/repositories/octo/demo/7").unwrap();
    assert_eq!(response.pull_request, 7);
    assert_eq!(response.events.len(), 1);
    assert_eq!(response.events[0].event_type, "issue_comment");
}

#[test]
fn test_missing_action_defaults_to_empty() {
    let body = r#"{
        "owner": "octo",
        "repo": "demo",
        "pull_request": 7,
        "events": [
            {
                "delivery_id": "d-1",
                "type": "ping",
                "date": "2024-03-01T10:00:00Z",
                "payload": {}
            }
        ]
    }"#;

    let response: EventsResponse = parse_body(body, "/repositories/octo/demo/7").unwrap();
    assert_eq!(response.events[0].action, "");
}

#[test]
fn test_unknown_payload_fields_are_tolerated() {
    let body = r#"{
        "owner": "octo",
        "repo": "demo",
        "pull_request": 7,
        "events": [
            {
                "delivery_id": "d-1",
                "type": "issues",
                "action": "opened",
                "date": "2024-03-01T10:00:00Z",
                "payload": { "issue": { "id": 1 }, "installation": { "id": 42 }, "extra": [1, 2] }
            }
        ]
    }"#;

    let response: EventsResponse = parse_body(body, "/repositories/octo/demo/7").unwrap();
    assert!(response.events[0].payload.get("installation").is_some());
}

// =============================================================================
// Malformed bodies
// =============================================================================

#[test]
fn test_wrong_shape_is_rejected_with_context() {
    let body = r#"{ "unexpected": true }"#;

    let result: Result<EventsResponse, _> = parse_body(body, "/repositories/octo/demo/7");
    match result {
        Err(AppError::MalformedResponse(message)) => {
            assert!(message.contains("/repositories/octo/demo/7"));
        }
        other => panic!("expected MalformedResponse, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_invalid_json_is_rejected() {
    let result: Result<Vec<Repository>, _> = parse_body("not json at all", "/repositories/");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[test]
fn test_scalar_where_list_expected_is_rejected() {
    let result: Result<Vec<Repository>, _> = parse_body("42", "/repositories/");
    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}
