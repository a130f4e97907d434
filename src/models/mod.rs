pub mod entity;
pub mod event;
pub mod repository;

pub use entity::{EntityRef, ReviewState, RunState};
pub use event::{EventsResponse, WebhookEvent};
pub use repository::{PullRequest, PullRequestsResponse, Repository};
