use serde::{Deserialize, Serialize};

/// Repository descriptor from the repositories endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub full_name: String,
}

/// Pull request summary from the pulls endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub date: String,
}

/// Response shape of the pulls endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestsResponse {
    pub owner: String,
    pub repo: String,
    pub pull_requests: Vec<PullRequest>,
}
