//! Remote event source client.
//!
//! Thin HTTP JSON client over the hosted webhook delivery API. Every
//! request carries the API key as an `Authorization: token` header; a 403
//! maps to a distinct authentication error so callers can force re-entry
//! of the key.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{EventsResponse, PullRequestsResponse, Repository};

/// Seam between the correlator pipeline and the remote API, mockable in
/// tests
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn repositories(&self) -> AppResult<Vec<Repository>>;

    async fn pull_requests(&self, owner: &str, repo: &str) -> AppResult<PullRequestsResponse>;

    async fn events(&self, owner: &str, repo: &str, number: u64) -> AppResult<EventsResponse>;
}

/// HTTP implementation of the event source
pub struct RemoteEventSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteEventSource {
    /// Creates a client for the configured API
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", self.api_key),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Authentication(
                "the API rejected the supplied key".to_string(),
            ));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_body(&body, path)
    }
}

/// Rejects wrong-shape responses with a descriptive error instead of
/// letting half-parsed data reach rendering
pub fn parse_body<T: DeserializeOwned>(body: &str, context: &str) -> AppResult<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("{}: {}", context, e)))
}

#[async_trait]
impl EventSource for RemoteEventSource {
    async fn repositories(&self) -> AppResult<Vec<Repository>> {
        self.get_json("/repositories/").await
    }

    async fn pull_requests(&self, owner: &str, repo: &str) -> AppResult<PullRequestsResponse> {
        self.get_json(&format!("/repositories/{}/{}/pulls", owner, repo))
            .await
    }

    async fn events(&self, owner: &str, repo: &str, number: u64) -> AppResult<EventsResponse> {
        self.get_json(&format!("/repositories/{}/{}/{}", owner, repo, number))
            .await
    }
}
