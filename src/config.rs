use std::env;
use std::time::Duration;

/// Base URL of the hosted webhook delivery API
const DEFAULT_API_URL: &str = "https://guilhermebranco.com.br/webhooks/api/v1";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub refresh: RefreshConfig,
    pub target: Option<TargetConfig>,
}

/// Remote event source configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Auto-refresh configuration
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Countdown length in seconds between scheduled refreshes
    pub interval_secs: u32,
}

/// Repository + pull request selection for the viewer binary
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub owner: String,
    pub repo: String,
    pub pull_request: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api: ApiConfig::from_env()?,
            refresh: RefreshConfig::from_env()?,
            target: TargetConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    /// Load API configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("WEBHOOKS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        // Reject base URLs reqwest would choke on at request time
        let parsed = url::Url::parse(&base_url).map_err(|_| ConfigError::InvalidBaseUrl)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidBaseUrl);
        }

        let api_key = env::var("WEBHOOKS_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let timeout_secs = env::var("WEBHOOKS_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl RefreshConfig {
    /// Load refresh configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval_secs = env::var("REFRESH_INTERVAL_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidRefreshInterval)?;

        if interval_secs == 0 {
            return Err(ConfigError::InvalidRefreshInterval);
        }

        Ok(Self { interval_secs })
    }
}

impl TargetConfig {
    /// Load the optional repository/PR selection from environment variables.
    /// Returns Ok(None) when no repository is configured.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let repo = match env::var("WEBHOOKS_REPO") {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };

        let (owner, name) = repo.split_once('/').ok_or(ConfigError::InvalidRepo)?;
        if owner.is_empty() || name.is_empty() {
            return Err(ConfigError::InvalidRepo);
        }

        let pull_request = env::var("WEBHOOKS_PR")
            .map_err(|_| ConfigError::MissingPullRequest)?
            .parse()
            .map_err(|_| ConfigError::MissingPullRequest)?;

        Ok(Some(Self {
            owner: owner.to_string(),
            repo: name.to_string(),
            pull_request,
        }))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    InvalidBaseUrl,
    InvalidTimeout,
    InvalidRefreshInterval,
    InvalidRepo,
    MissingPullRequest,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "WEBHOOKS_API_KEY environment variable is required")
            }
            ConfigError::InvalidBaseUrl => {
                write!(f, "WEBHOOKS_API_URL must be a valid http(s) URL")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "WEBHOOKS_API_TIMEOUT_SECS must be a number of seconds")
            }
            ConfigError::InvalidRefreshInterval => {
                write!(f, "REFRESH_INTERVAL_SECS must be a positive number")
            }
            ConfigError::InvalidRepo => {
                write!(f, "WEBHOOKS_REPO must have the form owner/name")
            }
            ConfigError::MissingPullRequest => {
                write!(f, "WEBHOOKS_PR must be a pull request number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
