//! Unit tests for configuration parsing
//!
//! Tests environment variable parsing and default values.
//!
//! Note: These tests modify global environment variables and must run serially.

use hooktrace::config::{ApiConfig, Config, RefreshConfig, TargetConfig};
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    std::env::remove_var("WEBHOOKS_API_URL");
    std::env::remove_var("WEBHOOKS_API_KEY");
    std::env::remove_var("WEBHOOKS_API_TIMEOUT_SECS");
    std::env::remove_var("REFRESH_INTERVAL_SECS");
    std::env::remove_var("WEBHOOKS_REPO");
    std::env::remove_var("WEBHOOKS_PR");
}

// =============================================================================
// API Config Tests
// =============================================================================

#[test]
#[serial]
fn test_api_config_defaults() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_KEY", "secret");

    let config = ApiConfig::from_env().unwrap();

    assert_eq!(
        config.base_url,
        "https://guilhermebranco.com.br/webhooks/api/v1"
    );
    assert_eq!(config.api_key, "secret");
    assert_eq!(config.timeout, Duration::from_secs(30));

    clear_env();
}

#[test]
#[serial]
fn test_api_config_custom_values() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_URL", "http://localhost:8080/api/v1/");
    std::env::set_var("WEBHOOKS_API_KEY", "local-key");
    std::env::set_var("WEBHOOKS_API_TIMEOUT_SECS", "5");

    let config = ApiConfig::from_env().unwrap();

    // Trailing slash is trimmed so path joining stays predictable
    assert_eq!(config.base_url, "http://localhost:8080/api/v1");
    assert_eq!(config.api_key, "local-key");
    assert_eq!(config.timeout, Duration::from_secs(5));

    clear_env();
}

#[test]
#[serial]
fn test_api_config_missing_key_is_an_error() {
    clear_env();

    let result = ApiConfig::from_env();
    assert!(result.is_err());

    let message = result.unwrap_err().to_string();
    assert!(message.contains("WEBHOOKS_API_KEY"));
}

#[test]
#[serial]
fn test_api_config_blank_key_is_an_error() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_KEY", "   ");

    assert!(ApiConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_api_config_rejects_invalid_base_url() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_URL", "not a url");
    std::env::set_var("WEBHOOKS_API_KEY", "secret");

    assert!(ApiConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_api_config_rejects_non_http_scheme() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_URL", "ftp://example.com/api");
    std::env::set_var("WEBHOOKS_API_KEY", "secret");

    assert!(ApiConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_api_config_non_numeric_timeout_is_an_error() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_KEY", "secret");
    std::env::set_var("WEBHOOKS_API_TIMEOUT_SECS", "not-a-number");

    let result = ApiConfig::from_env();
    assert!(result.is_err());

    let message = result.unwrap_err().to_string();
    assert!(message.contains("WEBHOOKS_API_TIMEOUT_SECS"));

    clear_env();
}

// =============================================================================
// Refresh Config Tests
// =============================================================================

#[test]
#[serial]
fn test_refresh_config_default_interval() {
    clear_env();

    let config = RefreshConfig::from_env().unwrap();
    assert_eq!(config.interval_secs, 15);
}

#[test]
#[serial]
fn test_refresh_config_custom_interval() {
    clear_env();
    std::env::set_var("REFRESH_INTERVAL_SECS", "60");

    let config = RefreshConfig::from_env().unwrap();
    assert_eq!(config.interval_secs, 60);

    clear_env();
}

#[test]
#[serial]
fn test_refresh_config_zero_interval_is_an_error() {
    clear_env();
    std::env::set_var("REFRESH_INTERVAL_SECS", "0");

    assert!(RefreshConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_refresh_config_non_numeric_interval_is_an_error() {
    clear_env();
    std::env::set_var("REFRESH_INTERVAL_SECS", "soon");

    assert!(RefreshConfig::from_env().is_err());

    clear_env();
}

// =============================================================================
// Target Config Tests
// =============================================================================

#[test]
#[serial]
fn test_target_config_absent_is_none() {
    clear_env();

    let target = TargetConfig::from_env().unwrap();
    assert!(target.is_none());
}

#[test]
#[serial]
fn test_target_config_parses_repo_and_pr() {
    clear_env();
    std::env::set_var("WEBHOOKS_REPO", "octo/demo");
    std::env::set_var("WEBHOOKS_PR", "7");

    let target = TargetConfig::from_env().unwrap().unwrap();
    assert_eq!(target.owner, "octo");
    assert_eq!(target.repo, "demo");
    assert_eq!(target.pull_request, 7);

    clear_env();
}

#[test]
#[serial]
fn test_target_config_rejects_malformed_repo() {
    clear_env();
    std::env::set_var("WEBHOOKS_REPO", "no-slash-here");
    std::env::set_var("WEBHOOKS_PR", "7");

    assert!(TargetConfig::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_target_config_requires_pull_request_number() {
    clear_env();
    std::env::set_var("WEBHOOKS_REPO", "octo/demo");

    assert!(TargetConfig::from_env().is_err());

    clear_env();
}

// =============================================================================
// Full Config Tests
// =============================================================================

#[test]
#[serial]
fn test_full_config_loads_without_target() {
    clear_env();
    std::env::set_var("WEBHOOKS_API_KEY", "secret");

    let config = Config::from_env().unwrap();
    assert!(config.target.is_none());
    assert_eq!(config.refresh.interval_secs, 15);

    clear_env();
}
