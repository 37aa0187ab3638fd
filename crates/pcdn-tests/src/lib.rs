//! Integration tests for the PCDN client.
//!
//! Most tests run against a local `wiremock` server. The live tests in
//! `tests/live.rs` are ignored by default and read their credentials from
//! `PCDN_CP`, `PCDN_SECKEY`, `PCDN_HOST` and `PCDN_TOKEN`.

use pcdn_client::{ClientConfig, Credentials, PcdnClient};
use wiremock::MockServer;

/// Offset used by mock-server tests so log-file times are deterministic (UTC+8).
pub const TEST_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Credentials matching the published signing example.
#[must_use]
pub fn test_credentials() -> Credentials {
    Credentials::new("cp", "testSeckey")
}

/// Creates a client pointed at the given mock server.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_mock_client(server: &MockServer) -> Result<PcdnClient, pcdn_client::Error> {
    PcdnClient::new(ClientConfig {
        utc_offset_secs: Some(TEST_UTC_OFFSET_SECS),
        ..ClientConfig::new(server.uri(), test_credentials())
    })
}

/// Creates a client for the live vendor API from environment variables.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_live_client() -> Result<PcdnClient, pcdn_client::Error> {
    let credentials = Credentials::new(env_or_empty("PCDN_CP"), env_or_empty("PCDN_SECKEY"));
    PcdnClient::with_credentials(&env_or_empty("PCDN_HOST"), credentials)
}

/// Gets the access token for live tests.
#[must_use]
pub fn live_token() -> String {
    env_or_empty("PCDN_TOKEN")
}

/// Generates `count` distinct test URLs.
#[must_use]
pub fn test_urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("http://www.test.com/{}", i))
        .collect()
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}
