/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for wex-adapter tests

use wex_adapter::{ClientConfig, Credentials, WexClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "HKG82W66-TEST-KEY";
pub const TEST_SECRET: &str = "0123456789abcdef";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, without credentials
pub fn public_client(server: &MockServer) -> WexClient {
    WexClient::with_config_and_base_urls(
        ClientConfig::default(),
        &format!("{}/api/3", server.uri()),
        &format!("{}/tapi", server.uri()),
    )
    .expect("client init")
}

/// Client pointed at the mock server with test credentials
#[allow(dead_code)]
pub fn authenticated_client(server: &MockServer) -> WexClient {
    public_client(server).with_credentials(test_credentials())
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET)
}

/// `nonce` value of a form-encoded trade API body
#[allow(dead_code)]
pub fn nonce_of(body: &[u8]) -> u64 {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == "nonce")
        .and_then(|(_, value)| value.parse().ok())
        .expect("body carries a nonce")
}

/// Successful trade API envelope around `payload`
#[allow(dead_code)]
pub fn ok_envelope(payload: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "success": 1, "return": payload })
}
