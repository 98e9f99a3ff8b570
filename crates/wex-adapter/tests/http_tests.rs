/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::sync::Arc;

use common::{authenticated_client, nonce_of, ok_envelope, public_client, setup_mock_server};
use wex_adapter::{ClientConfig, Credentials, WexClient, WexError};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn account_payload() -> serde_json::Value {
    serde_json::json!({
        "funds": {"usd": 10, "btc": 0.5},
        "rights": {"info": 1, "trade": 1, "withdraw": 0},
        "transaction_count": 0,
        "open_orders": 0,
        "server_time": 1371125234
    })
}

#[test]
fn test_client_creation() {
    let _client = assert_ok!(WexClient::new());
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig::default();
    let _client = assert_ok!(WexClient::with_config(config));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let err = WexClient::with_config_and_base_urls(ClientConfig::default(), "not a url", "also not")
        .unwrap_err();
    assert!(matches!(err, WexError::UrlParse(_)));
}

#[test]
fn test_client_credentials_roundtrip() {
    let mut client = assert_ok!(WexClient::new());
    assert!(client.credentials().is_none());

    client.set_credentials(Credentials::new("key", "secret"));
    let stored = client.credentials().expect("credentials should be set");

    assert_eq!(stored.api_key(), "key");
    assert_eq!(stored.secret(), b"secret");
}

#[tokio::test]
async fn test_info_with_empty_credentials() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/3/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "server_time": 1370814956,
            "pairs": {
                "btc_usd": {
                    "decimal_places": 3, "min_price": 0.1, "max_price": 400,
                    "min_amount": 0.01, "hidden": 0, "fee": 0.2
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server).with_credentials(Credentials::new("", ""));
    let info = assert_ok!(client.info().await);
    assert!(info.pairs.contains_key("btc_usd"));
}

#[tokio::test]
async fn test_private_call_without_credentials_sends_nothing() {
    let server = setup_mock_server().await;
    let client = public_client(&server);

    let err = client.active_orders(Some("btc_usd")).await.unwrap_err();
    assert!(matches!(err, WexError::MissingCredentials));

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_nonce_strictly_increases_across_calls() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/tapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(account_payload())))
        .expect(5)
        .mount(&server)
        .await;

    let client = authenticated_client(&server);
    for _ in 0..5 {
        assert_ok!(client.get_info().await);
    }

    let received = server.received_requests().await.expect("request recording enabled");
    let nonces: Vec<u64> = received.iter().map(|request| nonce_of(&request.body)).collect();
    assert_eq!(nonces.len(), 5);
    assert!(nonces.windows(2).all(|pair| pair[1] > pair[0]), "{nonces:?}");
    assert_eq!(client.last_nonce().await, nonces[4]);
}

#[tokio::test]
async fn test_concurrent_calls_serialize_nonces() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/tapi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(account_payload()))
                .set_delay(std::time::Duration::from_millis(20)),
        )
        .expect(8)
        .mount(&server)
        .await;

    let client = Arc::new(authenticated_client(&server));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move { client.get_info().await }));
    }
    for handle in handles {
        assert_ok!(handle.await.expect("task panicked"));
    }

    // Requests arrive one at a time, each with a larger nonce than the last.
    let received = server.received_requests().await.expect("request recording enabled");
    let nonces: Vec<u64> = received.iter().map(|request| nonce_of(&request.body)).collect();
    assert_eq!(nonces.len(), 8);
    assert!(nonces.windows(2).all(|pair| pair[1] > pair[0]), "{nonces:?}");
}

#[tokio::test]
async fn test_malformed_api_key_is_auth_error() {
    let server = setup_mock_server().await;
    let client = public_client(&server).with_credentials(Credentials::new("key\r\nX-Evil: 1", "secret"));

    let err = client.get_info().await.unwrap_err();
    assert!(err.is_auth_error(), "unexpected error: {err:?}");

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_invalid_api_key_response_is_auth_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/tapi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 0,
            "error": "invalid api key",
        })))
        .mount(&server)
        .await;

    let err = authenticated_client(&server).get_info().await.unwrap_err();
    assert!(matches!(err, WexError::Authentication { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let server = setup_mock_server().await;
    let client = public_client(&server);
    drop(server);

    let err = client.info().await.unwrap_err();
    assert!(err.is_transport_error(), "unexpected error: {err:?}");
}
