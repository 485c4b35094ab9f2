//! Contract tests for `ViesClient` against the VIES REST interface.
//!
//! ## Endpoint Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/check-vat-number` | `check_*` |

use std::time::Duration;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vatrc_checkout::{ViesClient, ViesError};
use vatrc_checkout::config::ViesConfig;
use vatrc_core::Vatin;

fn test_client(mock_server: &MockServer) -> ViesClient {
    let config = ViesConfig {
        endpoint: mock_server.uri(),
        timeout: Duration::from_secs(5),
    };
    ViesClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn check_sends_prefix_and_number_and_returns_valid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .and(body_json(serde_json::json!({
            "countryCode": "DE",
            "vatNumber": "123456789"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "countryCode": "DE",
            "vatNumber": "123456789",
            "requestDate": "2026-08-30T10:15:00+02:00",
            "valid": true,
            "name": "ACME GmbH",
            "address": "Beispielstr. 1, 10115 Berlin"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("DE123456789").expect("valid fixture");

    let check = client.check(&vatin).await.expect("check should succeed");
    assert!(check.valid);
    assert_eq!(check.name.as_deref(), Some("ACME GmbH"));
    assert!(check.request_date.is_some());
}

#[tokio::test]
async fn check_sends_el_prefix_untranslated() {
    let mock_server = MockServer::start().await;

    // VIES registers Greece as EL, not GR
    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .and(body_json(serde_json::json!({
            "countryCode": "EL",
            "vatNumber": "123456789"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valid": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("EL123456789").expect("valid fixture");

    let check = client.check(&vatin).await.expect("check should succeed");
    assert!(check.valid);
}

#[tokio::test]
async fn check_returns_invalid_for_unregistered_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valid": false,
            "userError": "INVALID"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("DE123456789").expect("valid fixture");

    let check = client.check(&vatin).await.expect("check should succeed");
    assert!(!check.valid);
}

#[tokio::test]
async fn check_hides_withheld_trader_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valid": true,
            "name": "---",
            "address": "---"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("IT12345678901").expect("valid fixture");

    let check = client.check(&vatin).await.expect("check should succeed");
    assert!(check.valid);
    assert_eq!(check.name, None);
    assert_eq!(check.address, None);
}

#[tokio::test]
async fn check_maps_member_state_outage_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "valid": false,
            "userError": "MS_UNAVAILABLE"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("FR40303265045").expect("valid fixture");

    let result = client.check(&vatin).await;
    assert!(matches!(result, Err(ViesError::Unavailable(_))));
}

#[tokio::test]
async fn check_maps_server_error_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("DE123456789").expect("valid fixture");

    let result = client.check(&vatin).await;
    match result {
        Err(ViesError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn check_maps_garbage_body_to_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/check-vat-number"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let vatin = Vatin::parse("DE123456789").expect("valid fixture");

    let result = client.check(&vatin).await;
    assert!(matches!(result, Err(ViesError::Parse(_))));
}
