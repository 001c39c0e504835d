//! Unit tests for the Mambo SMS client

use ev_shared::config::SmsConfig;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::sms::{MamboSmsService, SmsService};
use crate::InfrastructureError;

fn service_for(server: &MockServer) -> MamboSmsService {
    let config = SmsConfig {
        base_url: format!("{}/api/v1/", server.uri()),
        api_token: "test-token".to_string(),
        ..SmsConfig::default()
    };
    MamboSmsService::new(&config).unwrap()
}

#[tokio::test]
async fn test_send_posts_expected_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sms/single"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "sender_id": "E VET",
            "message": "Nambari yako ya uthibitisho ni: 482913.",
            "mobile": "255712345678"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "message_id": "mb-1001" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let message_id = service
        .send_sms("+255712345678", "Nambari yako ya uthibitisho ni: 482913.")
        .await
        .unwrap();

    assert_eq!(message_id, "mb-1001");
}

#[tokio::test]
async fn test_success_without_id_gets_generated_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sms/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let message_id = service_for(&server)
        .send_sms("255712345678", "hello")
        .await
        .unwrap();
    assert!(message_id.starts_with("mambo_"));
}

#[tokio::test]
async fn test_success_false_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sms/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Insufficient balance"
        })))
        .mount(&server)
        .await;

    let result = service_for(&server).send_sms("255712345678", "hello").await;
    match result {
        Err(InfrastructureError::Sms(reason)) => assert_eq!(reason, "Insufficient balance"),
        other => panic!("Expected Sms error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sms/single"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated"))
        .mount(&server)
        .await;

    let result = service_for(&server).send_sms("255712345678", "hello").await;
    match result {
        Err(InfrastructureError::Sms(reason)) => {
            assert!(reason.contains("401"));
            assert!(reason.contains("Unauthenticated"));
        }
        other => panic!("Expected Sms error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_number_never_reaches_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let result = service_for(&server).send_sms("0712", "hello").await;
    assert!(matches!(result, Err(InfrastructureError::Sms(_))));
}

#[test]
fn test_endpoint_joins_base_url() {
    let config = SmsConfig {
        api_token: "t".to_string(),
        ..SmsConfig::default()
    };
    let service = MamboSmsService::new(&config).unwrap();
    assert_eq!(service.endpoint(), "https://mambosms.co.tz/api/v1/sms/single");
}
