//! Integration tests wiring the verification workflow to infrastructure collaborators

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ev_core::domain::entities::{NewProfile, UserType};
use ev_core::errors::{DomainError, VerificationError};
use ev_core::services::verification::RegistrationOutcome;
use ev_infra::build_verification_workflow;
use ev_shared::config::{AppConfig, SmsConfig};

fn agregator() -> NewProfile {
    NewProfile::new(
        UserType::Agregator,
        "Mollel Livestock Traders",
        "mollel@example.com",
        "0622 123 456",
    )
}

#[tokio::test]
async fn test_development_wiring_round_trip() -> anyhow::Result<()> {
    let workflow = build_verification_workflow(&AppConfig::development())?;

    let started = workflow.begin_registration(agregator()).await?;
    assert!(started.delivery_error.is_none());
    assert_eq!(started.pending.phone, "255622123456");

    let code = workflow
        .registry()
        .peek(&started.pending.phone)
        .map(|c| c.code)
        .ok_or_else(|| anyhow::anyhow!("no live code"))?;

    let outcome = workflow.complete_registration(started.pending, &code).await?;
    assert!(matches!(outcome, RegistrationOutcome::Verified { .. }));
    Ok(())
}

#[tokio::test]
async fn test_mambo_gateway_wiring() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "message_id": 77 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = AppConfig::development();
    config.sms = SmsConfig {
        base_url: server.uri(),
        api_token: "test-token".to_string(),
        ..SmsConfig::default()
    };
    let workflow = build_verification_workflow(&config)?;

    let sent = workflow.request_code("+255622123456").await?;
    assert_eq!(sent.message_id.as_deref(), Some("77"));

    let requests = server
        .received_requests()
        .await
        .ok_or_else(|| anyhow::anyhow!("request recording disabled"))?;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    let code = workflow.registry().peek("255622123456").map(|c| c.code);

    assert_eq!(body["mobile"], "255622123456");
    assert_eq!(body["sender_id"], "E VET");
    assert_eq!(
        body["message"].as_str().map(str::to_string),
        code.map(|c| format!(
            "Nambari yako ya uthibitisho ni: {}. Tafadhali tumia nambari hii kujisajili kwenye E-VET.",
            c
        ))
    );
    Ok(())
}

#[tokio::test]
async fn test_mambo_rejection_surfaces_as_delivery_failure() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Sender ID not approved"
        })))
        .mount(&server)
        .await;

    let mut config = AppConfig::development();
    config.sms = SmsConfig {
        base_url: server.uri(),
        api_token: "test-token".to_string(),
        ..SmsConfig::default()
    };
    let workflow = build_verification_workflow(&config)?;

    match workflow.request_code("0622123456").await {
        Err(DomainError::Verification(VerificationError::DeliveryFailure { reason })) => {
            assert!(reason.contains("Sender ID not approved"));
        }
        other => anyhow::bail!("expected delivery failure, got {:?}", other),
    }

    // The issued code survives for a later retry
    assert!(workflow.registry().peek("255622123456").is_some());
    Ok(())
}
