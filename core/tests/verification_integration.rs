//! Integration tests for the registration verification flow

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use ev_core::domain::entities::{NewProfile, UserType};
    use ev_core::errors::{DomainError, VerificationError};
    use ev_core::repositories::{AccountStore, InMemoryAccountStore};
    use ev_core::services::clock::{Clock, ManualClock};
    use ev_core::services::verification::{
        MessageDispatcher, RegistrationOutcome, VerificationWorkflow,
    };
    use ev_shared::config::VerificationConfig;

    // Gateway double keeping the outbox
    #[derive(Default)]
    struct Outbox {
        messages: Mutex<Vec<(String, String)>>,
        down: Mutex<bool>,
    }

    impl Outbox {
        fn last_code(&self) -> String {
            let messages = self.messages.lock().unwrap();
            let (_, text) = messages.last().expect("no message sent");
            text.split(|c: char| !c.is_ascii_digit())
                .find(|part| part.len() == 6)
                .expect("no code in message")
                .to_string()
        }

        fn count(&self) -> usize {
            self.messages.lock().unwrap().len()
        }

        fn set_down(&self, down: bool) {
            *self.down.lock().unwrap() = down;
        }
    }

    #[async_trait]
    impl MessageDispatcher for Outbox {
        async fn send(&self, to: &str, text: &str) -> Result<String, String> {
            if *self.down.lock().unwrap() {
                return Err("gateway unreachable".to_string());
            }
            let mut messages = self.messages.lock().unwrap();
            messages.push((to.to_string(), text.to_string()));
            Ok(format!("msg_{}", messages.len()))
        }
    }

    type Workflow = VerificationWorkflow<dyn MessageDispatcher, dyn AccountStore>;

    fn setup() -> (Workflow, Arc<Outbox>, Arc<InMemoryAccountStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
        ));
        let outbox = Arc::new(Outbox::default());
        let accounts = Arc::new(InMemoryAccountStore::new());

        let dispatcher: Arc<dyn MessageDispatcher> = outbox.clone();
        let store: Arc<dyn AccountStore> = accounts.clone();
        let workflow = VerificationWorkflow::from_config(
            &VerificationConfig::default(),
            clock.clone(),
            dispatcher,
            store,
        );

        (workflow, outbox, accounts, clock)
    }

    fn vet_profile() -> NewProfile {
        NewProfile::new(
            UserType::Daktari,
            "Dkt. Amina Mushi",
            "amina@example.com",
            "+255 754 000 111",
        )
        .with_description("Mifugo wakubwa na wadogo")
    }

    #[tokio::test]
    async fn test_full_registration_flow() {
        let (workflow, outbox, accounts, _clock) = setup();

        let started = workflow.begin_registration(vet_profile()).await.unwrap();
        assert_eq!(started.pending.phone, "255754000111");
        assert_eq!(outbox.count(), 1);

        let account_id = started.pending.account_id;
        let outcome = workflow
            .complete_registration(started.pending, &outbox.last_code())
            .await
            .unwrap();

        match outcome {
            RegistrationOutcome::Verified { account_id: verified } => {
                assert_eq!(verified, account_id)
            }
            other => panic!("Expected verified outcome, got {:?}", other),
        }

        let profile = accounts.find_profile(account_id).await.unwrap().unwrap();
        assert!(profile.phone_verified);
        assert!(workflow.registry().is_empty());
    }

    #[tokio::test]
    async fn test_expired_code_requires_new_request() {
        let (workflow, outbox, accounts, clock) = setup();

        let started = workflow.begin_registration(vet_profile()).await.unwrap();
        let stale = outbox.last_code();
        clock.advance(Duration::minutes(5) + Duration::seconds(1));

        let outcome = workflow
            .complete_registration(started.pending, &stale)
            .await
            .unwrap();
        let pending = match outcome {
            RegistrationOutcome::Retry { pending, result } => {
                assert_eq!(result.error, Some(VerificationError::Expired));
                pending
            }
            other => panic!("Expected retry, got {:?}", other),
        };

        // A fresh code is issued and delivered
        let sent = workflow.request_code(&pending.phone).await.unwrap();
        assert!(sent.sent);
        assert_eq!(sent.expires_at, clock.now() + Duration::minutes(5));

        let fresh = outbox.last_code();
        let account_id = pending.account_id;
        let outcome = workflow.complete_registration(pending, &fresh).await.unwrap();
        assert!(outcome.is_verified());
        assert!(accounts
            .find_profile(account_id)
            .await
            .unwrap()
            .unwrap()
            .phone_verified);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_then_resend() {
        let (workflow, outbox, _accounts, clock) = setup();

        let started = workflow.begin_registration(vet_profile()).await.unwrap();
        let mut pending = started.pending;

        for expected in [
            VerificationError::CodeMismatch { remaining_attempts: 2 },
            VerificationError::CodeMismatch { remaining_attempts: 1 },
            VerificationError::TooManyAttempts,
        ] {
            pending = match workflow.complete_registration(pending, "000000").await.unwrap() {
                RegistrationOutcome::Retry { pending, result } => {
                    assert_eq!(result.error, Some(expected));
                    pending
                }
                other => panic!("Expected retry, got {:?}", other),
            };
        }

        // No live code after exhaustion, so a fresh one goes out at once
        let sent = workflow.resend(&pending.phone).await.unwrap();
        assert!(sent.sent);
        assert_eq!(outbox.count(), 2);

        // The fresh code has its own cooldown
        clock.advance(Duration::seconds(30));
        let err = workflow.resend(&pending.phone).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Verification(VerificationError::CooldownActive {
                retry_after_seconds: 30
            })
        );

        let outcome = workflow
            .complete_registration(pending, &outbox.last_code())
            .await
            .unwrap();
        assert!(outcome.is_verified());
    }

    #[tokio::test]
    async fn test_gateway_outage_does_not_lose_code() {
        let (workflow, outbox, _accounts, _clock) = setup();
        outbox.set_down(true);

        let started = workflow.begin_registration(vet_profile()).await.unwrap();
        let error = started.delivery_error.expect("delivery should have failed");
        assert_eq!(error.code(), "SMS_DELIVERY_FAILED");
        assert!(!error.requires_new_code());

        let issued = workflow.registry().peek(&started.pending.phone).unwrap();

        outbox.set_down(false);
        // Failed deliveries do not start the cooldown
        let sent = workflow.resend(&started.pending.phone).await.unwrap();
        assert!(sent.sent);
        assert_eq!(outbox.last_code(), issued.code);
    }
}
