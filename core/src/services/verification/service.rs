//! Verification workflow implementation

use std::sync::Arc;

use ev_shared::config::VerificationConfig;
use ev_shared::phone::{is_valid_msisdn, mask_phone_number, to_msisdn};

use crate::domain::entities::challenge::Challenge;
use crate::domain::entities::pending_registration::PendingRegistration;
use crate::domain::entities::profile::{AccountId, NewProfile};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::AccountStore;
use crate::services::clock::Clock;
use crate::services::otp::{OtpPolicy, OtpRegistry};

use super::config::VerificationServiceConfig;
use super::traits::MessageDispatcher;
use super::types::{RegistrationOutcome, RegistrationStarted, SendCodeResult, VerifyCodeResult};

/// Drives the request/verify cycle of a registration
///
/// Phone numbers are normalized to their gateway form (`255712345678`)
/// before they reach the registry, so every spelling of a number shares one
/// challenge.
pub struct VerificationWorkflow<D, A>
where
    D: MessageDispatcher + ?Sized,
    A: AccountStore + ?Sized,
{
    /// Outstanding challenges
    registry: Arc<OtpRegistry>,
    /// SMS sender
    dispatcher: Arc<D>,
    /// Profile records
    accounts: Arc<A>,
    /// Workflow configuration
    config: VerificationServiceConfig,
}

impl<D, A> VerificationWorkflow<D, A>
where
    D: MessageDispatcher + ?Sized,
    A: AccountStore + ?Sized,
{
    /// Create a new verification workflow
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry owning the challenges
    /// * `dispatcher` - Outbound SMS sender
    /// * `accounts` - Account store receiving the verified flag
    /// * `config` - Workflow configuration
    pub fn new(
        registry: Arc<OtpRegistry>,
        dispatcher: Arc<D>,
        accounts: Arc<A>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            accounts,
            config,
        }
    }

    /// Build the workflow and its registry from application configuration
    pub fn from_config(
        config: &VerificationConfig,
        clock: Arc<dyn Clock>,
        dispatcher: Arc<D>,
        accounts: Arc<A>,
    ) -> Self {
        let registry = Arc::new(OtpRegistry::new(OtpPolicy::from(config), clock));
        Self::new(
            registry,
            dispatcher,
            accounts,
            VerificationServiceConfig::from(config),
        )
    }

    pub fn registry(&self) -> &Arc<OtpRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Normalize a phone number to the registry key / gateway form
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - the number cannot be a valid MSISDN
    pub fn normalize_phone(&self, phone: &str) -> DomainResult<String> {
        let msisdn = to_msisdn(phone, &self.config.default_country_code);
        if !is_valid_msisdn(&msisdn) {
            return Err(DomainError::Validation {
                message: "Invalid phone number format | Muundo wa namba ya simu si sahihi"
                    .to_string(),
            });
        }
        Ok(msisdn)
    }

    /// Issue a code for a phone number and send it by SMS
    ///
    /// A live code that was already delivered, or is being sent by a
    /// concurrent call, is not sent again (`sent == false`). A live code
    /// whose last delivery failed is sent again unchanged, so the caller can
    /// retry a failed delivery without minting a new code.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Delivery details
    /// * `Err(DomainError::Verification(DeliveryFailure))` - The gateway refused
    ///   the message; the code stays valid
    /// * `Err(DomainError::Validation)` - Malformed phone number
    pub async fn request_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let phone = self.normalize_phone(phone)?;
        let challenge = self.registry.issue(&phone);

        if let Some(sent_at) = challenge.last_sent_at {
            tracing::info!(
                phone = %mask_phone_number(&phone),
                event = "otp_send_suppressed",
                "Live verification code already delivered, not sending again"
            );
            return Ok(SendCodeResult {
                phone,
                expires_at: challenge.expires_at,
                message_id: None,
                sent: false,
                next_resend_at: Some(sent_at + self.config.effective_cooldown()),
            });
        }

        self.deliver(&challenge).await
    }

    /// Send the live code again, or a fresh one if none is live
    ///
    /// When the cooldown is enforced, a request within `resend_cooldown` of
    /// the last successful delivery fails with `CooldownActive`. A resend
    /// racing an in-flight delivery of the same code reports `sent == false`.
    pub async fn resend(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let phone = self.normalize_phone(phone)?;

        let challenge = match self
            .registry
            .resend_candidate(&phone, self.config.effective_cooldown())
        {
            Ok(Some(challenge)) => challenge,
            Ok(None) => self.registry.issue(&phone),
            Err(e) => {
                tracing::warn!(
                    phone = %mask_phone_number(&phone),
                    event = "resend_cooldown_active",
                    error_code = e.code(),
                    "Verification code resend requested inside cooldown"
                );
                return Err(e.into());
            }
        };

        self.deliver(&challenge).await
    }

    /// Check user-entered digits and activate the account on success
    ///
    /// Registry failures are reported in the result (`success == false`,
    /// `error` set) for the caller to render. Each call consumes one attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult)` - Verification outcome
    /// * `Err(DomainError::AccountStore)` - Code accepted (and consumed) but the
    ///   account could not be flagged
    /// * `Err(DomainError::Validation)` - Malformed phone number
    pub async fn submit_code(
        &self,
        phone: &str,
        digits: &str,
        account_id: AccountId,
    ) -> DomainResult<VerifyCodeResult> {
        let phone = self.normalize_phone(phone)?;

        if let Err(e) = self.registry.check(&phone, digits) {
            tracing::debug!(
                phone = %mask_phone_number(&phone),
                account_id = %account_id,
                error_code = e.code(),
                "Code submission rejected"
            );
            return Ok(VerifyCodeResult::failed(e));
        }

        self.accounts
            .mark_phone_verified(account_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&phone),
                    account_id = %account_id,
                    error = %e,
                    event = "account_activation_failed",
                    "Phone verified but account could not be updated"
                );
                DomainError::from(e)
            })?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            account_id = %account_id,
            event = "phone_verified",
            "Account phone number verified"
        );

        Ok(VerifyCodeResult::verified())
    }

    /// Provision an unverified account and send its first code
    ///
    /// A delivery failure does not undo the account: the handle is returned
    /// with `delivery_error` set so the caller can `resend`.
    pub async fn begin_registration(&self, profile: NewProfile) -> DomainResult<RegistrationStarted> {
        let phone = self.normalize_phone(&profile.phone)?;

        let created = self.accounts.create_profile(profile).await?;
        let pending = PendingRegistration::new(created.id, phone, self.registry.clock().now());

        tracing::info!(
            phone = %mask_phone_number(&pending.phone),
            account_id = %pending.account_id,
            user_type = ?created.user_type,
            event = "registration_started",
            "Unverified account provisioned"
        );

        match self.request_code(&pending.phone).await {
            Ok(send_result) => Ok(RegistrationStarted {
                pending,
                send_result: Some(send_result),
                delivery_error: None,
            }),
            Err(DomainError::Verification(e @ VerificationError::DeliveryFailure { .. })) => {
                Ok(RegistrationStarted {
                    pending,
                    send_result: None,
                    delivery_error: Some(e),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Finish a registration with the digits the user entered
    ///
    /// On success the handle is consumed; otherwise it is handed back inside
    /// [`RegistrationOutcome::Retry`].
    pub async fn complete_registration(
        &self,
        pending: PendingRegistration,
        digits: &str,
    ) -> DomainResult<RegistrationOutcome> {
        let result = self
            .submit_code(&pending.phone, digits, pending.account_id)
            .await?;

        if result.success {
            Ok(RegistrationOutcome::Verified {
                account_id: pending.account_id,
            })
        } else {
            Ok(RegistrationOutcome::Retry { pending, result })
        }
    }

    async fn deliver(&self, challenge: &Challenge) -> DomainResult<SendCodeResult> {
        if !self.registry.claim_delivery(&challenge.phone, &challenge.code) {
            return Ok(SendCodeResult {
                phone: challenge.phone.clone(),
                expires_at: challenge.expires_at,
                message_id: None,
                sent: false,
                next_resend_at: None,
            });
        }

        // Hands the claim back if this future is dropped mid-send
        let claim = ClaimGuard {
            registry: &self.registry,
            challenge,
            settled: false,
        };

        let text = self.config.render_message(&challenge.code);

        match self.dispatcher.send(&challenge.phone, &text).await {
            Ok(message_id) => {
                claim.settle();
                self.registry.mark_delivered(&challenge.phone, &challenge.code);
                let now = self.registry.clock().now();

                tracing::info!(
                    phone = %mask_phone_number(&challenge.phone),
                    message_id = %message_id,
                    event = "otp_sent",
                    "Verification code sent"
                );

                Ok(SendCodeResult {
                    phone: challenge.phone.clone(),
                    expires_at: challenge.expires_at,
                    message_id: Some(message_id),
                    sent: true,
                    next_resend_at: Some(now + self.config.effective_cooldown()),
                })
            }
            Err(reason) => {
                claim.settle();
                self.registry.mark_undelivered(&challenge.phone, &challenge.code);

                tracing::error!(
                    phone = %mask_phone_number(&challenge.phone),
                    error = %reason,
                    event = "otp_send_failed",
                    "Failed to send verification code"
                );

                Err(VerificationError::DeliveryFailure { reason }.into())
            }
        }
    }
}

struct ClaimGuard<'a> {
    registry: &'a OtpRegistry,
    challenge: &'a Challenge,
    settled: bool,
}

impl ClaimGuard<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for ClaimGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.registry
                .release_delivery(&self.challenge.phone, &self.challenge.code);
        }
    }
}
