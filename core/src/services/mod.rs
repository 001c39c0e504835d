//! Business services containing the phone verification logic.

pub mod clock;
pub mod otp;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use otp::{OtpPolicy, OtpRegistry};
pub use verification::{
    MessageDispatcher, RegistrationOutcome, RegistrationStarted, SendCodeResult,
    VerificationServiceConfig, VerificationWorkflow, VerifyCodeResult,
};
