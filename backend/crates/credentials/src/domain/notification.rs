//! Notification Sender Contract
//!
//! Outbound delivery is an external collaborator: this core only chooses a
//! template and variables and hands them to whichever transport is wired
//! in (SMTP, SendGrid, an SMS gateway, a test fake). Delivery failures
//! surface as [`NotificationError`] and are translated by the use cases,
//! never swallowed silently.

use std::collections::HashMap;
use thiserror::Error;

/// Message templates this core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Greeting after registration (composed by the caller, not Register)
    Welcome,
    /// Carries a verification code and its validity window
    VerificationCode,
    /// Confirms a completed ownership proof
    VerificationSucceeded,
}

impl MessageTemplate {
    pub const fn id(&self) -> &'static str {
        match self {
            MessageTemplate::Welcome => "welcome",
            MessageTemplate::VerificationCode => "verification_code",
            MessageTemplate::VerificationSucceeded => "verification_succeeded",
        }
    }
}

/// Substitution variables for a template
pub type TemplateVariables = HashMap<String, String>;

/// Delivery failure reported by a sender
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct NotificationError(pub String);

/// Templated message sender (email or SMS)
#[trait_variant::make(TemplatedSender: Send)]
pub trait LocalTemplatedSender {
    /// Render `template` with `variables` and deliver it to `destination`
    ///
    /// Fire-and-forget from the caller's perspective, but failures must be
    /// reported, not dropped.
    async fn send_templated(
        &self,
        destination: &str,
        template: MessageTemplate,
        variables: &TemplateVariables,
    ) -> Result<(), NotificationError>;
}
