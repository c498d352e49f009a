//! Send Code Use Case
//!
//! Issues a verification code for a contact channel and hands it to that
//! channel's delivery collaborator. The code is persisted before the send
//! is attempted; a delivery failure surfaces as `NotificationFailed` and
//! a retry simply issues a fresh code.

use std::sync::Arc;

use crate::application::ledger::VerificationLedger;
use crate::domain::notification::{MessageTemplate, TemplateVariables, TemplatedSender};
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{account_id::AccountId, channel::Channel};
use crate::error::{CredentialError, CredentialResult};

/// Send code use case
///
/// `E` delivers to email addresses, `S` to phone numbers.
pub struct SendCodeUseCase<A, C, E, S>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    E: TemplatedSender,
    S: TemplatedSender,
{
    accounts: Arc<A>,
    ledger: VerificationLedger<C>,
    email_sender: Arc<E>,
    sms_sender: Arc<S>,
}

impl<A, C, E, S> SendCodeUseCase<A, C, E, S>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    E: TemplatedSender,
    S: TemplatedSender,
{
    pub fn new(
        accounts: Arc<A>,
        ledger: VerificationLedger<C>,
        email_sender: Arc<E>,
        sms_sender: Arc<S>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            email_sender,
            sms_sender,
        }
    }

    pub async fn execute(&self, account_id: &AccountId, channel: Channel) -> CredentialResult<()> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::NotFound)?;

        let destination = match channel {
            Channel::Email => account.email.as_str().to_string(),
            Channel::Phone => account
                .phone
                .as_ref()
                .ok_or_else(|| {
                    CredentialError::MalformedInput("Account has no phone number".to_string())
                })?
                .as_str()
                .to_string(),
        };

        let issued = self.ledger.issue(account_id, channel).await?;

        let mut variables = TemplateVariables::new();
        variables.insert("first_name".to_string(), account.first_name.clone());
        variables.insert("name".to_string(), account.display_name());
        variables.insert("code".to_string(), issued.code);
        variables.insert(
            "expires_minutes".to_string(),
            (self.ledger.code_ttl().as_secs() / 60).to_string(),
        );

        let delivery = match channel {
            Channel::Email => {
                self.email_sender
                    .send_templated(&destination, MessageTemplate::VerificationCode, &variables)
                    .await
            }
            Channel::Phone => {
                self.sms_sender
                    .send_templated(&destination, MessageTemplate::VerificationCode, &variables)
                    .await
            }
        };

        if let Err(err) = delivery {
            tracing::error!(
                account_id = %account_id,
                channel = %channel,
                error = %err,
                "Verification code delivery failed"
            );
            return Err(err.into());
        }

        tracing::info!(
            account_id = %account_id,
            channel = %channel,
            "Verification code sent"
        );

        Ok(())
    }
}
