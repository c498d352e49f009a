//! Verify Code Use Case
//!
//! Consumes a submitted verification code and, on success, marks the
//! channel as verified on the account. The ledger's typed outcomes
//! (invalid / already used / expired) pass through untouched — each
//! carries a different remediation for the user.

use std::sync::Arc;

use crate::application::ledger::VerificationLedger;
use crate::domain::notification::{MessageTemplate, TemplateVariables, TemplatedSender};
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{account_id::AccountId, channel::Channel};
use crate::error::{CredentialError, CredentialResult};

/// Verify code use case
pub struct VerifyCodeUseCase<A, C, E>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    E: TemplatedSender,
{
    accounts: Arc<A>,
    ledger: VerificationLedger<C>,
    email_sender: Arc<E>,
}

impl<A, C, E> VerifyCodeUseCase<A, C, E>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
    E: TemplatedSender,
{
    pub fn new(accounts: Arc<A>, ledger: VerificationLedger<C>, email_sender: Arc<E>) -> Self {
        Self {
            accounts,
            ledger,
            email_sender,
        }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        channel: Channel,
        submitted_code: &str,
    ) -> CredentialResult<()> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::NotFound)?;

        self.ledger.verify(account_id, channel, submitted_code).await?;

        match channel {
            Channel::Email => account.mark_email_verified(),
            Channel::Phone => account.mark_phone_verified(),
        }
        self.accounts.update(&account).await?;

        tracing::info!(
            account_id = %account_id,
            channel = %channel,
            "Contact channel verified"
        );

        // The proof is committed; the confirmation email is best-effort
        if channel == Channel::Email {
            let mut variables = TemplateVariables::new();
            variables.insert("name".to_string(), account.display_name());

            if let Err(err) = self
                .email_sender
                .send_templated(
                    account.email.as_str(),
                    MessageTemplate::VerificationSucceeded,
                    &variables,
                )
                .await
            {
                tracing::warn!(
                    account_id = %account_id,
                    error = %err,
                    "Failed to send verification confirmation"
                );
            }
        }

        Ok(())
    }
}
