//! Change Email Use Case
//!
//! Swaps the account's email, resets its verified flag, and force-expires
//! every outstanding email verification code so nothing issued for the
//! old address can be replayed against the new one.

use std::sync::Arc;

use crate::application::ledger::VerificationLedger;
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{account_id::AccountId, channel::Channel, email::Email};
use crate::error::{CredentialError, CredentialResult};

/// Change email input
pub struct ChangeEmailInput {
    pub new_email: String,
    pub confirm_email: String,
}

/// Change email use case
pub struct ChangeEmailUseCase<A, C>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
{
    accounts: Arc<A>,
    ledger: VerificationLedger<C>,
}

impl<A, C> ChangeEmailUseCase<A, C>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
{
    pub fn new(accounts: Arc<A>, ledger: VerificationLedger<C>) -> Self {
        Self { accounts, ledger }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: ChangeEmailInput,
    ) -> CredentialResult<()> {
        if input.new_email != input.confirm_email {
            return Err(CredentialError::ConfirmationMismatch);
        }

        let new_email = Email::new(&input.new_email)?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::NotFound)?;

        // Self-equal is a no-op, not a conflict; check it before the
        // uniqueness probe so the account's own row does not trip it
        if account.email == new_email {
            return Err(CredentialError::NoOpChange);
        }

        if self.accounts.exists_by_email(&new_email).await? {
            return Err(CredentialError::DuplicateEmail);
        }

        account.change_email(new_email);
        self.accounts.update(&account).await?;

        self.ledger
            .invalidate_all(account_id, Channel::Email)
            .await?;

        tracing::info!(account_id = %account_id, "Email changed, re-verification required");

        Ok(())
    }
}
