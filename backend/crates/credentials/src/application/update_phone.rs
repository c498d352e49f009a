//! Update Phone Use Case
//!
//! Sets or replaces the phone number, resets its verified flag, and
//! force-expires outstanding SMS codes.
//!
//! Unlike the email change there is no same-value guard: re-submitting
//! the current number is how a user restarts SMS verification after a
//! failed delivery.

use std::sync::Arc;

use crate::application::ledger::VerificationLedger;
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{
    account_id::AccountId, channel::Channel, phone_number::PhoneNumber,
};
use crate::error::{CredentialError, CredentialResult};

/// Update phone use case
pub struct UpdatePhoneUseCase<A, C>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
{
    accounts: Arc<A>,
    ledger: VerificationLedger<C>,
}

impl<A, C> UpdatePhoneUseCase<A, C>
where
    A: AccountRepository,
    C: VerificationCodeRepository,
{
    pub fn new(accounts: Arc<A>, ledger: VerificationLedger<C>) -> Self {
        Self { accounts, ledger }
    }

    pub async fn execute(&self, account_id: &AccountId, phone: String) -> CredentialResult<()> {
        let phone = PhoneNumber::new(phone)?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::NotFound)?;

        account.update_phone(phone);
        self.accounts.update(&account).await?;

        self.ledger
            .invalidate_all(account_id, Channel::Phone)
            .await?;

        tracing::info!(account_id = %account_id, "Phone updated, re-verification required");

        Ok(())
    }
}
