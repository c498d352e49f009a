//! Change Password Use Case
//!
//! Replaces the stored hash after proving knowledge of the current
//! password. The new hash gets a fresh salt; the old one is overwritten,
//! never patched.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::config::CredentialConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{CredentialError, CredentialResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    hasher: PasswordHasher,
}

impl<A> ChangePasswordUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: &CredentialConfig) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(config.hasher),
        }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: ChangePasswordInput,
    ) -> CredentialResult<()> {
        // Cheap structural checks before touching storage
        if input.current_password == input.new_password {
            return Err(CredentialError::NoOpChange);
        }
        if input.new_password != input.confirm_password {
            return Err(CredentialError::ConfirmationMismatch);
        }

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(CredentialError::NotFound)?;

        if !self
            .hasher
            .verify(&input.current_password, &account.password_hash)
        {
            tracing::warn!(
                account_id = %account_id,
                "Password change rejected: current password incorrect"
            );
            return Err(CredentialError::InvalidCredentials);
        }

        account.set_password_hash(self.hasher.hash(&input.new_password));
        self.accounts.update(&account).await?;

        tracing::info!(account_id = %account_id, "Password changed");

        Ok(())
    }
}
