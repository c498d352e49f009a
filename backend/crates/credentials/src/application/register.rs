//! Register Use Case
//!
//! Creates a new account. Token issuance and the welcome notification are
//! composed by the caller, not here.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::config::CredentialConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, email::Email, phone_number::PhoneNumber,
};
use crate::error::{CredentialError, CredentialResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    /// Role code; defaults to `user` when absent
    pub role: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub account_id: AccountId,
}

/// Register use case
pub struct RegisterUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    hasher: PasswordHasher,
}

impl<A> RegisterUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: &CredentialConfig) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(config.hasher),
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> CredentialResult<RegisterOutput> {
        let email = Email::new(&input.email)?;
        let phone = input.phone.map(PhoneNumber::new).transpose()?;
        let role = match &input.role {
            Some(code) => AccountRole::try_from_code(code).ok_or_else(|| {
                CredentialError::MalformedInput(format!("Unknown role: {}", code))
            })?,
            None => AccountRole::default(),
        };

        if self.accounts.exists_by_email(&email).await? {
            return Err(CredentialError::DuplicateEmail);
        }

        // Hash first, write once: cancellation mid-way leaves no trace
        let password_hash = self.hasher.hash(&input.password);

        let account = Account::new(
            email,
            password_hash,
            input.first_name,
            input.last_name,
            phone,
            role,
        );

        self.accounts.insert(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account registered"
        );

        Ok(RegisterOutput {
            account_id: account.account_id,
        })
    }
}
