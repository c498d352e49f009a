//! Login Use Case
//!
//! Authenticates by email + password and mints an access token.
//!
//! Every failure — unknown email, wrong password, deactivated account —
//! answers with the same `InvalidCredentials` outcome, so login cannot be
//! used to probe which emails are registered or which accounts are
//! disabled.

use std::sync::Arc;

use platform::password::PasswordHasher;
use platform::token::TokenIssuer;

use crate::application::config::CredentialConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, account_role::AccountRole, email::Email};
use crate::error::{CredentialError, CredentialResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Non-sensitive account summary returned on success
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role: AccountRole,
    pub email_verified: bool,
    pub phone_verified: bool,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            email: account.email.as_str().to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
            email_verified: account.email_verified,
            phone_verified: account.phone_verified,
        }
    }
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub account: AccountSummary,
    /// Signed bearer token; delivery (cookie vs header) is the caller's
    /// concern
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, tokens: Arc<TokenIssuer>, config: &CredentialConfig) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher::new(config.hasher),
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> CredentialResult<LoginOutput> {
        // An address that cannot parse cannot be registered
        let email =
            Email::new(&input.email).map_err(|_| CredentialError::InvalidCredentials)?;

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        if !self.hasher.verify(&input.password, &account.password_hash) {
            tracing::warn!(account_id = %account.account_id, "Login attempt with wrong password");
            return Err(CredentialError::InvalidCredentials);
        }

        if !account.can_login() {
            // Same outcome as a wrong password: do not leak active state
            tracing::warn!(account_id = %account.account_id, "Login attempt on inactive account");
            return Err(CredentialError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(&account.account_id.to_string(), account.role.code())
            .map_err(|e| CredentialError::Internal(e.to_string()))?;

        tracing::info!(account_id = %account.account_id, "Account signed in");

        Ok(LoginOutput {
            account: AccountSummary::from(&account),
            access_token,
        })
    }
}
