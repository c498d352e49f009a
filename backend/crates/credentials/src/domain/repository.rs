//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer; concurrency and durability guarantees are theirs,
//! except where a method documents a stronger contract.

use crate::domain::entity::{account::Account, verification_code::VerificationCode};
use crate::domain::value_object::{
    account_id::AccountId, channel::Channel, code_id::CodeId, email::Email,
};
use crate::error::CredentialResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    async fn insert(&self, account: &Account) -> CredentialResult<()>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>>;

    /// Find account by email (canonical lowercase form)
    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> CredentialResult<()>;

    /// Count active accounts
    async fn count_active(&self) -> CredentialResult<u64>;

    /// Page through active accounts ordered by creation time
    async fn list_active_page(&self, offset: u64, size: u64) -> CredentialResult<Vec<Account>>;
}

/// Verification code repository trait
#[trait_variant::make(VerificationCodeRepository: Send)]
pub trait LocalVerificationCodeRepository {
    /// Persist a new Active code
    async fn insert(&self, code: &VerificationCode) -> CredentialResult<()>;

    /// Most recently created record matching (account, channel, code),
    /// regardless of its state
    async fn find_latest_by_account_and_code(
        &self,
        account_id: &AccountId,
        channel: Channel,
        code: &str,
    ) -> CredentialResult<Option<VerificationCode>>;

    /// Atomically transition a code from unused to used
    ///
    /// Compare-and-swap on the `used` flag: returns `true` iff THIS call
    /// made the transition. Of any number of concurrent calls for the same
    /// code, exactly one sees `true`. A plain read-then-write pair does not
    /// satisfy this contract.
    async fn consume(&self, code_id: &CodeId) -> CredentialResult<bool>;

    /// Force every unused code for (account, channel) into Expired
    ///
    /// Consumed records are untouched. Returns the number of affected rows.
    async fn expire_active_for_account(
        &self,
        account_id: &AccountId,
        channel: Channel,
    ) -> CredentialResult<u64>;
}
