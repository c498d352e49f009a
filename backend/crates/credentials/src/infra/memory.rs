//! In-Memory Repository Implementations
//!
//! Mutex-serialized stores backing the test suite and local development.
//! Because every operation runs under a single lock, `consume` gets its
//! compare-and-swap semantics for free: the check and the write are one
//! critical section.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::entity::{account::Account, verification_code::VerificationCode};
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{
    account_id::AccountId, channel::Channel, code_id::CodeId, email::Email,
};
use crate::error::{CredentialError, CredentialResult};

// ============================================================================
// Accounts
// ============================================================================

/// In-memory account store
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> CredentialResult<()> {
        let mut accounts = self.accounts.lock().expect("account store lock poisoned");

        // Mirror the unique constraints a relational store would enforce
        if accounts.contains_key(account.account_id.as_uuid()) {
            return Err(CredentialError::Internal(
                "unique constraint violation: accounts.account_id".to_string(),
            ));
        }
        if accounts.values().any(|a| a.email == account.email) {
            return Err(CredentialError::Internal(
                "unique constraint violation: accounts.email".to_string(),
            ));
        }

        accounts.insert(account.account_id.into_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>> {
        let accounts = self.accounts.lock().expect("account store lock poisoned");
        Ok(accounts.get(account_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>> {
        let accounts = self.accounts.lock().expect("account store lock poisoned");
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool> {
        let accounts = self.accounts.lock().expect("account store lock poisoned");
        Ok(accounts.values().any(|a| &a.email == email))
    }

    async fn update(&self, account: &Account) -> CredentialResult<()> {
        let mut accounts = self.accounts.lock().expect("account store lock poisoned");

        if !accounts.contains_key(account.account_id.as_uuid()) {
            return Err(CredentialError::NotFound);
        }

        accounts.insert(account.account_id.into_uuid(), account.clone());
        Ok(())
    }

    async fn count_active(&self) -> CredentialResult<u64> {
        let accounts = self.accounts.lock().expect("account store lock poisoned");
        Ok(accounts.values().filter(|a| a.is_active).count() as u64)
    }

    async fn list_active_page(&self, offset: u64, size: u64) -> CredentialResult<Vec<Account>> {
        let accounts = self.accounts.lock().expect("account store lock poisoned");

        let mut active: Vec<Account> = accounts.values().filter(|a| a.is_active).cloned().collect();
        active.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.account_id.as_uuid().cmp(b.account_id.as_uuid()))
        });

        Ok(active
            .into_iter()
            .skip(offset as usize)
            .take(size as usize)
            .collect())
    }
}

// ============================================================================
// Verification codes
// ============================================================================

/// In-memory verification code store
///
/// Records are kept in insertion order, which doubles as the recency
/// order `find_latest_by_account_and_code` needs.
#[derive(Default)]
pub struct InMemoryVerificationCodeRepository {
    codes: Mutex<Vec<VerificationCode>>,
}

impl InMemoryVerificationCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn insert(&self, code: &VerificationCode) -> CredentialResult<()> {
        let mut codes = self.codes.lock().expect("code store lock poisoned");
        codes.push(code.clone());
        Ok(())
    }

    async fn find_latest_by_account_and_code(
        &self,
        account_id: &AccountId,
        channel: Channel,
        code: &str,
    ) -> CredentialResult<Option<VerificationCode>> {
        let codes = self.codes.lock().expect("code store lock poisoned");
        Ok(codes
            .iter()
            .rev()
            .find(|c| &c.account_id == account_id && c.channel == channel && c.code == code)
            .cloned())
    }

    async fn consume(&self, code_id: &CodeId) -> CredentialResult<bool> {
        let mut codes = self.codes.lock().expect("code store lock poisoned");

        match codes.iter_mut().find(|c| &c.code_id == code_id) {
            Some(record) if !record.used => {
                record.consume(Utc::now());
                Ok(true)
            }
            Some(_) => Ok(false), // lost the race
            None => Ok(false),
        }
    }

    async fn expire_active_for_account(
        &self,
        account_id: &AccountId,
        channel: Channel,
    ) -> CredentialResult<u64> {
        let mut codes = self.codes.lock().expect("code store lock poisoned");
        let now = Utc::now();

        let mut affected = 0u64;
        for record in codes
            .iter_mut()
            .filter(|c| &c.account_id == account_id && c.channel == channel && !c.used)
        {
            record.force_expire(now);
            affected += 1;
        }

        Ok(affected)
    }
}
