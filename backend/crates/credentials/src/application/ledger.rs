//! Verification Ledger
//!
//! Generic single-use code lifecycle: generation -> persistence -> lookup
//! -> consumption. One engine serves both contact channels; the channel
//! tag only partitions storage and selects the delivery collaborator one
//! layer up.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::application::config::CredentialConfig;
use crate::domain::entity::verification_code::VerificationCode;
use crate::domain::repository::VerificationCodeRepository;
use crate::domain::value_object::{account_id::AccountId, channel::Channel};
use crate::error::{CredentialError, CredentialResult};

/// A freshly issued code, returned for out-of-band delivery
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The plaintext code to deliver
    pub code: String,
    /// When it stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Single-use, expiring code engine
pub struct VerificationLedger<C>
where
    C: VerificationCodeRepository,
{
    codes: Arc<C>,
    code_length: usize,
    code_ttl: Duration,
}

impl<C> VerificationLedger<C>
where
    C: VerificationCodeRepository,
{
    pub fn new(codes: Arc<C>, config: &CredentialConfig) -> Self {
        Self {
            codes,
            code_length: config.code_length,
            code_ttl: config.code_ttl,
        }
    }

    pub fn code_ttl(&self) -> Duration {
        self.code_ttl
    }

    /// Issue a new Active code for (account, channel)
    ///
    /// Earlier unused codes stay valid; callers wanting single-active-code
    /// semantics must call [`invalidate_all`](Self::invalidate_all) first.
    pub async fn issue(
        &self,
        account_id: &AccountId,
        channel: Channel,
    ) -> CredentialResult<IssuedCode> {
        let code = platform::crypto::random_numeric_code(self.code_length);
        let record = VerificationCode::new(*account_id, channel, code.clone(), self.code_ttl);

        self.codes.insert(&record).await?;

        tracing::debug!(
            account_id = %account_id,
            channel = %channel,
            expires_at = %record.expires_at,
            "Issued verification code"
        );

        Ok(IssuedCode {
            code,
            expires_at: record.expires_at,
        })
    }

    /// Verify a submitted code, consuming it on success
    ///
    /// Outcomes, evaluated in order against the most recent matching
    /// record: no record -> `CodeInvalid`; already consumed ->
    /// `CodeAlreadyUsed`; past expiry -> `CodeExpired`; otherwise the
    /// store's compare-and-swap decides — the caller that wins it gets
    /// `Ok`, a racing loser gets `CodeAlreadyUsed`. The three failure
    /// outcomes are distinct on purpose: an expired code warrants a
    /// resend, a used one does not.
    pub async fn verify(
        &self,
        account_id: &AccountId,
        channel: Channel,
        submitted: &str,
    ) -> CredentialResult<()> {
        let record = self
            .codes
            .find_latest_by_account_and_code(account_id, channel, submitted)
            .await?
            .ok_or(CredentialError::CodeInvalid)?;

        if record.used {
            return Err(CredentialError::CodeAlreadyUsed);
        }
        if record.is_expired(Utc::now()) {
            return Err(CredentialError::CodeExpired);
        }

        if !self.codes.consume(&record.code_id).await? {
            // Another submission won the race between our read and the swap
            return Err(CredentialError::CodeAlreadyUsed);
        }

        tracing::info!(
            account_id = %account_id,
            channel = %channel,
            "Verification code consumed"
        );

        Ok(())
    }

    /// Force every outstanding Active code for (account, channel) into
    /// Expired
    ///
    /// Called when the underlying contact address changes, so a code
    /// issued for the old address can never be replayed against the new
    /// one. Consumed codes are untouched.
    pub async fn invalidate_all(
        &self,
        account_id: &AccountId,
        channel: Channel,
    ) -> CredentialResult<u64> {
        let expired = self
            .codes
            .expire_active_for_account(account_id, channel)
            .await?;

        if expired > 0 {
            tracing::info!(
                account_id = %account_id,
                channel = %channel,
                expired,
                "Invalidated outstanding verification codes"
            );
        }

        Ok(expired)
    }
}

impl<C> Clone for VerificationLedger<C>
where
    C: VerificationCodeRepository,
{
    fn clone(&self) -> Self {
        Self {
            codes: Arc::clone(&self.codes),
            code_length: self.code_length,
            code_ttl: self.code_ttl,
        }
    }
}
