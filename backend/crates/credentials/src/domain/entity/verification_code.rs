//! Verification Code Entity
//!
//! Single-use, time-bound proof-of-possession record.
//!
//! State machine per code:
//!
//! ```text
//! Active --consume--> Consumed (terminal)
//! Active --time/forced expiry--> Expired (terminal)
//! ```
//!
//! `used` is monotonic: once true, the code is permanently inert. The
//! Active -> Consumed transition is only ever performed by the store's
//! compare-and-swap (`VerificationCodeRepository::consume`), so two racing
//! submissions cannot both win.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;

use crate::domain::value_object::{account_id::AccountId, channel::Channel, code_id::CodeId};

/// Lifecycle state, derived from `used` and `expires_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeState {
    /// Created, not used, not expired
    Active,
    /// Successfully used; terminal
    Consumed,
    /// Past expiry (naturally or forced); terminal
    Expired,
}

/// Verification code entity
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub code_id: CodeId,
    /// Owning account
    pub account_id: AccountId,
    /// Contact channel this code proves possession of
    pub channel: Channel,
    /// The secret code itself (delivered out of band)
    pub code: String,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
    /// Monotonic false -> true
    pub used: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Create a new Active code expiring after `ttl`
    pub fn new(account_id: AccountId, channel: Channel, code: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            code_id: CodeId::new(),
            account_id,
            channel,
            code,
            expires_at: now + ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::zero()),
            used: false,
            created_at: now,
        }
    }

    /// Derive the lifecycle state at `now`
    ///
    /// `used` wins over expiry: a consumed code stays Consumed even after
    /// its (backdated) expiry passes.
    pub fn state(&self, now: DateTime<Utc>) -> CodeState {
        if self.used {
            CodeState::Consumed
        } else if self.expires_at < now {
            CodeState::Expired
        } else {
            CodeState::Active
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at < now
    }

    /// Transition to Consumed
    ///
    /// Only the store may call this, under whatever serialization gives it
    /// compare-and-swap semantics. Expiry is backdated so the record reads
    /// as spent from every angle.
    pub(crate) fn consume(&mut self, now: DateTime<Utc>) {
        self.used = true;
        self.expires_at = now - ChronoDuration::minutes(1);
    }

    /// Force an unused code into Expired (bulk invalidation on contact
    /// change). Consumed codes are left untouched by callers.
    pub(crate) fn force_expire(&mut self, now: DateTime<Utc>) {
        self.expires_at = now - ChronoDuration::days(1);
    }
}
