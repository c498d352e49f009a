//! Application Configuration
//!
//! Immutable process-wide configuration, built once at startup and passed
//! by reference into each use case. Nothing here is mutated at runtime.

use std::time::Duration;

use platform::password::PasswordHasherOptions;
use platform::token::TokenSettings;

/// Credential application configuration
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// Key-derivation parameters for password hashing
    pub hasher: PasswordHasherOptions,
    /// Access-token signing settings
    pub token: TokenSettings,
    /// Verification code length in digits
    pub code_length: usize,
    /// Verification code validity window (10 minutes)
    pub code_ttl: Duration,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            hasher: PasswordHasherOptions::default(),
            token: TokenSettings::default(),
            code_length: 6,
            code_ttl: Duration::from_secs(10 * 60),
        }
    }
}

impl CredentialConfig {
    /// Config with a random token signing secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token: TokenSettings::with_random_secret(),
            ..Default::default()
        }
    }

    /// Config for development and tests: random secret, cheap hashing
    pub fn development() -> Self {
        Self {
            hasher: PasswordHasherOptions {
                iterations: 1_000,
                ..Default::default()
            },
            ..Self::with_random_secret()
        }
    }

    /// Code validity window in whole minutes (for notification templates)
    pub fn code_ttl_minutes(&self) -> u64 {
        self.code_ttl.as_secs() / 60
    }
}
