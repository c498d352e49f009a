//! Signed Access Tokens
//!
//! Stateless, tamper-evident bearer tokens (HS256 JWT). A token is minted
//! once at sign-in and re-validated from its signature and claims on every
//! use; nothing is persisted and nothing can be revoked before expiry.
//! That limitation is accepted here — revocation would need a denylist
//! store, which this layer does not own.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::crypto;

// ============================================================================
// Settings
// ============================================================================

/// Token signing configuration
///
/// Loaded once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    /// Symmetric signing secret (32 bytes recommended)
    pub secret: Vec<u8>,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Token lifetime from issuance to expiry
    pub lifetime: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: vec![0u8; 32],
            issuer: "credentials".to_string(),
            audience: "credentials-web".to_string(),
            lifetime: Duration::from_secs(60 * 60),
        }
    }
}

impl TokenSettings {
    /// Settings with a random signing secret (for development and tests)
    pub fn with_random_secret() -> Self {
        Self {
            secret: crypto::random_bytes(32),
            ..Default::default()
        }
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Claims carried by every issued token
///
/// Validation rejects a token missing any of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account id)
    pub sub: String,
    /// Role code of the subject at issuance time
    pub role: String,
    /// Unique token id, fresh per issuance
    pub jti: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expires-at (unix seconds)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// Token signing failure
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

// ============================================================================
// Issuer
// ============================================================================

/// Mints and validates signed access tokens
///
/// ## Examples
/// ```rust
/// use platform::token::{TokenIssuer, TokenSettings};
///
/// let issuer = TokenIssuer::new(TokenSettings::with_random_secret());
/// let token = issuer.issue("account-id", "user").unwrap();
/// let claims = issuer.validate(&token).expect("fresh token validates");
/// assert_eq!(claims.sub, "account-id");
/// assert_eq!(claims.role, "user");
/// ```
pub struct TokenIssuer {
    settings: TokenSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(settings: TokenSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(&settings.secret);
        let decoding_key = DecodingKey::from_secret(&settings.secret);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        // No clock-skew tolerance
        validation.leeway = 0;

        Self {
            settings,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a signed token for `subject` with `role`
    ///
    /// The jti claim is freshly random per call, so re-issuing for the same
    /// subject never produces an identical token.
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        let claims = AccessClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.settings.lifetime.as_secs() as i64,
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Validate a token, returning its claims if and only if it is trusted
    ///
    /// Fails closed: signature mismatch, expiry, issuer/audience mismatch,
    /// and structural problems all collapse into the single `None` outcome.
    /// The cause is logged at debug level and never surfaced to callers.
    pub fn validate(&self, token: &str) -> Option<AccessClaims> {
        match decode::<AccessClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                tracing::debug!(error = %err, "Rejected access token");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
