//! Password Hashing and Verification
//!
//! PBKDF2-HMAC-SHA256 password hashing with:
//! - Per-password random salt
//! - Self-contained `base64(salt || derived key)` encoding
//! - Constant-time comparison
//!
//! ## Security Notes
//! - The encoding is self-describing given the process-wide
//!   [`PasswordHasherOptions`]; verification never depends on externally
//!   stored parameters.
//! - Malformed encodings verify as `false`, never as an error, so callers
//!   cannot distinguish "hash was garbage" from "password was wrong".

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::crypto;

// ============================================================================
// Options
// ============================================================================

/// Tunable key-derivation parameters
///
/// All three values trade security against CPU cost:
/// - `iterations` is the work factor; raising it is the sanctioned way to
///   keep pace with hardware speedups. Existing hashes keep verifying only
///   as long as the process configuration matches the parameters they were
///   created with, so roll iterations together with a rehash-on-login step.
/// - `salt_len` defeats precomputed-table attacks; 16 bytes is ample.
/// - `hash_len` is the derived-key length; 32 bytes matches the SHA-256
///   block and leaves no advantage to truncation attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasherOptions {
    /// PBKDF2 iteration count
    pub iterations: u32,
    /// Salt length in bytes
    pub salt_len: usize,
    /// Derived-key length in bytes
    pub hash_len: usize,
}

impl Default for PasswordHasherOptions {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            salt_len: 16,
            hash_len: 32,
        }
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// One-way password hasher
///
/// Stateless apart from its immutable options; safe to share across
/// concurrent requests.
///
/// ## Examples
/// ```rust
/// use platform::password::{PasswordHasher, PasswordHasherOptions};
///
/// let hasher = PasswordHasher::new(PasswordHasherOptions::default());
/// let encoded = hasher.hash("correct horse battery staple");
/// assert!(hasher.verify("correct horse battery staple", &encoded));
/// assert!(!hasher.verify("wrong password", &encoded));
/// ```
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    options: PasswordHasherOptions,
}

impl PasswordHasher {
    pub fn new(options: PasswordHasherOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PasswordHasherOptions {
        &self.options
    }

    /// Hash a plaintext password
    ///
    /// Generates a fresh random salt, derives a key with
    /// PBKDF2-HMAC-SHA256, and returns `base64(salt || derived key)`.
    /// Two calls with the same plaintext produce different encodings.
    pub fn hash(&self, plaintext: &str) -> String {
        let salt = crypto::random_bytes(self.options.salt_len);

        let mut derived = vec![0u8; self.options.hash_len];
        pbkdf2_hmac::<Sha256>(
            plaintext.as_bytes(),
            &salt,
            self.options.iterations,
            &mut derived,
        );

        let mut blob = Vec::with_capacity(self.options.salt_len + self.options.hash_len);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&derived);

        crypto::to_base64(&blob)
    }

    /// Verify a plaintext password against a stored encoding
    ///
    /// Re-derives a key from the embedded salt and compares it to the
    /// stored key in constant time. Any malformed encoding (bad base64,
    /// wrong length) yields `false`.
    pub fn verify(&self, plaintext: &str, encoded: &str) -> bool {
        let blob = match crypto::from_base64(encoded) {
            Ok(blob) => blob,
            Err(_) => {
                tracing::debug!("Rejected malformed password encoding (not base64)");
                return false;
            }
        };

        if blob.len() != self.options.salt_len + self.options.hash_len {
            tracing::debug!(
                len = blob.len(),
                "Rejected malformed password encoding (wrong length)"
            );
            return false;
        }

        let (salt, stored) = blob.split_at(self.options.salt_len);

        let mut candidate = Zeroizing::new(vec![0u8; self.options.hash_len]);
        pbkdf2_hmac::<Sha256>(
            plaintext.as_bytes(),
            salt,
            self.options.iterations,
            &mut candidate,
        );

        crypto::constant_time_eq(stored, &candidate)
    }
}

// ============================================================================
// Tests
// ============================================================================
