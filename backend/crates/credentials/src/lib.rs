//! Credentials Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and sender traits
//! - `application/` - Use cases, verification ledger, configuration
//! - `infra/` - Database and in-memory store implementations
//!
//! ## Features
//! - Registration and login with email + password
//! - Password change with current-password proof
//! - Email/phone change with mandatory re-verification
//! - Single-use, time-bound verification codes for both contact channels
//! - Stateless signed access tokens
//!
//! ## Security Model
//! - Passwords hashed with salted PBKDF2-HMAC-SHA256, verified in
//!   constant time
//! - Login failures are indistinguishable: unknown email, wrong password,
//!   and deactivated account all answer with the same outcome
//! - Verification codes are consumed exactly once, even under concurrent
//!   submission, via a storage-level compare-and-swap
//! - Changing a contact channel force-expires its outstanding codes

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::config::CredentialConfig;
pub use application::ledger::VerificationLedger;
pub use error::{CredentialError, CredentialResult};
pub use infra::postgres::PgCredentialRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::memory::{InMemoryAccountRepository, InMemoryVerificationCodeRepository};
    pub use crate::infra::postgres::PgCredentialRepository as CredentialStore;
}
