//! Infrastructure Layer
//!
//! Store implementations: PostgreSQL for deployment, in-memory for tests
//! and local development.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAccountRepository, InMemoryVerificationCodeRepository};
pub use postgres::PgCredentialRepository;
