//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64, constant-time compare)
//! - Password hashing (PBKDF2-HMAC-SHA256, self-contained encoding)
//! - Signed access tokens (HS256 JWT)

pub mod crypto;
pub mod password;
pub mod token;
