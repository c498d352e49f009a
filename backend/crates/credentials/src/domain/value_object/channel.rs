//! Verification Channel
//!
//! The two contact mediums subject to proof-of-possession verification.
//! Channel identity selects the delivery collaborator and partitions the
//! code store; the code lifecycle itself is identical for both.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[display("email")]
    Email,
    #[display("phone")]
    Phone,
}

impl Channel {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }

    /// Decode from database value (trusted)
    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            "email" => Channel::Email,
            "phone" => Channel::Phone,
            _ => {
                tracing::error!("Invalid Channel code: {}", code);
                unreachable!("Invalid Channel code: {}", code)
            }
        }
    }
}
