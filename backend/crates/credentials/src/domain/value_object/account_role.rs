use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccountRole {
    #[default]
    User = 0,
    Admin = 1,
}

impl AccountRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use AccountRole::*;
        match self {
            User => "user",
            Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }

    /// Decode from database value (trusted)
    #[inline]
    pub fn from_id(id: i16) -> Self {
        use AccountRole::*;
        match id {
            0 => User,
            1 => Admin,
            _ => {
                tracing::error!("Invalid AccountRole id: {}", id);
                unreachable!("Invalid AccountRole id: {}", id)
            }
        }
    }

    /// Decode from a role code in untrusted input (e.g. a token claim)
    #[inline]
    pub fn try_from_code(code: &str) -> Option<Self> {
        use AccountRole::*;
        match code {
            "user" => Some(User),
            "admin" => Some(Admin),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
