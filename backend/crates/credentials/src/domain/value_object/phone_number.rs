//! Phone Number Value Object
//!
//! Loosely E.164-shaped validation; ownership of the number is proven
//! separately via an SMS verification code.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Phone number value object
///
/// Stored in canonical form: optional leading `+`, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new phone number with validation
    ///
    /// Separator characters (spaces, dashes, dots, parentheses) are
    /// stripped before validation.
    pub fn new(phone: impl Into<String>) -> AppResult<Self> {
        let raw = phone.into();
        let mut canonical = String::with_capacity(raw.len());

        for (i, c) in raw.trim().chars().enumerate() {
            match c {
                '+' if i == 0 => canonical.push(c),
                '0'..='9' => canonical.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(AppError::bad_request("Invalid phone number")),
            }
        }

        let digits = canonical.strip_prefix('+').unwrap_or(&canonical);
        if digits.len() < 7 || digits.len() > 15 {
            return Err(AppError::bad_request(
                "Phone number must have between 7 and 15 digits",
            ));
        }

        Ok(Self(canonical))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    /// Get the number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert!(PhoneNumber::new("+14155552671").is_ok());
        assert!(PhoneNumber::new("04155552671").is_ok());
        assert!(PhoneNumber::new("+81 90-1234-5678").is_ok());
    }

    #[test]
    fn test_phone_canonicalization() {
        let phone = PhoneNumber::new("+1 (415) 555-2671").unwrap();
        assert_eq!(phone.as_str(), "+14155552671");

        assert_eq!(phone, PhoneNumber::new("+1 415.555.2671").unwrap());
    }

    #[test]
    fn test_phone_invalid() {
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("12345").is_err()); // too short
        assert!(PhoneNumber::new("1234567890123456").is_err()); // too long
        assert!(PhoneNumber::new("not a number").is_err());
        assert!(PhoneNumber::new("1+234567890").is_err()); // + not leading
    }
}
