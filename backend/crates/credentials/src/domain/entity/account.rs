//! Account Entity
//!
//! Root identity record. Contact channels are mutated only through the
//! dedicated change methods, which reset the matching verified flag so a
//! new proof of possession is always required. Accounts are never
//! physically deleted; deactivation flips `is_active`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, email::Email, phone_number::PhoneNumber,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Email address (unique, case-insensitive)
    pub email: Email,
    /// Phone number (unique when present)
    pub phone: Option<PhoneNumber>,
    /// Encoded password hash, never the plaintext
    pub password_hash: String,
    /// Whether the current email has been proven via a code
    pub email_verified: bool,
    /// Whether the current phone number has been proven via a code
    pub phone_verified: bool,
    /// Role (User, Admin)
    pub role: AccountRole,
    /// Active flag; inactive accounts cannot log in
    pub is_active: bool,
    /// Given name (used in notification templates)
    pub first_name: String,
    /// Family name
    pub last_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    ///
    /// Both verified flags start false; the password hash must already be
    /// encoded.
    pub fn new(
        email: Email,
        password_hash: String,
        first_name: String,
        last_name: Option<String>,
        phone: Option<PhoneNumber>,
        role: AccountRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            email,
            phone,
            password_hash,
            email_verified: false,
            phone_verified: false,
            role,
            is_active: true,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the email address; re-verification becomes required
    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.email_verified = false;
        self.touch();
    }

    /// Replace the phone number; re-verification becomes required
    pub fn update_phone(&mut self, phone: PhoneNumber) {
        self.phone = Some(phone);
        self.phone_verified = false;
        self.touch();
    }

    /// Replace the password hash (new hash, new salt)
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// Record a successful email ownership proof
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.touch();
    }

    /// Record a successful phone ownership proof
    pub fn mark_phone_verified(&mut self) {
        self.phone_verified = true;
        self.touch();
    }

    /// Deactivate the account (soft delete)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Check if the account can log in
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Full name for notification templates
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
