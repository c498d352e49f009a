//! PostgreSQL Repository Implementations
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE accounts (
//!     account_id     UUID PRIMARY KEY,
//!     email          TEXT NOT NULL UNIQUE,
//!     phone          TEXT UNIQUE,
//!     password_hash  TEXT NOT NULL,
//!     email_verified BOOLEAN NOT NULL,
//!     phone_verified BOOLEAN NOT NULL,
//!     role           SMALLINT NOT NULL,
//!     is_active      BOOLEAN NOT NULL,
//!     first_name     TEXT NOT NULL,
//!     last_name      TEXT,
//!     created_at     TIMESTAMPTZ NOT NULL,
//!     updated_at     TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE verification_codes (
//!     code_id    UUID PRIMARY KEY,
//!     account_id UUID NOT NULL REFERENCES accounts (account_id),
//!     channel    TEXT NOT NULL,
//!     code       TEXT NOT NULL,
//!     expires_at TIMESTAMPTZ NOT NULL,
//!     used       BOOLEAN NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE INDEX idx_verification_codes_lookup
//!     ON verification_codes (account_id, channel, code, created_at DESC);
//! ```

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, verification_code::VerificationCode};
use crate::domain::repository::{AccountRepository, VerificationCodeRepository};
use crate::domain::value_object::{
    account_id::AccountId, account_role::AccountRole, channel::Channel, code_id::CodeId,
    email::Email, phone_number::PhoneNumber,
};
use crate::error::CredentialResult;

/// PostgreSQL-backed credential repository
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
}

impl PgCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgCredentialRepository {
    async fn insert(&self, account: &Account) -> CredentialResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                phone,
                password_hash,
                email_verified,
                phone_verified,
                role,
                is_active,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.phone.as_ref().map(|p| p.as_str()))
        .bind(&account.password_hash)
        .bind(account.email_verified)
        .bind(account.phone_verified)
        .bind(account.role.id())
        .bind(account.is_active)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> CredentialResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id, email, phone, password_hash,
                email_verified, phone_verified, role, is_active,
                first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_email(&self, email: &Email) -> CredentialResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id, email, phone, password_hash,
                email_verified, phone_verified, role, is_active,
                first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn exists_by_email(&self, email: &Email) -> CredentialResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, account: &Account) -> CredentialResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                phone = $3,
                password_hash = $4,
                email_verified = $5,
                phone_verified = $6,
                role = $7,
                is_active = $8,
                first_name = $9,
                last_name = $10,
                updated_at = $11
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.phone.as_ref().map(|p| p.as_str()))
        .bind(&account.password_hash)
        .bind(account.email_verified)
        .bind(account.phone_verified)
        .bind(account.role.id())
        .bind(account.is_active)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_active(&self) -> CredentialResult<u64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE is_active")
                .fetch_one(&self.pool)
                .await?;

        Ok(count as u64)
    }

    async fn list_active_page(&self, offset: u64, size: u64) -> CredentialResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id, email, phone, password_hash,
                email_verified, phone_verified, role, is_active,
                first_name, last_name, created_at, updated_at
            FROM accounts
            WHERE is_active
            ORDER BY created_at, account_id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset as i64)
        .bind(size as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }
}

// ============================================================================
// Verification Code Repository Implementation
// ============================================================================

impl VerificationCodeRepository for PgCredentialRepository {
    async fn insert(&self, code: &VerificationCode) -> CredentialResult<()> {
        sqlx::query(
            r#"
            INSERT INTO verification_codes (
                code_id, account_id, channel, code, expires_at, used, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(code.code_id.as_uuid())
        .bind(code.account_id.as_uuid())
        .bind(code.channel.code())
        .bind(&code.code)
        .bind(code.expires_at)
        .bind(code.used)
        .bind(code.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_latest_by_account_and_code(
        &self,
        account_id: &AccountId,
        channel: Channel,
        code: &str,
    ) -> CredentialResult<Option<VerificationCode>> {
        let row = sqlx::query_as::<_, CodeRow>(
            r#"
            SELECT code_id, account_id, channel, code, expires_at, used, created_at
            FROM verification_codes
            WHERE account_id = $1 AND channel = $2 AND code = $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(channel.code())
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CodeRow::into_code))
    }

    async fn consume(&self, code_id: &CodeId) -> CredentialResult<bool> {
        // The WHERE clause is the compare of the compare-and-swap: of two
        // racing calls, only one finds used = FALSE
        let spent_at = Utc::now() - ChronoDuration::minutes(1);

        let affected = sqlx::query(
            r#"
            UPDATE verification_codes
            SET used = TRUE, expires_at = $2
            WHERE code_id = $1 AND used = FALSE
            "#,
        )
        .bind(code_id.as_uuid())
        .bind(spent_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected == 1)
    }

    async fn expire_active_for_account(
        &self,
        account_id: &AccountId,
        channel: Channel,
    ) -> CredentialResult<u64> {
        let backdated = Utc::now() - ChronoDuration::days(1);

        let affected = sqlx::query(
            r#"
            UPDATE verification_codes
            SET expires_at = $3
            WHERE account_id = $1 AND channel = $2 AND used = FALSE
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(channel.code())
        .bind(backdated)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    phone: Option<String>,
    password_hash: String,
    email_verified: bool,
    phone_verified: bool,
    role: i16,
    is_active: bool,
    first_name: String,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            phone: self.phone.map(PhoneNumber::from_db),
            password_hash: self.password_hash,
            email_verified: self.email_verified,
            phone_verified: self.phone_verified,
            role: AccountRole::from_id(self.role),
            is_active: self.is_active,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CodeRow {
    code_id: Uuid,
    account_id: Uuid,
    channel: String,
    code: String,
    expires_at: DateTime<Utc>,
    used: bool,
    created_at: DateTime<Utc>,
}

impl CodeRow {
    fn into_code(self) -> VerificationCode {
        VerificationCode {
            code_id: CodeId::from_uuid(self.code_id),
            account_id: AccountId::from_uuid(self.account_id),
            channel: Channel::from_code(&self.channel),
            code: self.code,
            expires_at: self.expires_at,
            used: self.used,
            created_at: self.created_at,
        }
    }
}
