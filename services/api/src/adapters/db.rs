//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_core::domain::{Budget, LedgerEntry, LedgerKind, User, UserCredentials};
use fintrack_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    name: String,
    email: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(FromRow)]
struct UserCredentialsRecord {
    user_id: Uuid,
    name: String,
    email: String,
    hashed_password: String,
}
impl UserCredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            hashed_password: self.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct LedgerEntryRecord {
    id: Uuid,
    user_id: Uuid,
    amount: f64,
    label: String,
    entered_on: NaiveDate,
}
impl LedgerEntryRecord {
    fn to_domain(self) -> LedgerEntry {
        LedgerEntry {
            id: self.id,
            user_id: self.user_id,
            amount: self.amount,
            label: self.label,
            entered_on: self.entered_on,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

// The ledger queries interpolate `LedgerKind::table()`, a fixed string from
// the enum, never user input. All values go through bind parameters.

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (name, email, hashed_password) VALUES ($1, $2, $3) \
             RETURNING user_id, name, email",
        )
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, UserCredentialsRecord>(
            "SELECT user_id, name, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("No account for email {}", email))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, name, email FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", user_id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn update_user_name(&self, user_id: Uuid, name: &str) -> PortResult<()> {
        sqlx::query("UPDATE users SET name = $1 WHERE user_id = $2")
            .bind(name)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM auth_sessions WHERE id = $1 AND expires_at > now()",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        user_id.ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn insert_entry(&self, kind: LedgerKind, entry: &LedgerEntry) -> PortResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, user_id, amount, label, entered_on) VALUES ($1, $2, $3, $4, $5)",
            kind.table()
        );
        sqlx::query(&sql)
            .bind(entry.id)
            .bind(entry.user_id)
            .bind(entry.amount)
            .bind(&entry.label)
            .bind(entry.entered_on)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn list_entries(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT id, user_id, amount, label, entered_on FROM {} \
             WHERE user_id = $1 ORDER BY entered_on DESC, created_at DESC",
            kind.table()
        );
        let records = sqlx::query_as::<_, LedgerEntryRecord>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_entry(&self, kind: LedgerKind, id: Uuid, user_id: Uuid) -> PortResult<()> {
        // Scoped to the owner: a user can only delete their own rows.
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", kind.table());
        sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn clear_entries(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<()> {
        let sql = format!("DELETE FROM {} WHERE user_id = $1", kind.table());
        sqlx::query(&sql)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn ledger_total(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<f64> {
        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {} WHERE user_id = $1",
            kind.table()
        );
        sqlx::query_scalar::<_, f64>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn top_expense_category(&self, user_id: Uuid) -> PortResult<Option<(String, f64)>> {
        sqlx::query_as::<_, (String, f64)>(
            "SELECT label, SUM(amount) AS total FROM expense \
             WHERE user_id = $1 GROUP BY label ORDER BY total DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }

    async fn upsert_budget(&self, budget: &Budget) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO budget (user_id, month, year, monthly_budget) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, month, year) \
             DO UPDATE SET monthly_budget = EXCLUDED.monthly_budget",
        )
        .bind(budget.user_id)
        .bind(&budget.month)
        .bind(budget.year)
        .bind(budget.monthly_budget)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn get_budget(
        &self,
        user_id: Uuid,
        month: &str,
        year: i32,
    ) -> PortResult<Option<f64>> {
        sqlx::query_scalar::<_, f64>(
            "SELECT monthly_budget FROM budget WHERE user_id = $1 AND month = $2 AND year = $3",
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}
