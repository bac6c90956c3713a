//! crates/fintrack_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Budget, LedgerEntry, LedgerKind, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
    ) -> PortResult<User>;

    /// Returns `PortError::NotFound` when no account uses this email.
    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user(&self, user_id: Uuid) -> PortResult<User>;

    async fn update_user_name(&self, user_id: Uuid, name: &str) -> PortResult<()>;

    // --- Auth Methods ---
    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Ledger Management ---
    async fn insert_entry(&self, kind: LedgerKind, entry: &LedgerEntry) -> PortResult<()>;

    /// Lists one user's entries in a ledger, newest first.
    async fn list_entries(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<Vec<LedgerEntry>>;

    /// Deletes a single entry. The delete targets `id AND user_id` so a user
    /// can only remove their own rows.
    async fn delete_entry(&self, kind: LedgerKind, id: Uuid, user_id: Uuid) -> PortResult<()>;

    /// Removes every entry a user holds in one ledger.
    async fn clear_entries(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<()>;

    /// Sum of all amounts in one ledger for one user; 0.0 for an empty ledger.
    async fn ledger_total(&self, kind: LedgerKind, user_id: Uuid) -> PortResult<f64>;

    /// The expense category with the largest summed amount, if any expenses exist.
    async fn top_expense_category(&self, user_id: Uuid) -> PortResult<Option<(String, f64)>>;

    // --- Budget Management ---
    async fn upsert_budget(&self, budget: &Budget) -> PortResult<()>;

    async fn get_budget(
        &self,
        user_id: Uuid,
        month: &str,
        year: i32,
    ) -> PortResult<Option<f64>>;
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Produces a text completion for a prompt, or fails with a
    /// human-readable detail. No streaming, no multi-turn context.
    async fn generate(&self, prompt: &str) -> PortResult<String>;
}
