//! crates/fintrack_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

// Represents a user - used throughout app
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

// Only used internally for login/signup - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Which of the three per-user transaction tables an entry belongs to.
///
/// The ledgers are structurally identical but semantically distinct; a row
/// never moves between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Income,
    Expense,
    Saving,
}

impl LedgerKind {
    /// The backing table name for this ledger.
    pub fn table(&self) -> &'static str {
        match self {
            LedgerKind::Income => "income",
            LedgerKind::Expense => "expense",
            LedgerKind::Saving => "savings",
        }
    }
}

/// A single immutable row in one of the three ledgers.
///
/// `label` holds the income source or expense category; for savings it is
/// free-form and may be empty. Entries are created on user submission and
/// deleted individually or in bulk, never mutated.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub label: String,
    pub entered_on: NaiveDate,
}

/// One user's budget for a single calendar month, upserted on each submission.
#[derive(Debug, Clone)]
pub struct Budget {
    pub user_id: Uuid,
    pub month: String,
    pub year: i32,
    pub monthly_budget: f64,
}

/// Bootstrap-style severity color attached to a dashboard message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Secondary,
    Danger,
    Warning,
    Info,
    Primary,
    Success,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Secondary => "secondary",
            StatusColor::Danger => "danger",
            StatusColor::Warning => "warning",
            StatusColor::Info => "info",
            StatusColor::Primary => "primary",
            StatusColor::Success => "success",
        }
    }
}

/// Saving-habit classification of the remaining balance percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingStatus {
    Poor,
    Average,
    Good,
    Excellent,
}

impl SavingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SavingStatus::Poor => "⚠ Poor Saving Habit",
            SavingStatus::Average => "🙂 Average Saver",
            SavingStatus::Good => "💪 Good Saving Behavior",
            SavingStatus::Excellent => "🏆 Excellent Financial Control",
        }
    }
}

/// The derived dashboard summary. Recomputed from ledger state on every
/// view, never persisted.
#[derive(Debug, Clone)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub balance_percentage: f64,
    pub saving_status: SavingStatus,
    pub ai_message: String,
    pub ai_color: StatusColor,
    pub category_message: String,
    pub expense_alert: String,
    pub recommended_needs: f64,
    pub recommended_wants: f64,
    pub recommended_savings: f64,
    pub actual_savings: f64,
    pub savings_compare_msg: String,
    pub savings_compare_color: StatusColor,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Ai,
}

/// A single entry in a chat transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// One conversation thread. Lives only inside the session store; destroyed
/// when the login session ends or the thread is explicitly deleted.
#[derive(Debug, Clone)]
pub struct ChatThread {
    /// Opaque unique token, never derived from input.
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
}
