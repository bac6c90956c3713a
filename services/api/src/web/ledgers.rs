//! services/api/src/web/ledgers.rs
//!
//! Handlers for the three transaction ledgers: income, expense, and savings.
//! The ledgers are structurally identical, so each route is a thin wrapper
//! over shared helpers parameterized by `LedgerKind`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use fintrack_core::domain::{LedgerEntry, LedgerKind};

use crate::web::middleware::AuthContext;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct AddIncomeRequest {
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct AddSavingRequest {
    pub amount: f64,
    /// Optional free-form label; empty when omitted.
    pub source: Option<String>,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
}

/// One ledger row as returned to the client.
#[derive(Serialize, ToSchema)]
pub struct EntryResponse {
    pub id: Uuid,
    pub amount: f64,
    pub label: String,
    pub date: NaiveDate,
}

impl EntryResponse {
    pub fn from_domain(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id,
            amount: entry.amount,
            label: entry.label,
            date: entry.entered_on,
        }
    }
}

//=========================================================================================
// Shared Helpers
//=========================================================================================

async fn insert_entry(
    state: &AppState,
    kind: LedgerKind,
    user_id: Uuid,
    amount: f64,
    label: String,
    date: NaiveDate,
) -> Result<EntryResponse, (StatusCode, String)> {
    let entry = LedgerEntry {
        id: Uuid::new_v4(),
        user_id,
        amount,
        label,
        entered_on: date,
    };

    state.db.insert_entry(kind, &entry).await.map_err(|e| {
        error!("Failed to insert {} entry: {:?}", kind.table(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to add entry".to_string())
    })?;

    Ok(EntryResponse::from_domain(entry))
}

async fn list_entries(
    state: &AppState,
    kind: LedgerKind,
    user_id: Uuid,
) -> Result<Vec<EntryResponse>, (StatusCode, String)> {
    let entries = state.db.list_entries(kind, user_id).await.map_err(|e| {
        error!("Failed to list {} entries: {:?}", kind.table(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list entries".to_string())
    })?;

    Ok(entries.into_iter().map(EntryResponse::from_domain).collect())
}

async fn delete_entry(
    state: &AppState,
    kind: LedgerKind,
    id: Uuid,
    user_id: Uuid,
) -> Result<StatusCode, (StatusCode, String)> {
    state.db.delete_entry(kind, id, user_id).await.map_err(|e| {
        error!("Failed to delete {} entry: {:?}", kind.table(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete entry".to_string())
    })?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_entries(
    state: &AppState,
    kind: LedgerKind,
    user_id: Uuid,
) -> Result<StatusCode, (StatusCode, String)> {
    state.db.clear_entries(kind, user_id).await.map_err(|e| {
        error!("Failed to clear {} ledger: {:?}", kind.table(), e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to clear ledger".to_string())
    })?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Income Handlers
//=========================================================================================

/// POST /income - Record an income entry
#[utoipa::path(
    post,
    path = "/income",
    request_body = AddIncomeRequest,
    responses(
        (status = 201, description = "Income added successfully", body = EntryResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_income_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddIncomeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = insert_entry(
        &state,
        LedgerKind::Income,
        auth.user_id,
        req.amount,
        req.source,
        req.date,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /income - List income entries, newest first
#[utoipa::path(
    get,
    path = "/income",
    responses(
        (status = 200, description = "Income entries", body = [EntryResponse]),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_income_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    Ok(Json(list_entries(&state, LedgerKind::Income, auth.user_id).await?))
}

/// DELETE /income/{id} - Delete one income entry
#[utoipa::path(
    delete,
    path = "/income/{id}",
    params(("id" = Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn delete_income_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    delete_entry(&state, LedgerKind::Income, id, auth.user_id).await
}

/// DELETE /income - Clear the entire income ledger
#[utoipa::path(
    delete,
    path = "/income",
    responses(
        (status = 204, description = "Ledger cleared"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn clear_income_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    clear_entries(&state, LedgerKind::Income, auth.user_id).await
}

//=========================================================================================
// Expense Handlers
//=========================================================================================

/// POST /expenses - Record an expense entry
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense added successfully", body = EntryResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_expense_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = insert_entry(
        &state,
        LedgerKind::Expense,
        auth.user_id,
        req.amount,
        req.category,
        req.date,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /expenses - List expense entries, newest first
#[utoipa::path(
    get,
    path = "/expenses",
    responses(
        (status = 200, description = "Expense entries", body = [EntryResponse]),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_expense_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    Ok(Json(list_entries(&state, LedgerKind::Expense, auth.user_id).await?))
}

/// DELETE /expenses/{id} - Delete one expense entry
#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    params(("id" = Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn delete_expense_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    delete_entry(&state, LedgerKind::Expense, id, auth.user_id).await
}

/// DELETE /expenses - Clear the entire expense ledger
#[utoipa::path(
    delete,
    path = "/expenses",
    responses(
        (status = 204, description = "Ledger cleared"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn clear_expense_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    clear_entries(&state, LedgerKind::Expense, auth.user_id).await
}

//=========================================================================================
// Savings Handlers
//=========================================================================================

/// POST /savings - Record a savings entry (date defaults to today)
#[utoipa::path(
    post,
    path = "/savings",
    request_body = AddSavingRequest,
    responses(
        (status = 201, description = "Saving added successfully", body = EntryResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_saving_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddSavingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let entry = insert_entry(
        &state,
        LedgerKind::Saving,
        auth.user_id,
        req.amount,
        req.source.unwrap_or_default(),
        req.date.unwrap_or_else(|| Utc::now().date_naive()),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /savings - List savings entries, newest first
#[utoipa::path(
    get,
    path = "/savings",
    responses(
        (status = 200, description = "Savings entries", body = [EntryResponse]),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_saving_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    Ok(Json(list_entries(&state, LedgerKind::Saving, auth.user_id).await?))
}

/// DELETE /savings/{id} - Delete one savings entry
#[utoipa::path(
    delete,
    path = "/savings/{id}",
    params(("id" = Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn delete_saving_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    delete_entry(&state, LedgerKind::Saving, id, auth.user_id).await
}

/// DELETE /savings - Clear the entire savings ledger
#[utoipa::path(
    delete,
    path = "/savings",
    responses(
        (status = 204, description = "Ledger cleared"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn clear_saving_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    clear_entries(&state, LedgerKind::Saving, auth.user_id).await
}
