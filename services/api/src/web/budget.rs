//! services/api/src/web/budget.rs
//!
//! Monthly budget endpoints. The budget is keyed by (user, month, year) and
//! every submission targets the current calendar month.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use fintrack_core::domain::Budget;

use crate::web::middleware::AuthContext;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SetBudgetRequest {
    pub amount: f64,
}

#[derive(Serialize, ToSchema)]
pub struct BudgetResponse {
    pub month: String,
    pub year: i32,
    pub monthly_budget: f64,
}

/// The current calendar month as (name, year), e.g. ("August", 2026).
pub fn current_month() -> (String, i32) {
    let now = Utc::now();
    (now.format("%B").to_string(), now.year())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /budget - The current month's budget (0.0 when unset)
#[utoipa::path(
    get,
    path = "/budget",
    responses(
        (status = 200, description = "Current month's budget", body = BudgetResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_budget_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (month, year) = current_month();

    let monthly_budget = state
        .db
        .get_budget(auth.user_id, &month, year)
        .await
        .map_err(|e| {
            error!("Failed to fetch budget: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch budget".to_string())
        })?
        .unwrap_or(0.0);

    Ok(Json(BudgetResponse {
        month,
        year,
        monthly_budget,
    }))
}

/// PUT /budget - Upsert the current month's budget
#[utoipa::path(
    put,
    path = "/budget",
    request_body = SetBudgetRequest,
    responses(
        (status = 200, description = "Budget saved", body = BudgetResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_budget_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SetBudgetRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (month, year) = current_month();

    let budget = Budget {
        user_id: auth.user_id,
        month: month.clone(),
        year,
        monthly_budget: req.amount,
    };

    state.db.upsert_budget(&budget).await.map_err(|e| {
        error!("Failed to save budget: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save budget".to_string())
    })?;

    Ok(Json(BudgetResponse {
        month,
        year,
        monthly_budget: req.amount,
    }))
}
