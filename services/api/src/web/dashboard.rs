//! services/api/src/web/dashboard.rs
//!
//! The dashboard endpoint. Pulls one user's raw aggregates and ledger
//! histories, runs the metrics engine, and returns the combined payload.
//! Nothing here is cached: every view recomputes from current ledger state.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use fintrack_core::domain::{FinancialSummary, LedgerKind};
use fintrack_core::metrics::{summarize, MetricsInput};

use crate::web::budget::current_month;
use crate::web::ledgers::EntryResponse;
use crate::web::middleware::AuthContext;
use crate::web::state::AppState;

//=========================================================================================
// Response Types
//=========================================================================================

/// The derived summary block of the dashboard.
#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub balance_percentage: f64,
    pub saving_status: String,
    pub ai_message: String,
    pub ai_color: String,
    pub category_message: String,
    pub expense_alert: String,
    pub recommended_needs: f64,
    pub recommended_wants: f64,
    pub recommended_savings: f64,
    pub actual_savings: f64,
    pub savings_compare_msg: String,
    pub savings_compare_color: String,
}

impl SummaryResponse {
    fn from_domain(summary: FinancialSummary) -> Self {
        Self {
            balance_percentage: summary.balance_percentage,
            saving_status: summary.saving_status.label().to_string(),
            ai_message: summary.ai_message,
            ai_color: summary.ai_color.as_str().to_string(),
            category_message: summary.category_message,
            expense_alert: summary.expense_alert,
            recommended_needs: summary.recommended_needs,
            recommended_wants: summary.recommended_wants,
            recommended_savings: summary.recommended_savings,
            actual_savings: summary.actual_savings,
            savings_compare_msg: summary.savings_compare_msg,
            savings_compare_color: summary.savings_compare_color.as_str().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub name: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub monthly_budget: f64,
    pub incomes: Vec<EntryResponse>,
    pub expenses: Vec<EntryResponse>,
    pub savings: Vec<EntryResponse>,
    pub summary: SummaryResponse,
}

//=========================================================================================
// Handler
//=========================================================================================

/// GET /dashboard - Totals, histories, budget, and the derived summary
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard payload", body = DashboardResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let db = &state.db;
    let user_id = auth.user_id;

    let result = async {
        let user = db.get_user(user_id).await?;

        let total_income = db.ledger_total(LedgerKind::Income, user_id).await?;
        let total_expense = db.ledger_total(LedgerKind::Expense, user_id).await?;
        let actual_savings = db.ledger_total(LedgerKind::Saving, user_id).await?;
        let top_expense_category = db.top_expense_category(user_id).await?;

        let incomes = db.list_entries(LedgerKind::Income, user_id).await?;
        let expenses = db.list_entries(LedgerKind::Expense, user_id).await?;
        let savings = db.list_entries(LedgerKind::Saving, user_id).await?;

        let (month, year) = current_month();
        let monthly_budget = db.get_budget(user_id, &month, year).await?.unwrap_or(0.0);

        let summary = summarize(&MetricsInput {
            total_income,
            total_expense,
            actual_savings,
            top_expense_category,
        });

        Ok::<_, fintrack_core::ports::PortError>(DashboardResponse {
            name: user.name,
            total_income,
            total_expense,
            balance: summary.balance,
            monthly_budget,
            incomes: incomes.into_iter().map(EntryResponse::from_domain).collect(),
            expenses: expenses.into_iter().map(EntryResponse::from_domain).collect(),
            savings: savings.into_iter().map(EntryResponse::from_domain).collect(),
            summary: SummaryResponse::from_domain(summary),
        })
    }
    .await;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Failed to build dashboard: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build dashboard".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_response_renders_enums_as_strings() {
        let summary = summarize(&MetricsInput {
            total_income: 1000.0,
            total_expense: 850.0,
            actual_savings: 0.0,
            top_expense_category: None,
        });
        let response = SummaryResponse::from_domain(summary);

        assert_eq!(response.saving_status, "🙂 Average Saver");
        assert_eq!(response.ai_color, "info");
        assert_eq!(response.savings_compare_color, "warning");
    }
}
