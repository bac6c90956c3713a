pub mod auth;
pub mod budget;
pub mod chat;
pub mod dashboard;
pub mod ledgers;
pub mod middleware;
pub mod profile;
pub mod sessions;
pub mod state;

use utoipa::OpenApi;

// Re-export the pieces the binary needs to build the web server router.
pub use middleware::require_auth;
pub use sessions::ChatSessionStore;
pub use state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        dashboard::dashboard_handler,
        ledgers::add_income_handler,
        ledgers::list_income_handler,
        ledgers::delete_income_handler,
        ledgers::clear_income_handler,
        ledgers::add_expense_handler,
        ledgers::list_expense_handler,
        ledgers::delete_expense_handler,
        ledgers::clear_expense_handler,
        ledgers::add_saving_handler,
        ledgers::list_saving_handler,
        ledgers::delete_saving_handler,
        ledgers::clear_saving_handler,
        budget::get_budget_handler,
        budget::set_budget_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
        chat::get_chat_handler,
        chat::new_chat_handler,
        chat::select_chat_handler,
        chat::post_message_handler,
        chat::delete_chat_handler,
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            ledgers::AddIncomeRequest,
            ledgers::AddExpenseRequest,
            ledgers::AddSavingRequest,
            ledgers::EntryResponse,
            budget::SetBudgetRequest,
            budget::BudgetResponse,
            profile::ProfileResponse,
            profile::UpdateProfileRequest,
            dashboard::SummaryResponse,
            dashboard::DashboardResponse,
            chat::SelectChatRequest,
            chat::PostMessageRequest,
            chat::ChatMessageDto,
            chat::ChatThreadDto,
            chat::ChatStateResponse,
        )
    ),
    tags(
        (name = "Fintrack API", description = "API endpoints for the personal finance tracker.")
    )
)]
pub struct ApiDoc;
