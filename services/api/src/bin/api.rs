//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{db::DbAdapter, chat_llm::OpenAiChatAdapter},
    config::Config,
    error::ApiError,
    web::{
        auth::{login_handler, logout_handler, register_handler},
        budget::{get_budget_handler, set_budget_handler},
        chat::{
            delete_chat_handler, get_chat_handler, new_chat_handler, post_message_handler,
            select_chat_handler,
        },
        dashboard::dashboard_handler,
        ledgers::{
            add_expense_handler, add_income_handler, add_saving_handler, clear_expense_handler,
            clear_income_handler, clear_saving_handler, delete_expense_handler,
            delete_income_handler, delete_saving_handler, list_expense_handler,
            list_income_handler, list_saving_handler,
        },
        middleware::require_auth,
        profile::{get_profile_handler, update_profile_handler},
        ApiDoc, AppState, ChatSessionStore,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    let openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ApiError::Internal("OPENAI_API_KEY is required".to_string()))?,
    );
    let openai_client = Client::with_config(openai_config);

    let chat_adapter = Arc::new(OpenAiChatAdapter::new(
        openai_client,
        config.chat_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db: db_adapter,
        config: config.clone(),
        text_generator: chat_adapter,
        chat_sessions: ChatSessionStore::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("Invalid FRONTEND_ORIGIN: {e}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route(
            "/income",
            post(add_income_handler)
                .get(list_income_handler)
                .delete(clear_income_handler),
        )
        .route("/income/{id}", delete(delete_income_handler))
        .route(
            "/expenses",
            post(add_expense_handler)
                .get(list_expense_handler)
                .delete(clear_expense_handler),
        )
        .route("/expenses/{id}", delete(delete_expense_handler))
        .route(
            "/savings",
            post(add_saving_handler)
                .get(list_saving_handler)
                .delete(clear_saving_handler),
        )
        .route("/savings/{id}", delete(delete_saving_handler))
        .route("/budget", get(get_budget_handler).put(set_budget_handler))
        .route("/profile", get(get_profile_handler).put(update_profile_handler))
        .route("/chat", get(get_chat_handler))
        .route("/chat/new", post(new_chat_handler))
        .route("/chat/select", post(select_chat_handler))
        .route("/chat/message", post(post_message_handler))
        .route("/chat/{chat_id}", delete(delete_chat_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
