//! services/api/src/web/chat.rs
//!
//! The AI chat endpoints. All chat state is per-login-session and lives in
//! the in-process session store; these handlers lock the session's
//! `ChatState` and apply the core chat operations to it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use fintrack_core::chat::{ChatState, INITIAL_CHAT_TITLE};
use fintrack_core::domain::{ChatRole, ChatThread};

use crate::web::middleware::AuthContext;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SelectChatRequest {
    pub chat_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub question: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChatMessageDto {
    /// "user" or "ai".
    pub role: String,
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct ChatThreadDto {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessageDto>,
}

impl ChatThreadDto {
    fn from_domain(thread: &ChatThread) -> Self {
        Self {
            id: thread.id.clone(),
            title: thread.title.clone(),
            messages: thread
                .messages
                .iter()
                .map(|m| ChatMessageDto {
                    role: match m.role {
                        ChatRole::User => "user".to_string(),
                        ChatRole::Ai => "ai".to_string(),
                    },
                    content: m.content.clone(),
                })
                .collect(),
        }
    }
}

/// Snapshot of the session's chat state after an operation.
#[derive(Serialize, ToSchema)]
pub struct ChatStateResponse {
    pub chats: Vec<ChatThreadDto>,
    pub active_chat: Option<ChatThreadDto>,
}

impl ChatStateResponse {
    fn from_state(state: &ChatState) -> Self {
        Self {
            chats: state.threads.iter().map(ChatThreadDto::from_domain).collect(),
            active_chat: state.active_thread().map(ChatThreadDto::from_domain),
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /chat - The session's threads and active transcript
///
/// Viewing repairs the session invariant: an empty list or dangling active
/// pointer gets a fresh default-titled thread.
#[utoipa::path(
    get,
    path = "/chat",
    responses(
        (status = 200, description = "Chat state", body = ChatStateResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let chat = state.chat_sessions.get_or_create(&auth.session_id);
    let mut chat = chat.lock().await;
    chat.ensure_active_thread(INITIAL_CHAT_TITLE);
    Ok(Json(ChatStateResponse::from_state(&chat)))
}

/// POST /chat/new - Start a new empty thread and make it active
#[utoipa::path(
    post,
    path = "/chat/new",
    responses(
        (status = 201, description = "New thread created", body = ChatStateResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn new_chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let chat = state.chat_sessions.get_or_create(&auth.session_id);
    let mut chat = chat.lock().await;
    chat.new_chat();
    Ok((StatusCode::CREATED, Json(ChatStateResponse::from_state(&chat))))
}

/// POST /chat/select - Switch the active thread
///
/// The switch is unconditional; a chat_id that matches nothing leaves a
/// dangling pointer that the next access repairs.
#[utoipa::path(
    post,
    path = "/chat/select",
    request_body = SelectChatRequest,
    responses(
        (status = 200, description = "Active thread switched", body = ChatStateResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn select_chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SelectChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let chat = state.chat_sessions.get_or_create(&auth.session_id);
    let mut chat = chat.lock().await;
    chat.select_chat(&req.chat_id);
    Ok(Json(ChatStateResponse::from_state(&chat)))
}

/// POST /chat/message - Post a question to the active thread
///
/// The generative call is a synchronous round trip; a failure becomes an
/// `Error: ...` transcript entry, never an HTTP error. An empty question is
/// ignored.
#[utoipa::path(
    post,
    path = "/chat/message",
    request_body = PostMessageRequest,
    responses(
        (status = 200, description = "Transcript after the exchange", body = ChatStateResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn post_message_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let chat = state.chat_sessions.get_or_create(&auth.session_id);
    // Held across the generative round trip: one slow completion blocks
    // only this session.
    let mut chat = chat.lock().await;
    if !req.question.is_empty() {
        chat.post_message(&req.question, state.text_generator.as_ref()).await;
    }
    Ok(Json(ChatStateResponse::from_state(&chat)))
}

/// DELETE /chat/{chat_id} - Remove a thread
///
/// Deleting the active thread clears the pointer; the next access
/// auto-creates a fresh thread.
#[utoipa::path(
    delete,
    path = "/chat/{chat_id}",
    params(("chat_id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Thread removed", body = ChatStateResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn delete_chat_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(chat_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let chat = state.chat_sessions.get_or_create(&auth.session_id);
    let mut chat = chat.lock().await;
    chat.delete_chat(&chat_id);
    Ok(Json(ChatStateResponse::from_state(&chat)))
}
