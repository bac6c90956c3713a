//! services/api/src/web/profile.rs
//!
//! Profile endpoints: fetch the logged-in user and change their display name.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::middleware::AuthContext;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /profile - The logged-in user's profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn get_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user = state.db.get_user(auth.user_id).await.map_err(|e| {
        error!("Failed to fetch profile: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch profile".to_string())
    })?;

    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email,
    }))
}

/// PUT /profile - Change the display name
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .update_user_name(auth.user_id, &req.name)
        .await
        .map_err(|e| {
            error!("Failed to update profile: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update profile".to_string())
        })?;

    let user = state.db.get_user(auth.user_id).await.map_err(|e| {
        error!("Failed to fetch profile: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch profile".to_string())
    })?;

    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email,
    }))
}
