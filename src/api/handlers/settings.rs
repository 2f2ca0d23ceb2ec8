//! User settings endpoints

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::Utc;

use crate::{
    api::responses::{ApiError, ApiResponse, ApiResult, ErrorCode, ProfileResponse},
    state::{AppState, Settings, SettingsPatch},
};

/// Handle GET /api/user/settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> ApiResult<Settings> {
    let settings = state
        .get_settings()
        .map_err(ApiError::internal)
        .error_code("SETTINGS_FETCH_ERROR")?;
    Ok(ApiResponse::ok(settings))
}

/// Handle PUT /api/user/settings - Merge a partial update
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Settings> {
    let settings = state
        .update_settings(&patch)
        .await
        .error_code("SETTINGS_UPDATE_ERROR")?;
    Ok(ApiResponse::with_message(settings, "Settings updated successfully"))
}

/// Handle GET /api/user/profile - The single local user and their settings
pub async fn profile_handler(State(state): State<Arc<AppState>>) -> ApiResult<ProfileResponse> {
    let settings = state
        .get_settings()
        .map_err(ApiError::internal)
        .error_code("PROFILE_FETCH_ERROR")?;
    Ok(ApiResponse::with_message(
        ProfileResponse {
            user_id: "demo-user".to_string(),
            email: "demo@healthguard.app".to_string(),
            settings,
            last_active: Utc::now(),
        },
        "Profile retrieved successfully",
    ))
}
