//! Exercise catalog endpoints

use axum::extract::Path;

use crate::{
    api::responses::{ApiError, ApiResponse, ApiResult},
    services::exercises::{self, Exercise},
};

/// Handle GET /api/exercises
pub async fn list_handler() -> ApiResult<&'static [Exercise]> {
    Ok(ApiResponse::ok(exercises::all()))
}

/// Handle GET /api/exercises/:category
pub async fn category_handler(
    Path(category): Path<String>,
) -> ApiResult<Vec<&'static Exercise>> {
    let found = exercises::by_category(&category);
    if found.is_empty() {
        return Err(ApiError::not_found(format!(
            "No exercises in category {}",
            category
        ))
        .with_code("CATEGORY_EXERCISES_FETCH_ERROR"));
    }
    Ok(ApiResponse::ok(found))
}
