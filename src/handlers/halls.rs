//! Hall catalog handlers

use crate::error::EngineError;
use crate::models::{ApiResponse, Hall};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::AppState;

/// List active halls
pub async fn list_halls(State(state): State<AppState>) -> Result<impl IntoResponse, EngineError> {
    let halls: Vec<Hall> = state.catalog.active_halls().await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(halls))))
}
