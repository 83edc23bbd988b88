use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

/// GET /health — liveness plus a round-trip through the database.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(json!({
        "success": true,
        "status": "ok",
        "database": "connected",
        "admins": admins,
    })))
}
