use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub worker_id: i64,
}

/// GET /activities/{id}/assign
pub async fn list_assigned_workers(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let workers = queries::get_activity_workers(&state.pool, activity_id).await?;
    Ok(Json(json!({ "success": true, "workers": workers })))
}

/// POST /activities/{id}/assign — idempotent; the response carries the
/// refreshed assignment list so callers never rely on a partial return.
pub async fn assign_worker(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(body): Json<AssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    queries::get_activity_by_id(&state.pool, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activité non trouvée".to_string()))?;

    queries::get_worker_by_id(&state.pool, body.worker_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Travailleur non trouvé".to_string()))?;

    queries::assign_worker(&state.pool, activity_id, body.worker_id).await?;

    let workers = queries::get_activity_workers(&state.pool, activity_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Animateur attribué avec succès",
        "workers": workers,
    })))
}

/// DELETE /activities/{id}/assign — removing an unassigned pair is a no-op.
pub async fn unassign_worker(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(body): Json<AssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    queries::unassign_worker(&state.pool, activity_id, body.worker_id).await?;

    let workers = queries::get_activity_workers(&state.pool, activity_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Animateur retiré avec succès",
        "workers": workers,
    })))
}
