use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::qr;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CreateWorkerRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// GET /workers
pub async fn list_workers(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let workers = queries::get_all_workers(&state.pool).await?;
    Ok(Json(json!({ "success": true, "workers": workers })))
}

/// POST /workers — the QR token is generated server-side and never changes
/// for the lifetime of the worker.
pub async fn create_worker(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWorkerRequest>,
) -> Result<Json<Value>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Le nom est requis".to_string()));
    }
    if body.username.trim().is_empty() {
        return Err(AppError::Validation(
            "Le nom d'utilisateur est requis".to_string(),
        ));
    }
    if body.password.trim().is_empty() {
        return Err(AppError::Validation(
            "Le mot de passe est requis".to_string(),
        ));
    }

    let qr_code = qr::generate_worker_qr_code();
    let worker = queries::create_worker(
        &state.pool,
        body.name.trim(),
        &qr_code,
        body.username.trim(),
        body.password.trim(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "worker": worker })))
}

/// GET /workers/{id}/attendance — a worker's own attendance history with the
/// total number of recorded half-day sessions.
pub async fn worker_attendance(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let worker = queries::get_worker_by_id(&state.pool, worker_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Travailleur non trouvé".to_string()))?;

    let attendance = queries::get_worker_attendance(&state.pool, worker_id).await?;
    let total_sessions = queries::get_worker_attendance_count(&state.pool, worker_id).await?;

    Ok(Json(json!({
        "success": true,
        "worker": worker,
        "attendance": attendance,
        "totalSessions": total_sessions,
    })))
}

/// GET /workers/{id}/activities
pub async fn worker_activities(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let activities = queries::get_worker_activities(&state.pool, worker_id).await?;
    Ok(Json(json!({ "success": true, "activities": activities })))
}

/// GET /workers/{id}/checklists
pub async fn worker_checklists(
    State(state): State<Arc<AppState>>,
    Path(worker_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let checklists = queries::get_worker_checklists(&state.pool, worker_id).await?;
    Ok(Json(json!({ "success": true, "checklists": checklists })))
}
