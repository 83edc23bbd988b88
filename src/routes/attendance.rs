use crate::database::models::Period;
use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::qr;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    pub qr_code: String,
    pub date: NaiveDate,
    pub period: String,
    pub admin_id: i64,
}

/// POST /attendance — converts one scan into at most one attendance row.
/// Re-scanning the same worker in the same period is the same logical success.
pub async fn record_attendance(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecordAttendanceRequest>,
) -> Result<Json<Value>, AppError> {
    if !qr::is_valid_worker_qr_code(&body.qr_code) {
        return Err(AppError::Validation("QR code invalide".to_string()));
    }

    let period = Period::parse(&body.period)
        .ok_or_else(|| AppError::Validation("Période invalide".to_string()))?;

    let worker = queries::get_worker_by_qr_code(&state.pool, &body.qr_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Travailleur non trouvé".to_string()))?;

    queries::mark_attendance(&state.pool, worker.id, body.admin_id, body.date, period).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Présence enregistrée pour {}", worker.name),
        "worker": worker.name,
        "period": period.label_fr(),
    })))
}

#[derive(Deserialize)]
pub struct ListAttendanceQuery {
    pub date: Option<NaiveDate>,
}

/// GET /attendance?date=YYYY-MM-DD — rows for one date, or all rows when the
/// parameter is omitted.
pub async fn list_attendance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<Json<Value>, AppError> {
    let attendance = match query.date {
        Some(date) => queries::get_attendance_by_date(&state.pool, date).await?,
        None => queries::get_all_attendance(&state.pool).await?,
    };

    Ok(Json(json!({ "success": true, "attendance": attendance })))
}

/// DELETE /attendance/{id}
pub async fn delete_attendance(
    State(state): State<Arc<AppState>>,
    Path(attendance_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = queries::delete_attendance(&state.pool, attendance_id).await?;

    if !deleted {
        return Err(AppError::NotFound(
            "Présence non trouvée ou déjà supprimée".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Présence supprimée avec succès",
    })))
}
