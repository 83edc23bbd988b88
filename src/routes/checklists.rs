use crate::database::models::Mood;
use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistPayload {
    pub worker_id: i64,
    pub departure_check: bool,
    pub return_check: bool,
    #[serde(default)]
    pub comments: String,
    pub mood: Option<String>,
}

/// POST /activities/{id}/checklist — full replace of the (activity, worker)
/// row. Once both departure and return are confirmed, the worker must leave a
/// mood and a comment; that rule is enforced here, not in the UI.
pub async fn save_checklist(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(body): Json<ChecklistPayload>,
) -> Result<Json<Value>, AppError> {
    let mood = match body.mood.as_deref() {
        Some(value) => {
            Mood::parse(value).ok_or_else(|| AppError::Validation("Humeur invalide".to_string()))?
        }
        None => Mood::Neutral,
    };

    if body.departure_check
        && body.return_check
        && (body.comments.trim().is_empty() || body.mood.is_none())
    {
        return Err(AppError::Validation(
            "Commentaires et humeur requis lorsque départ et retour sont confirmés".to_string(),
        ));
    }

    let checklist = queries::upsert_checklist(
        &state.pool,
        activity_id,
        body.worker_id,
        body.departure_check,
        body.return_check,
        body.comments.trim(),
        mood,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Feuille de route mise à jour avec succès",
        "checklist": checklist,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistQuery {
    pub worker_id: Option<i64>,
}

/// GET /activities/{id}/checklist[?workerId=] — one worker's checklist or all
/// checklists for the activity. A missing checklist is `null`, not an error.
pub async fn list_activity_checklists(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Query(query): Query<ChecklistQuery>,
) -> Result<Json<Value>, AppError> {
    match query.worker_id {
        Some(worker_id) => {
            let checklist = queries::get_checklist(&state.pool, activity_id, worker_id).await?;
            Ok(Json(json!({ "success": true, "checklist": checklist })))
        }
        None => {
            let checklists = queries::get_activity_checklists(&state.pool, activity_id).await?;
            Ok(Json(json!({ "success": true, "checklists": checklists })))
        }
    }
}

/// GET /activities/{id}/checklist/{workerId}
pub async fn get_worker_checklist(
    State(state): State<Arc<AppState>>,
    Path((activity_id, worker_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let checklist = queries::get_checklist(&state.pool, activity_id, worker_id).await?;
    Ok(Json(json!({ "success": true, "checklist": checklist })))
}
