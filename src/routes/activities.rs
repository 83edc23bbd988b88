use crate::database::models::NewActivity;
use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub max_participants: i64,
    pub transport_mode: String,
    pub category: String,
    pub created_by: Option<i64>,
    #[serde(default)]
    pub selected_workers: Vec<i64>,
}

impl ActivityPayload {
    fn validate(&self) -> Result<(), AppError> {
        let required = [
            self.title.trim(),
            self.location.trim(),
            self.start_time.trim(),
            self.end_time.trim(),
            self.transport_mode.trim(),
            self.category.trim(),
        ];

        if required.iter().any(|field| field.is_empty()) || self.max_participants <= 0 {
            return Err(AppError::Validation(
                "Tous les champs obligatoires doivent être remplis".to_string(),
            ));
        }

        Ok(())
    }

    fn to_new_activity(&self, created_by: i64) -> NewActivity {
        NewActivity {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            date: self.date,
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            max_participants: self.max_participants,
            transport_mode: self.transport_mode.trim().to_string(),
            category: self.category.trim().to_string(),
            created_by,
        }
    }
}

/// GET /activities
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let activities = queries::get_all_activities(&state.pool).await?;
    Ok(Json(json!({ "success": true, "activities": activities })))
}

/// POST /activities — creates the activity and assigns any pre-selected
/// workers in the same request.
pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ActivityPayload>,
) -> Result<Json<Value>, AppError> {
    body.validate()?;

    let created_by = body.created_by.ok_or_else(|| {
        AppError::Validation("Tous les champs obligatoires doivent être remplis".to_string())
    })?;

    let activity = queries::create_activity(&state.pool, &body.to_new_activity(created_by)).await?;

    for worker_id in &body.selected_workers {
        queries::assign_worker(&state.pool, activity.id, *worker_id).await?;
    }

    Ok(Json(json!({
        "success": true,
        "message": "Activité créée avec succès",
        "activity": activity,
    })))
}

/// GET /activities/{id}
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let activity = queries::get_activity_by_id(&state.pool, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activité non trouvée".to_string()))?;

    Ok(Json(json!({ "success": true, "activity": activity })))
}

/// PUT /activities/{id} — full replace; `created_by` is immutable.
pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
    Json(body): Json<ActivityPayload>,
) -> Result<Json<Value>, AppError> {
    body.validate()?;

    let existing = queries::get_activity_by_id(&state.pool, activity_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Activité non trouvée".to_string()))?;

    queries::update_activity(
        &state.pool,
        activity_id,
        &body.to_new_activity(existing.created_by),
    )
    .await?;

    let activity = queries::get_activity_by_id(&state.pool, activity_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Activité mise à jour avec succès",
        "activity": activity,
    })))
}

/// DELETE /activities/{id} — removes the activity with its assignments and
/// checklists in one transaction.
pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = queries::delete_activity(&state.pool, activity_id).await?;

    if !deleted {
        return Err(AppError::NotFound("Activité non trouvée".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Activité supprimée avec succès",
    })))
}
