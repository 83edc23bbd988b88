use crate::database::queries;
use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth — tries the admin table first, then workers. Returns the role
/// and a minimal profile for the client session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Nom d'utilisateur et mot de passe requis".to_string(),
        ));
    }

    if let Some(admin) =
        queries::get_admin_by_credentials(&state.pool, &body.username, &body.password).await?
    {
        return Ok(Json(json!({
            "success": true,
            "message": "Connexion admin réussie",
            "userType": "admin",
            "user": { "id": admin.id, "name": admin.name, "username": admin.username },
        })));
    }

    if let Some(worker) =
        queries::get_worker_by_credentials(&state.pool, &body.username, &body.password).await?
    {
        return Ok(Json(json!({
            "success": true,
            "message": "Connexion travailleur réussie",
            "userType": "worker",
            "user": { "id": worker.id, "name": worker.name, "username": worker.username },
        })));
    }

    Err(AppError::Unauthorized)
}
