use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Boundary error for all HTTP handlers. Database detail is logged
/// server-side and never included in the response body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Identifiants incorrects")]
    Unauthorized,

    #[error("Erreur serveur")]
    Database(#[from] sqlx::Error),

    #[error("Erreur serveur")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Database(err) => {
                error!("database error: {err:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Csv(err) => {
                error!("csv export error: {err:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
