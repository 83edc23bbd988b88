pub mod activities;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod checklists;
pub mod export;
pub mod health;
pub mod workers;

use crate::state::AppState;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/attendance",
            post(attendance::record_attendance).get(attendance::list_attendance),
        )
        .route("/attendance/{id}", delete(attendance::delete_attendance))
        .route(
            "/activities",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/activities/{id}",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        .route(
            "/activities/{id}/assign",
            get(assignments::list_assigned_workers)
                .post(assignments::assign_worker)
                .delete(assignments::unassign_worker),
        )
        .route(
            "/activities/{id}/checklist",
            get(checklists::list_activity_checklists).post(checklists::save_checklist),
        )
        .route(
            "/activities/{id}/checklist/{worker_id}",
            get(checklists::get_worker_checklist),
        )
        .route(
            "/workers",
            get(workers::list_workers).post(workers::create_worker),
        )
        .route("/workers/{id}/attendance", get(workers::worker_attendance))
        .route("/workers/{id}/activities", get(workers::worker_activities))
        .route("/workers/{id}/checklists", get(workers::worker_checklists))
        .route("/auth", post(auth::login))
        .route("/export-attendance", get(export::export_attendance))
        .route("/health", get(health::health_check))
        .layer(cors)
        .with_state(state)
}
