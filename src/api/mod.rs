pub mod admin;
pub mod courses;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/:id",
            get(courses::get_course).delete(courses::retire_course),
        )
        .route("/courses/:id/publish", put(courses::publish_course))
        // Admin / audit
        .route("/admin/courses", get(admin::list_all_courses))
        .route("/admin/courses/:id/purge", delete(admin::purge_course))
        .with_state(state)
}

/// Map a domain failure onto an HTTP status with a JSON error body
pub fn error_response(e: DomainError) -> Response {
    let status = match &e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Store(_) => {
            tracing::error!("Store failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
