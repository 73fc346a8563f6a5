//! Course catalog handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::error_response;
use crate::infrastructure::AppState;
use crate::services::course_service::{self, NewCourse};

// List published courses
pub async fn list_courses(State(state): State<AppState>) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match course_service::list_published(&state, &cancel).await {
        Ok(courses) => Json(json!({
            "total": courses.len(),
            "courses": courses
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<NewCourse>,
) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match course_service::create_course(&state, payload, &cancel).await {
        Ok(course) => (StatusCode::CREATED, Json(json!({ "course": course }))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_course(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match course_service::get_course(&state, id, &cancel).await {
        Ok(course) => Json(json!({ "course": course })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn publish_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match course_service::publish_course(&state, id, &cancel).await {
        Ok(course) => Json(json!({ "course": course })).into_response(),
        Err(e) => error_response(e),
    }
}

// Soft delete; the course stays visible under /admin/courses
pub async fn retire_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match course_service::retire_course(&state, id, &cancel).await {
        Ok(()) => Json(json!({ "message": "Course deleted" })).into_response(),
        Err(e) => error_response(e),
    }
}
