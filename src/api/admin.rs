//! Admin audit views: soft-deleted rows included, purge for good

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

pub async fn list_all_courses(State(state): State<AppState>) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match state.course_repo.get_all_including_deleted(&cancel).await {
        Ok(mut courses) => {
            courses.sort_by_key(|c| c.created_at);
            let deleted = courses.iter().filter(|c| c.is_deleted).count();
            Json(json!({
                "total": courses.len(),
                "deleted": deleted,
                "courses": courses
            }))
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn purge_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let cancel = CancellationToken::new();
    match state.course_repo.hard_delete(id, &cancel).await {
        Ok(true) => Json(json!({ "message": "Course purged" })).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Course not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
