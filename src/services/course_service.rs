//! Course Service - catalog rules on top of the course repository

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::repositories::{cancellable, not_deleted};
use crate::infrastructure::{AppState, UnitOfWork};
use crate::models::Course;
use crate::models::course;

/// Input for creating a course
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub slug: String,
    pub instructor_id: Uuid,
    pub price_vnd: i64,
    pub description: Option<String>,
}

/// Lowercase, whitespace and underscores collapsed to single dashes,
/// anything else non-alphanumeric dropped.
pub fn normalize_slug(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

pub async fn find_by_slug(
    uow: &UnitOfWork,
    slug: &str,
    cancel: &CancellationToken,
) -> Result<Option<Course>, DomainError> {
    let slug = normalize_slug(slug);
    cancellable(
        cancel,
        uow.read(move |txn| {
            Box::pin(async move {
                course::Entity::find()
                    .filter(course::Column::Slug.eq(slug))
                    .filter(not_deleted::<course::Entity>())
                    .one(txn)
                    .await
            })
        }),
    )
    .await
}

pub async fn create_course(
    state: &AppState,
    input: NewCourse,
    cancel: &CancellationToken,
) -> Result<Course, DomainError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(DomainError::invalid("title is required"));
    }
    let slug = normalize_slug(&input.slug);
    if slug.is_empty() {
        return Err(DomainError::invalid("slug is required"));
    }
    if input.price_vnd < 0 {
        return Err(DomainError::invalid("price cannot be negative"));
    }

    if !state.user_repo.exists(input.instructor_id, cancel).await? {
        return Err(DomainError::NotFound);
    }

    if find_by_slug(state.unit_of_work(), &slug, cancel)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(format!("slug {} is taken", slug)));
    }

    let mut new_course = Course::new(title, slug, input.instructor_id, input.price_vnd);
    new_course.description = input.description;

    let created = state.course_repo.add(new_course, cancel).await?;
    tracing::info!(course = %created.id, slug = %created.slug, "Course created");
    Ok(created)
}

pub async fn get_course(
    state: &AppState,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<Course, DomainError> {
    state
        .course_repo
        .get_by_id(id, cancel)
        .await?
        .ok_or(DomainError::NotFound)
}

pub async fn publish_course(
    state: &AppState,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<Course, DomainError> {
    set_published(state, id, true, cancel).await
}

pub async fn unpublish_course(
    state: &AppState,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<Course, DomainError> {
    set_published(state, id, false, cancel).await
}

async fn set_published(
    state: &AppState,
    id: Uuid,
    published: bool,
    cancel: &CancellationToken,
) -> Result<Course, DomainError> {
    let mut course = get_course(state, id, cancel).await?;
    course.is_published = published;
    state.course_repo.update(course, cancel).await
}

/// Live, published courses sorted by title
pub async fn list_published(
    state: &AppState,
    cancel: &CancellationToken,
) -> Result<Vec<Course>, DomainError> {
    cancellable(
        cancel,
        state.unit_of_work().read(|txn| {
            Box::pin(async move {
                course::Entity::find()
                    .filter(course::Column::IsPublished.eq(true))
                    .filter(not_deleted::<course::Entity>())
                    .order_by_asc(course::Column::Title)
                    .all(txn)
                    .await
            })
        }),
    )
    .await
}

/// Soft-delete a course, keeping it for the audit view
pub async fn retire_course(
    state: &AppState,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<(), DomainError> {
    if !state.course_repo.delete(id, cancel).await? {
        return Err(DomainError::NotFound);
    }
    tracing::info!(course = %id, "Course retired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_lowercased_and_dashed() {
        assert_eq!(normalize_slug("  Rust for Beginners "), "rust-for-beginners");
        assert_eq!(normalize_slug("Async__Rust -- 101"), "async-rust-101");
        assert_eq!(normalize_slug("C++ & You!"), "c-you");
    }

    #[test]
    fn slug_of_punctuation_is_empty() {
        assert_eq!(normalize_slug("!!!"), "");
        assert_eq!(normalize_slug("   "), "");
    }
}
