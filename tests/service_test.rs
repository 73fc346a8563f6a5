//! Service rules layered over the repositories

use learnhub::db;
use learnhub::domain::{DomainError, Repository};
use learnhub::infrastructure::AppState;
use learnhub::models::order::{STATUS_CANCELLED, STATUS_PAID, STATUS_PENDING};
use learnhub::models::{Course, Role, User};
use learnhub::services::course_service::{self, NewCourse};
use learnhub::services::order_service;
use learnhub::services::user_service::{self, RegisterUser};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn registration(email: &str) -> RegisterUser {
    RegisterUser {
        email: email.to_string(),
        full_name: "Linh Tran".to_string(),
        password_hash: "$argon2id$dummy".to_string(),
        role_id: None,
    }
}

// Helper to create an instructor and a published course
async fn published_course(state: &AppState, cancel: &CancellationToken) -> (User, Course) {
    let instructor = user_service::register_user(state, registration("lecturer@example.com"), cancel)
        .await
        .expect("Failed to register instructor");
    let course = course_service::create_course(
        state,
        NewCourse {
            title: "Rust Basics".to_string(),
            slug: "Rust Basics".to_string(),
            instructor_id: instructor.id,
            price_vnd: 499_000,
            description: None,
        },
        cancel,
    )
    .await
    .expect("Failed to create course");
    let course = course_service::publish_course(state, course.id, cancel)
        .await
        .expect("Failed to publish course");
    (instructor, course)
}

#[tokio::test]
async fn test_register_normalizes_and_rejects_duplicates() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let user = user_service::register_user(&state, registration("  Linh@Example.COM "), &cancel)
        .await
        .unwrap();
    assert_eq!(user.email, "linh@example.com");
    assert!(user.is_active);

    let dup = user_service::register_user(&state, registration("LINH@example.com"), &cancel).await;
    assert!(matches!(dup, Err(DomainError::Conflict(_))));

    let bad = user_service::register_user(&state, registration("not-an-email"), &cancel).await;
    assert!(matches!(bad, Err(DomainError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_register_with_unknown_role_is_not_found() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let mut input = registration("x@example.com");
    input.role_id = Some(Uuid::new_v4());
    let result = user_service::register_user(&state, input, &cancel).await;
    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_email_reusable_after_soft_delete() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let user = user_service::register_user(&state, registration("reuse@example.com"), &cancel)
        .await
        .unwrap();
    assert!(state.user_repo.delete(user.id, &cancel).await.unwrap());

    let again = user_service::register_user(&state, registration("reuse@example.com"), &cancel)
        .await
        .unwrap();
    assert_ne!(again.id, user.id);
}

#[tokio::test]
async fn test_assign_role() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let role = state
        .role_repo
        .add(Role::new("instructor", None), &cancel)
        .await
        .unwrap();
    let user = user_service::register_user(&state, registration("r@example.com"), &cancel)
        .await
        .unwrap();

    let updated = user_service::assign_role(&state, user.id, role.id, &cancel)
        .await
        .unwrap();
    assert_eq!(updated.role_id, Some(role.id));
    assert!(updated.updated_at.is_some());

    // A retired role cannot be assigned
    assert!(state.role_repo.delete(role.id, &cancel).await.unwrap());
    let result = user_service::assign_role(&state, user.id, role.id, &cancel).await;
    assert!(matches!(result, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_deactivate_user_cascades_to_orders() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let (_, course) = published_course(&state, &cancel).await;
    let student = user_service::register_user(&state, registration("s@example.com"), &cancel)
        .await
        .unwrap();
    let first = order_service::place_order(&state, student.id, course.id, &cancel)
        .await
        .unwrap();
    let second = order_service::place_order(&state, student.id, course.id, &cancel)
        .await
        .unwrap();

    let affected = user_service::deactivate_user(&state, student.id, &cancel)
        .await
        .unwrap();
    assert_eq!(affected, 3);

    assert!(state.user_repo.get_by_id(student.id, &cancel).await.unwrap().is_none());
    assert!(state.order_repo.get_by_id(first.id, &cancel).await.unwrap().is_none());
    assert!(state.order_repo.get_by_id(second.id, &cancel).await.unwrap().is_none());

    let tombstone = state
        .user_repo
        .get_all_including_deleted(&cancel)
        .await
        .unwrap()
        .into_iter()
        .find(|u| u.id == student.id)
        .unwrap();
    assert!(tombstone.is_deleted);
    assert!(!tombstone.is_active);
}

#[tokio::test]
async fn test_deactivate_unknown_user_rolls_back() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let result = user_service::deactivate_user(&state, Uuid::new_v4(), &cancel).await;
    assert!(matches!(result, Err(DomainError::NotFound)));

    // The session was released: ordinary writes still go through
    user_service::register_user(&state, registration("after@example.com"), &cancel)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_course_rules() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let (instructor, course) = published_course(&state, &cancel).await;
    assert_eq!(course.slug, "rust-basics");
    assert!(course.is_published);

    let dup = course_service::create_course(
        &state,
        NewCourse {
            title: "Rust Basics Again".to_string(),
            slug: "rust-basics".to_string(),
            instructor_id: instructor.id,
            price_vnd: 0,
            description: None,
        },
        &cancel,
    )
    .await;
    assert!(matches!(dup, Err(DomainError::Conflict(_))));

    let negative = course_service::create_course(
        &state,
        NewCourse {
            title: "Free Money".to_string(),
            slug: "free-money".to_string(),
            instructor_id: instructor.id,
            price_vnd: -1,
            description: None,
        },
        &cancel,
    )
    .await;
    assert!(matches!(negative, Err(DomainError::InvalidArgument(_))));

    let orphan = course_service::create_course(
        &state,
        NewCourse {
            title: "Nobody Teaches".to_string(),
            slug: "nobody".to_string(),
            instructor_id: Uuid::new_v4(),
            price_vnd: 0,
            description: None,
        },
        &cancel,
    )
    .await;
    assert!(matches!(orphan, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_list_published_excludes_drafts_and_retired() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let (instructor, published) = published_course(&state, &cancel).await;
    let draft = course_service::create_course(
        &state,
        NewCourse {
            title: "Advanced Lifetimes".to_string(),
            slug: "advanced-lifetimes".to_string(),
            instructor_id: instructor.id,
            price_vnd: 899_000,
            description: Some("Draft".to_string()),
        },
        &cancel,
    )
    .await
    .unwrap();

    let listed = course_service::list_published(&state, &cancel).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, published.id);

    course_service::publish_course(&state, draft.id, &cancel)
        .await
        .unwrap();
    let listed = course_service::list_published(&state, &cancel).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Advanced Lifetimes", "Rust Basics"]);

    course_service::retire_course(&state, published.id, &cancel)
        .await
        .unwrap();
    let listed = course_service::list_published(&state, &cancel).await.unwrap();
    assert_eq!(listed.len(), 1);

    let again = course_service::retire_course(&state, published.id, &cancel).await;
    assert!(matches!(again, Err(DomainError::NotFound)));
}

#[tokio::test]
async fn test_order_lifecycle() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let (_, course) = published_course(&state, &cancel).await;
    let student = user_service::register_user(&state, registration("buyer@example.com"), &cancel)
        .await
        .unwrap();

    let order = order_service::place_order(&state, student.id, course.id, &cancel)
        .await
        .unwrap();
    assert_eq!(order.status, STATUS_PENDING);
    assert_eq!(order.amount_vnd, 499_000);

    let paid = order_service::mark_paid(&state, order.id, "VNP-14028832".to_string(), &cancel)
        .await
        .unwrap();
    assert_eq!(paid.status, STATUS_PAID);
    assert_eq!(paid.payment_ref.as_deref(), Some("VNP-14028832"));

    let late_cancel = order_service::cancel_order(&state, order.id, &cancel).await;
    assert!(matches!(late_cancel, Err(DomainError::Conflict(_))));

    let other = order_service::place_order(&state, student.id, course.id, &cancel)
        .await
        .unwrap();
    let cancelled = order_service::cancel_order(&state, other.id, &cancel)
        .await
        .unwrap();
    assert_eq!(cancelled.status, STATUS_CANCELLED);
}

#[tokio::test]
async fn test_cannot_order_unpublished_course() {
    let state = setup_test_state().await;
    let cancel = CancellationToken::new();

    let (_, course) = published_course(&state, &cancel).await;
    course_service::unpublish_course(&state, course.id, &cancel)
        .await
        .unwrap();
    let student = user_service::register_user(&state, registration("late@example.com"), &cancel)
        .await
        .unwrap();

    let result = order_service::place_order(&state, student.id, course.id, &cancel).await;
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}
