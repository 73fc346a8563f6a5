//! User Service - registration, roles and account removal

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::order_service::orders_for_user;
use crate::domain::{DomainError, Repository};
use crate::infrastructure::repositories::{cancellable, not_deleted};
use crate::infrastructure::{AppState, OrderRepository, UnitOfWork, UserRepository};
use crate::models::User;
use crate::models::user;

/// Input for registering a user
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role_id: Option<Uuid>,
}

/// Canonical form used for storage and uniqueness checks
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Find a live user by email, case-insensitively
pub async fn find_by_email(
    uow: &UnitOfWork,
    email: &str,
    cancel: &CancellationToken,
) -> Result<Option<User>, DomainError> {
    let email = normalize_email(email);
    cancellable(
        cancel,
        uow.read(move |txn| {
            Box::pin(async move {
                user::Entity::find()
                    .filter(user::Column::Email.eq(email))
                    .filter(not_deleted::<user::Entity>())
                    .one(txn)
                    .await
            })
        }),
    )
    .await
}

pub async fn register_user(
    state: &AppState,
    input: RegisterUser,
    cancel: &CancellationToken,
) -> Result<User, DomainError> {
    let email = normalize_email(&input.email);
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::invalid("a valid email is required"));
    }
    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(DomainError::invalid("full name is required"));
    }

    if let Some(role_id) = input.role_id
        && !state.role_repo.exists(role_id, cancel).await?
    {
        return Err(DomainError::NotFound);
    }

    if find_by_email(state.unit_of_work(), &email, cancel)
        .await?
        .is_some()
    {
        return Err(DomainError::conflict(format!(
            "email {} is already registered",
            email
        )));
    }

    let user = state
        .user_repo
        .add(
            User::new(email, full_name, input.password_hash, input.role_id),
            cancel,
        )
        .await?;

    tracing::info!(user = %user.id, "User registered");
    Ok(user)
}

pub async fn assign_role(
    state: &AppState,
    user_id: Uuid,
    role_id: Uuid,
    cancel: &CancellationToken,
) -> Result<User, DomainError> {
    let mut user = state
        .user_repo
        .get_by_id(user_id, cancel)
        .await?
        .ok_or(DomainError::NotFound)?;

    if !state.role_repo.exists(role_id, cancel).await? {
        return Err(DomainError::NotFound);
    }

    user.role_id = Some(role_id);
    state.user_repo.update(user, cancel).await
}

/// Soft-delete a user together with their live orders as one unit.
/// Returns the number of rows touched.
pub async fn deactivate_user(
    state: &AppState,
    user_id: Uuid,
    cancel: &CancellationToken,
) -> Result<u64, DomainError> {
    let uow = state.scoped_unit_of_work();
    let users = UserRepository::new(uow.clone());
    let orders = OrderRepository::new(uow.clone());

    uow.begin().await?;

    let outcome = async {
        let mut user = users
            .get_by_id(user_id, cancel)
            .await?
            .ok_or(DomainError::NotFound)?;
        let live_orders = orders_for_user(&uow, user_id, cancel).await?;

        user.is_active = false;
        users.delete_entity(user, cancel).await?;
        if !live_orders.is_empty() {
            orders.delete_many(live_orders, cancel).await?;
        }

        users.save_changes(cancel).await
    }
    .await;

    match outcome {
        Ok(affected) => {
            tracing::info!(user = %user_id, affected, "User deactivated");
            Ok(affected)
        }
        Err(e) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::error!("Failed to roll back deactivation: {}", rollback_err);
            }
            Err(e)
        }
    }
}
