//! Order Service - checkout and payment status transitions

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::repositories::{cancellable, not_deleted};
use crate::infrastructure::{AppState, UnitOfWork};
use crate::models::Order;
use crate::models::order::{self, STATUS_CANCELLED, STATUS_PAID, STATUS_PENDING};

/// Create a pending order for a published course at its current price
pub async fn place_order(
    state: &AppState,
    user_id: Uuid,
    course_id: Uuid,
    cancel: &CancellationToken,
) -> Result<Order, DomainError> {
    if !state.user_repo.exists(user_id, cancel).await? {
        return Err(DomainError::NotFound);
    }

    let course = state
        .course_repo
        .get_by_id(course_id, cancel)
        .await?
        .ok_or(DomainError::NotFound)?;

    if !course.is_published {
        return Err(DomainError::conflict("course is not open for enrollment"));
    }

    let order = state
        .order_repo
        .add(Order::new(user_id, course.id, course.price_vnd), cancel)
        .await?;

    tracing::info!(order = %order.id, course = %course.id, "Order placed");
    Ok(order)
}

/// Record a successful payment. Only pending orders can be paid.
pub async fn mark_paid(
    state: &AppState,
    order_id: Uuid,
    payment_ref: String,
    cancel: &CancellationToken,
) -> Result<Order, DomainError> {
    if payment_ref.trim().is_empty() {
        return Err(DomainError::invalid("payment reference is required"));
    }
    transition(state, order_id, STATUS_PAID, Some(payment_ref), cancel).await
}

/// Abandon a pending order
pub async fn cancel_order(
    state: &AppState,
    order_id: Uuid,
    cancel: &CancellationToken,
) -> Result<Order, DomainError> {
    transition(state, order_id, STATUS_CANCELLED, None, cancel).await
}

async fn transition(
    state: &AppState,
    order_id: Uuid,
    to: &str,
    payment_ref: Option<String>,
    cancel: &CancellationToken,
) -> Result<Order, DomainError> {
    let mut order = state
        .order_repo
        .get_by_id(order_id, cancel)
        .await?
        .ok_or(DomainError::NotFound)?;

    if order.status != STATUS_PENDING {
        return Err(DomainError::conflict(format!(
            "order is {}, expected {}",
            order.status, STATUS_PENDING
        )));
    }

    order.status = to.to_string();
    if payment_ref.is_some() {
        order.payment_ref = payment_ref;
    }

    let order = state.order_repo.update(order, cancel).await?;
    tracing::info!(order = %order.id, status = %order.status, "Order status changed");
    Ok(order)
}

/// Live orders belonging to a user, oldest first
pub async fn orders_for_user(
    uow: &UnitOfWork,
    user_id: Uuid,
    cancel: &CancellationToken,
) -> Result<Vec<Order>, DomainError> {
    cancellable(
        cancel,
        uow.read(move |txn| {
            Box::pin(async move {
                order::Entity::find()
                    .filter(order::Column::UserId.eq(user_id))
                    .filter(not_deleted::<order::Entity>())
                    .order_by_asc(order::Column::CreatedAt)
                    .all(txn)
                    .await
            })
        }),
    )
    .await
}
