//! Repository implementations using SeaORM

pub mod sea_orm_repository;

use std::future::Future;

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, Iterable};
use tokio_util::sync::CancellationToken;

use crate::domain::DomainError;
use crate::models::{self, AuditedTable};

pub use sea_orm_repository::SeaOrmRepository;

pub type UserRepository = SeaOrmRepository<models::user::Entity>;
pub type RoleRepository = SeaOrmRepository<models::role::Entity>;
pub type CourseRepository = SeaOrmRepository<models::course::Entity>;
pub type OrderRepository = SeaOrmRepository<models::order::Entity>;

/// The live-row predicate every filtered read goes through
pub(crate) fn not_deleted<E: AuditedTable>() -> SimpleExpr {
    E::deleted_column().eq(false)
}

/// Promote every loaded value to `Set` so inserts and updates write the
/// full row, not just the fields touched since loading.
pub(crate) fn all_set<A: ActiveModelTrait>(mut active: A) -> A {
    for col in <A::Entity as EntityTrait>::Column::iter() {
        if let Some(value) = active.get(col).into_value() {
            active.set(col, value);
        }
    }
    active
}

/// Race `fut` against `cancel`. A token that already fired short-circuits
/// before the store is contacted. One that fires mid-flight drops the
/// store call, which rolls back its own transaction, or its savepoint when
/// it runs inside an open unit of work.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    if cancel.is_cancelled() {
        return Err(DomainError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::warn!("store call cancelled");
            Err(DomainError::Cancelled)
        }
        result = fut => result,
    }
}
