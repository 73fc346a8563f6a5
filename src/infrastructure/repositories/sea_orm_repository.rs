//! SeaORM implementation of the generic Repository

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, UpdateOne,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{all_set, cancellable, not_deleted};
use crate::domain::{AuditedEntity, DomainError, Repository};
use crate::infrastructure::unit_of_work::{UnitOfWork, Written};
use crate::models::AuditedTable;

/// SeaORM-based repository for any audited table
pub struct SeaOrmRepository<E> {
    uow: Arc<UnitOfWork>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmRepository<E> {
    pub fn new(uow: Arc<UnitOfWork>) -> Self {
        Self {
            uow,
            _entity: PhantomData,
        }
    }

    pub fn unit_of_work(&self) -> &Arc<UnitOfWork> {
        &self.uow
    }
}

fn require<M: AuditedEntity>(entity: &M, op: &str) -> Result<(), DomainError> {
    if entity.is_absent() {
        return Err(DomainError::invalid(format!("{}: entity is required", op)));
    }
    Ok(())
}

fn require_batch<M: AuditedEntity>(entities: &[M], op: &str) -> Result<(), DomainError> {
    if entities.is_empty() {
        return Err(DomainError::invalid(format!("{}: entities are required", op)));
    }
    entities.iter().try_for_each(|e| require(e, op))
}

fn table<E: EntityTrait>() -> String {
    E::default().table_name().to_owned()
}

/// Full-row UPDATE restricted to a live row. The creation stamp is left out
/// so it cannot be rewritten, and a soft-deleted row matches nothing, which
/// SeaORM reports as `DbErr::RecordNotUpdated`.
fn live_update<E>(entity: E::Model) -> UpdateOne<E::ActiveModel>
where
    E: AuditedTable,
    E::ActiveModel: ActiveModelTrait<Entity = E> + From<E::Model>,
{
    let mut active = all_set(E::ActiveModel::from(entity));
    active.not_set(E::created_at_column());
    E::update(active).filter(not_deleted::<E>())
}

#[async_trait]
impl<E> Repository<E::Model> for SeaOrmRepository<E>
where
    E: AuditedTable,
    E::Model: AuditedEntity + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + From<E::Model> + Send,
{
    async fn get_by_id(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Result<Option<E::Model>, DomainError> {
        tracing::debug!(table = table::<E>(), %id, "get_by_id");
        cancellable(
            cancel,
            self.uow.read(move |txn| {
                Box::pin(async move {
                    E::find()
                        .filter(E::id_column().eq(id))
                        .filter(not_deleted::<E>())
                        .one(txn)
                        .await
                })
            }),
        )
        .await
    }

    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<E::Model>, DomainError> {
        tracing::debug!(table = table::<E>(), "get_all");
        cancellable(
            cancel,
            self.uow.read(|txn| {
                Box::pin(async move { E::find().filter(not_deleted::<E>()).all(txn).await })
            }),
        )
        .await
    }

    async fn get_all_including_deleted(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<E::Model>, DomainError> {
        tracing::debug!(table = table::<E>(), "get_all_including_deleted");
        cancellable(
            cancel,
            self.uow
                .read(|txn| Box::pin(async move { E::find().all(txn).await })),
        )
        .await
    }

    async fn exists(&self, id: Uuid, cancel: &CancellationToken) -> Result<bool, DomainError> {
        Ok(self.get_by_id(id, cancel).await?.is_some())
    }

    async fn add(
        &self,
        mut entity: E::Model,
        cancel: &CancellationToken,
    ) -> Result<E::Model, DomainError> {
        require(&entity, "add")?;
        entity.stamp_created(Utc::now());
        tracing::debug!(table = table::<E>(), id = %entity.id(), "add");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    let active = all_set(E::ActiveModel::from(entity.clone()));
                    let affected = E::insert(active).exec_without_returning(txn).await?;
                    Ok(Written::new(entity, affected))
                })
            }),
        )
        .await
    }

    async fn add_many(
        &self,
        mut entities: Vec<E::Model>,
        cancel: &CancellationToken,
    ) -> Result<Vec<E::Model>, DomainError> {
        require_batch(&entities, "add_many")?;
        let now = Utc::now();
        for entity in entities.iter_mut() {
            entity.stamp_created(now);
        }
        tracing::debug!(table = table::<E>(), count = entities.len(), "add_many");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    let actives = entities
                        .iter()
                        .cloned()
                        .map(|e| all_set(E::ActiveModel::from(e)));
                    let affected = E::insert_many(actives).exec_without_returning(txn).await?;
                    Ok(Written::new(entities, affected))
                })
            }),
        )
        .await
    }

    async fn update(
        &self,
        mut entity: E::Model,
        cancel: &CancellationToken,
    ) -> Result<E::Model, DomainError> {
        require(&entity, "update")?;
        entity.touch(Utc::now());
        tracing::debug!(table = table::<E>(), id = %entity.id(), "update");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    let saved = live_update::<E>(entity).exec(txn).await?;
                    Ok(Written::new(saved, 1))
                })
            }),
        )
        .await
    }

    async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<bool, DomainError> {
        tracing::debug!(table = table::<E>(), %id, "delete");

        // Lookup and flag share one write scope so the row cannot vanish in between
        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    let found = E::find()
                        .filter(E::id_column().eq(id))
                        .filter(not_deleted::<E>())
                        .one(txn)
                        .await?;

                    let Some(mut entity) = found else {
                        return Ok(Written::new(false, 0));
                    };

                    entity.mark_deleted(Utc::now());
                    live_update::<E>(entity).exec(txn).await?;
                    Ok(Written::new(true, 1))
                })
            }),
        )
        .await
    }

    async fn delete_entity(
        &self,
        mut entity: E::Model,
        cancel: &CancellationToken,
    ) -> Result<bool, DomainError> {
        require(&entity, "delete")?;
        entity.mark_deleted(Utc::now());
        tracing::debug!(table = table::<E>(), id = %entity.id(), "delete_entity");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    match live_update::<E>(entity).exec(txn).await {
                        Ok(_) => Ok(Written::new(true, 1)),
                        // Already soft-deleted or never stored
                        Err(DbErr::RecordNotUpdated) => Ok(Written::new(false, 0)),
                        Err(e) => Err(e),
                    }
                })
            }),
        )
        .await
    }

    async fn delete_many(
        &self,
        mut entities: Vec<E::Model>,
        cancel: &CancellationToken,
    ) -> Result<bool, DomainError> {
        require_batch(&entities, "delete_many")?;
        let now = Utc::now();
        for entity in entities.iter_mut() {
            entity.mark_deleted(now);
        }
        tracing::debug!(table = table::<E>(), count = entities.len(), "delete_many");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    // Every member must still be live; one miss fails the batch
                    let count = entities.len() as u64;
                    for entity in entities {
                        live_update::<E>(entity).exec(txn).await?;
                    }
                    Ok(Written::new(true, count))
                })
            }),
        )
        .await
    }

    async fn hard_delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<bool, DomainError> {
        tracing::info!(table = table::<E>(), %id, "hard_delete");

        cancellable(
            cancel,
            self.uow.write(move |txn| {
                Box::pin(async move {
                    let result = E::delete_many()
                        .filter(E::id_column().eq(id))
                        .exec(txn)
                        .await?;
                    Ok(Written::new(result.rows_affected > 0, result.rows_affected))
                })
            }),
        )
        .await
    }

    async fn save_changes(&self, cancel: &CancellationToken) -> Result<u64, DomainError> {
        cancellable(cancel, self.uow.save_changes()).await
    }
}
