//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{AuditedEntity, DomainError};

/// Uniform CRUD with soft-delete visibility for any audited entity.
///
/// Normal reads never return rows flagged as deleted. Lookups and deletes by
/// id report absence as `None` / `false`. Every call observes `cancel` and
/// returns [`DomainError::Cancelled`] if it fires before the store answers.
#[async_trait]
pub trait Repository<M: AuditedEntity>: Send + Sync {
    /// Find a live entity by id
    async fn get_by_id(&self, id: Uuid, cancel: &CancellationToken)
    -> Result<Option<M>, DomainError>;

    /// All live entities, in no particular order
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<M>, DomainError>;

    /// Every row, soft-deleted ones included. Meant for admin and audit views.
    async fn get_all_including_deleted(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<M>, DomainError>;

    /// Whether a live entity with this id exists
    async fn exists(&self, id: Uuid, cancel: &CancellationToken) -> Result<bool, DomainError>;

    /// Insert an entity, stamping its creation time
    async fn add(&self, entity: M, cancel: &CancellationToken) -> Result<M, DomainError>;

    /// Insert a batch as one unit: all rows commit or none do
    async fn add_many(
        &self,
        entities: Vec<M>,
        cancel: &CancellationToken,
    ) -> Result<Vec<M>, DomainError>;

    /// Persist the full state of an entity and advance its `updated_at`
    async fn update(&self, entity: M, cancel: &CancellationToken) -> Result<M, DomainError>;

    /// Soft-delete by id. `false` when no live entity matches.
    async fn delete(&self, id: Uuid, cancel: &CancellationToken) -> Result<bool, DomainError>;

    /// Soft-delete the given instance
    async fn delete_entity(&self, entity: M, cancel: &CancellationToken)
    -> Result<bool, DomainError>;

    /// Soft-delete a batch as one unit
    async fn delete_many(
        &self,
        entities: Vec<M>,
        cancel: &CancellationToken,
    ) -> Result<bool, DomainError>;

    /// Remove the row for good, deleted or not. `false` when no row exists.
    async fn hard_delete(&self, id: Uuid, cancel: &CancellationToken)
    -> Result<bool, DomainError>;

    /// Commit pending unit-of-work changes, returning the affected row count
    async fn save_changes(&self, cancel: &CancellationToken) -> Result<u64, DomainError>;
}
