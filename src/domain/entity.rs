//! Identity and audit shape shared by every persisted entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Capability contract for entities managed by a [`Repository`](super::Repository).
///
/// Implementors carry an immutable id and creation time, a nullable update
/// time and a soft-delete flag. The stamping methods are the only way the
/// repository mutates audit fields, so every entity ages the same way.
pub trait AuditedEntity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn is_deleted(&self) -> bool;

    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
    fn clear_updated_at(&mut self);
    fn set_deleted(&mut self, deleted: bool);

    /// An entity with the nil id was never given an identity and stands in
    /// for "no entity" at the repository boundary.
    fn is_absent(&self) -> bool {
        self.id().is_nil()
    }

    /// Reset the audit fields of a row about to be inserted: created now,
    /// never updated, live.
    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.set_created_at(now);
        self.clear_updated_at();
        self.set_deleted(false);
    }

    /// Most recent audit timestamp.
    fn last_touched(&self) -> DateTime<Utc> {
        self.updated_at().unwrap_or_else(|| self.created_at())
    }

    /// Set `updated_at` to `now`, never moving it backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        let at = now.max(self.last_touched());
        self.set_updated_at(at);
    }

    fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.set_deleted(true);
        self.touch(now);
    }
}
