//! Transactional session shared by repositories
//!
//! Without an open transaction every repository call runs in its own
//! transaction and commits before returning. After [`UnitOfWork::begin`],
//! calls write into one shared transaction and nothing is visible outside
//! it until [`UnitOfWork::save_changes`].

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Result of a write scope: the value handed back to the caller and the
/// number of rows it touched.
pub struct Written<T> {
    pub value: T,
    pub affected: u64,
}

impl<T> Written<T> {
    pub fn new(value: T, affected: u64) -> Self {
        Self { value, affected }
    }
}

struct Pending {
    txn: DatabaseTransaction,
    affected: u64,
}

pub struct UnitOfWork {
    db: DatabaseConnection,
    pending: Mutex<Option<Pending>>,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Mutex::new(None),
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Open a transaction that collects writes until `save_changes`.
    /// Calling it while one is already open keeps the existing one.
    pub async fn begin(&self) -> Result<(), DomainError> {
        let mut pending = self.pending.lock().await;
        if pending.is_none() {
            let txn = self.db.begin().await?;
            *pending = Some(Pending { txn, affected: 0 });
            tracing::debug!("unit of work opened");
        }
        Ok(())
    }

    pub async fn is_pending(&self) -> bool {
        self.pending.lock().await.is_some()
    }

    /// Commit the open transaction and return how many rows it touched.
    /// Returns 0 when nothing is pending.
    pub async fn save_changes(&self) -> Result<u64, DomainError> {
        let Some(Pending { txn, affected }) = self.pending.lock().await.take() else {
            return Ok(0);
        };
        txn.commit().await?;
        tracing::debug!(affected, "unit of work committed");
        Ok(affected)
    }

    /// Discard the open transaction, if any.
    pub async fn rollback(&self) -> Result<(), DomainError> {
        if let Some(Pending { txn, affected }) = self.pending.lock().await.take() {
            txn.rollback().await?;
            tracing::debug!(discarded = affected, "unit of work rolled back");
        }
        Ok(())
    }

    /// Run `op` against the session. Writes join the open transaction if
    /// there is one, as a nested savepoint, otherwise they commit
    /// immediately.
    pub async fn write<T, F>(&self, op: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<Written<T>, DbErr>>
            + Send,
    {
        let mut pending = self.pending.lock().await;
        if let Some(open) = pending.as_mut() {
            // Each call runs in its own savepoint: an op that fails or is
            // dropped partway leaves nothing in the shared transaction.
            let savepoint = open.txn.begin().await?;
            let written = op(&savepoint).await?;
            savepoint.commit().await?;
            open.affected += written.affected;
            return Ok(written.value);
        }
        // Autocommit calls do not hold the session lock
        drop(pending);

        let txn = self.db.begin().await?;
        // Dropping txn on error rolls it back
        let written = op(&txn).await?;
        txn.commit().await?;
        Ok(written.value)
    }

    /// Run a read-only `op`. Reads see the open transaction's own writes.
    pub async fn read<T, F>(&self, op: F) -> Result<T, DomainError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, DbErr>> + Send,
    {
        let pending = self.pending.lock().await;
        if let Some(open) = pending.as_ref() {
            return Ok(op(&open.txn).await?);
        }
        drop(pending);

        let txn = self.db.begin().await?;
        let value = op(&txn).await?;
        txn.commit().await?;
        Ok(value)
    }
}
