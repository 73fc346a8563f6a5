//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::Repository;
use crate::infrastructure::unit_of_work::UnitOfWork;
use crate::infrastructure::{CourseRepository, OrderRepository, RoleRepository, UserRepository};
use crate::models::{Course, Order, Role, User};

/// Application state shared across all handlers
///
/// The shared unit of work is never begun: every call through these
/// repositories commits on its own. Composite operations take a
/// [`scoped_unit_of_work`](Self::scoped_unit_of_work) instead.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    uow: Arc<UnitOfWork>,
    /// User repository
    pub user_repo: Arc<dyn Repository<User>>,
    /// Role repository
    pub role_repo: Arc<dyn Repository<Role>>,
    /// Course repository
    pub course_repo: Arc<dyn Repository<Course>>,
    /// Order repository
    pub order_repo: Arc<dyn Repository<Order>>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let uow = Arc::new(UnitOfWork::new(db.clone()));

        Self {
            user_repo: Arc::new(UserRepository::new(uow.clone())),
            role_repo: Arc::new(RoleRepository::new(uow.clone())),
            course_repo: Arc::new(CourseRepository::new(uow.clone())),
            order_repo: Arc::new(OrderRepository::new(uow.clone())),
            uow,
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The autocommit session behind the shared repositories
    pub fn unit_of_work(&self) -> &Arc<UnitOfWork> {
        &self.uow
    }

    /// A fresh session for one composite operation
    pub fn scoped_unit_of_work(&self) -> Arc<UnitOfWork> {
        Arc::new(UnitOfWork::new(self.db.clone()))
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}
