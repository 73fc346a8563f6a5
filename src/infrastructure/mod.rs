//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and schema bootstrap (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Transactional sessions (unit_of_work)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod config;
pub mod db;
pub mod repositories;
pub mod server;
pub mod state;
pub mod unit_of_work;

pub use repositories::*;
pub use state::AppState;
pub use unit_of_work::UnitOfWork;
