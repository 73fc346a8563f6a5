//! Domain layer - Pure business abstractions
//!
//! Trait definitions and domain error types. No Axum here; SeaORM appears
//! only as the carried store error.

pub mod entity;
pub mod errors;
pub mod repositories;

pub use entity::AuditedEntity;
pub use errors::DomainError;
pub use repositories::*;
