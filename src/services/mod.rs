//! Services Layer
//!
//! Business rules applied before calling into the repositories. Services
//! can be called directly or through Axum handlers.

pub mod course_service;
pub mod order_service;
pub mod user_service;
