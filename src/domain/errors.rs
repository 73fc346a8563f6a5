//! Domain error types
//!
//! Absence on id lookups is a value (`None` / `false`), never an error.
//! Everything else the data layer can fail with lives here.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Missing or malformed required input. Raised before the store is touched.
    InvalidArgument(String),
    /// A business rule needed an entity that is absent or soft-deleted
    NotFound,
    /// Uniqueness or state-transition violation
    Conflict(String),
    /// Failure reported by the underlying store, carried unchanged
    Store(sea_orm::DbErr),
    /// The caller's cancellation token fired before the operation completed
    Cancelled,
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidArgument(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        DomainError::Conflict(msg.into())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Store(e) => write!(f, "Database error: {}", e),
            DomainError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DomainError::Store(e) => Some(e),
            _ => None,
        }
    }
}

// Store faults keep the original DbErr so callers can inspect it
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn store_fault_exposes_source() {
        let err = DomainError::from(sea_orm::DbErr::Custom("disk full".to_string()));
        assert!(matches!(err, DomainError::Store(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn value_errors_have_no_source() {
        assert!(DomainError::NotFound.source().is_none());
        assert!(DomainError::invalid("entity is required").source().is_none());
        assert_eq!(DomainError::Cancelled.to_string(), "Operation cancelled");
    }
}
