//! Persistence layer error types

use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Errors that can occur in the persistence layer
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Item not found
    #[error("Item not found: {entity_type} with identifier '{identifier}'")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Duplicate entry
    #[error("Duplicate entry: {entity_type} with id '{id}' already exists")]
    Duplicate { entity_type: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from SQLx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PersistenceError {
    /// Whether retrying the same operation could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Database(sqlx::Error::PoolTimedOut) => true,
            Self::Database(sqlx::Error::Io(_)) => true,
            _ => false,
        }
    }
}

impl From<PersistenceError> for AppError {
    fn from(error: PersistenceError) -> Self {
        let recoverable = error.is_transient();
        AppError::new(ErrorCode::Database, error.to_string())
            .with_recoverable(recoverable)
            .with_cause(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_error() {
        let app: AppError = PersistenceError::Connection("refused".to_string()).into();
        assert_eq!(app.code(), ErrorCode::Database);
        assert!(app.is_recoverable());
        assert_eq!(app.message(), "Database connection error: refused");

        let app: AppError = PersistenceError::Duplicate {
            entity_type: "run".to_string(),
            id: "r1".to_string(),
        }
        .into();
        assert!(!app.is_recoverable());
    }
}
