//! Structural validation of untrusted agent records

use serde_json::Value;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    fn invalid(field: &str, reason: &str) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Collapse a list of problems into one validation [`AppError`]
pub fn into_app_error(errors: &[ValidationError]) -> AppError {
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    AppError::new(ErrorCode::Validation, message)
}

/// Report every structural problem of a raw agent record
pub fn validate_agent(record: &Value) -> Result<(), Vec<ValidationError>> {
    let Some(object) = record.as_object() else {
        return Err(vec![ValidationError::invalid(
            "agent",
            "Agent must be an object",
        )]);
    };

    let mut errors = Vec::new();

    for field in ["id", "name"] {
        match object.get(field) {
            None | Some(Value::Null) => errors.push(ValidationError::MissingField(field.to_string())),
            Some(Value::String(s)) if s.is_empty() => {
                errors.push(ValidationError::MissingField(field.to_string()))
            }
            Some(Value::String(_)) => {}
            Some(_) => errors.push(ValidationError::invalid(field, "must be a string")),
        }
    }

    for field in ["tools", "permissions"] {
        if let Some(value) = object.get(field) {
            if !value.is_object() && !value.is_null() {
                errors.push(ValidationError::invalid(field, "must be an object"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
