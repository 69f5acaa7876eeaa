//! Application error model.
//!
//! Every failure that crosses the bridge or needs to reach the user is
//! normalized into [`AppError`]: a machine [`ErrorCode`], the raw message,
//! an optional cause and a recoverability flag. The user-facing text comes
//! from a fixed code table, never from the raw message, unless the code has
//! no entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of machine error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A bridge call threw or rejected
    #[serde(rename = "INVOKE_ERROR")]
    Invoke,
    /// The backend database failed
    #[serde(rename = "DATABASE_ERROR")]
    Database,
    /// A domain record was malformed
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    /// Local key/value storage failed
    #[serde(rename = "STORAGE_ERROR")]
    Storage,
    /// Network failure
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    /// Anything else
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Invoke => "INVOKE_ERROR",
            ErrorCode::Database => "DATABASE_ERROR",
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Storage => "STORAGE_ERROR",
            ErrorCode::Network => "NETWORK_ERROR",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing text per error code
const ERROR_MESSAGES: &[(ErrorCode, &str)] = &[
    (
        ErrorCode::Invoke,
        "Failed to communicate with the backend. Please try again.",
    ),
    (
        ErrorCode::Database,
        "A database error occurred. Your changes may not have been saved.",
    ),
    (
        ErrorCode::Validation,
        "The provided data is invalid. Please check your input.",
    ),
    (
        ErrorCode::Storage,
        "Unable to access local storage. Settings may not persist.",
    ),
    (
        ErrorCode::Network,
        "A network error occurred. Please check your connection.",
    ),
    (ErrorCode::Unknown, "An unexpected error occurred."),
];

fn lookup_message(code: ErrorCode) -> Option<&'static str> {
    ERROR_MESSAGES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, text)| *text)
}

/// The single error kind surfaced by the bridge layer
#[derive(Debug)]
pub struct AppError {
    code: ErrorCode,
    message: String,
    cause: Option<anyhow::Error>,
    recoverable: bool,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
            recoverable: false,
        }
    }

    /// Attach the original failure
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable;
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    /// Text safe to show to the user
    pub fn user_message(&self) -> String {
        lookup_message(self.code)
            .map(str::to_string)
            .unwrap_or_else(|| self.message.clone())
    }

    /// Normalize an arbitrary failure.
    ///
    /// An `AppError` passes through untouched (its own code wins over `code`).
    /// Anything else is wrapped: its `Display` output becomes the message and
    /// the original is kept as the cause.
    pub fn from_unknown(error: impl Into<anyhow::Error>, code: ErrorCode) -> Self {
        match error.into().downcast::<AppError>() {
            Ok(app_error) => app_error,
            Err(other) => Self {
                code,
                message: other.to_string(),
                cause: Some(other),
                recoverable: false,
            },
        }
    }

    /// Wrap a value that is not an error at all by stringifying it
    pub fn from_display(value: impl fmt::Display, code: ErrorCode) -> Self {
        Self::new(code, value.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|cause| {
            let source: &(dyn std::error::Error + Send + Sync + 'static) = cause.as_ref();
            source as &(dyn std::error::Error + 'static)
        })
    }
}

/// Whether a failure is flagged as retryable
pub fn is_recoverable(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<AppError>()
        .map(AppError::is_recoverable)
        .unwrap_or(false)
}

/// Best message to show for any failure
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<AppError>() {
        Some(app_error) => app_error.user_message(),
        None => error.to_string(),
    }
}

/// Result alias for operations that fail with [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_new_defaults_to_not_recoverable() {
        let error = AppError::new(ErrorCode::Invoke, "bridge down");
        assert_eq!(error.code(), ErrorCode::Invoke);
        assert_eq!(error.message(), "bridge down");
        assert!(!error.is_recoverable());
        assert!(error.cause().is_none());
    }

    #[test]
    fn test_user_message_comes_from_table() {
        let error = AppError::new(ErrorCode::Invoke, "socket closed: errno 104");
        assert_eq!(
            error.user_message(),
            "Failed to communicate with the backend. Please try again."
        );
        assert_eq!(error.to_string(), "socket closed: errno 104");
    }

    #[test]
    fn test_from_unknown_passes_app_error_through() {
        let original = AppError::new(ErrorCode::Database, "locked").with_recoverable(true);
        let converted = AppError::from_unknown(original, ErrorCode::Invoke);
        assert_eq!(converted.code(), ErrorCode::Database);
        assert_eq!(converted.message(), "locked");
        assert!(converted.is_recoverable());
    }

    #[test]
    fn test_from_unknown_wraps_foreign_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let converted = AppError::from_unknown(io, ErrorCode::Unknown);
        assert_eq!(converted.code(), ErrorCode::Unknown);
        assert_eq!(converted.message(), "disk on fire");
        assert!(converted.cause().is_some());
        assert_eq!(converted.source().map(|s| s.to_string()).as_deref(), Some("disk on fire"));
    }

    #[test]
    fn test_from_display_stringifies() {
        let converted = AppError::from_display(42, ErrorCode::Validation);
        assert_eq!(converted.message(), "42");
        assert!(converted.cause().is_none());
    }

    #[test]
    fn test_helpers_on_anyhow() {
        let app: anyhow::Error = AppError::new(ErrorCode::Network, "timeout")
            .with_recoverable(true)
            .into();
        assert!(is_recoverable(&app));
        assert_eq!(
            error_message(&app),
            "A network error occurred. Please check your connection."
        );

        let plain = anyhow::anyhow!("plain failure");
        assert!(!is_recoverable(&plain));
        assert_eq!(error_message(&plain), "plain failure");
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::Invoke).unwrap();
        assert_eq!(json, "\"INVOKE_ERROR\"");
        assert_eq!(ErrorCode::Storage.to_string(), "STORAGE_ERROR");
    }
}
