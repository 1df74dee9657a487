//! Error types for the Amberarctic API.
//!
//! This module provides the [`ApiError`] type, the standard error used
//! throughout the backend. Every error carries enough structure to be
//! rendered as a JSON envelope at the HTTP boundary:
//!
//! | Variant | HTTP status | Code |
//! |---|---|---|
//! | `Validation` | 422 Unprocessable Entity | `VALIDATION_ERROR` |
//! | `NotFound` | 404 Not Found | `NOT_FOUND` |
//! | `Storage` | 500 Internal Server Error | `STORAGE_ERROR` |
//!
//! Storage messages are truncated before they reach a client so that
//! driver internals and connection strings never leak.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Maximum length of a storage error message in a client-facing envelope.
pub const STORAGE_MESSAGE_LIMIT: usize = 200;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request validation errors (invalid input, out-of-range values).
    Validation,
    /// Resource not found.
    NotFound,
    /// Document store connectivity or query failure.
    Storage,
}

impl ErrorCategory {
    /// Returns the HTTP status code for this error category.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for the Amberarctic API.
///
/// # Example
///
/// ```
/// use amberarctic_core::{ApiError, ErrorCategory};
///
/// fn check_rating(rating: i32) -> Result<(), ApiError> {
///     if !(1..=5).contains(&rating) {
///         return Err(ApiError::field("rating", "must be between 1 and 5"));
///     }
///     Ok(())
/// }
///
/// let err = check_rating(9).unwrap_err();
/// assert_eq!(err.category(), ErrorCategory::Validation);
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
        /// Field-specific validation errors.
        #[source]
        fields: Option<FieldErrors>,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
        /// The type of resource that was not found.
        resource_type: Option<String>,
        /// The identifier of the resource.
        resource_id: Option<String>,
    },

    /// Document store failure (connectivity or query).
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message.
        message: String,
    },
}

impl ApiError {
    /// Creates a validation error with a message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a validation error with field-specific errors.
    #[must_use]
    pub fn validation_with_fields(message: impl Into<String>, fields: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Some(fields),
        }
    }

    /// Creates a validation error naming a single offending field.
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let message = message.into();
        let mut fields = FieldErrors::new();
        fields.add(&field, &message);
        Self::Validation {
            message: format!("{field}: {message}"),
            fields: Some(fields),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
            resource_id: None,
        }
    }

    /// Creates a not found error with resource context.
    #[must_use]
    pub fn not_found_resource(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();
        Self::NotFound {
            message: format!("{resource_type} '{resource_id}' not found"),
            resource_type: Some(resource_type),
            resource_id: Some(resource_id),
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Storage { .. } => ErrorCategory::Storage,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().status_code()
    }

    /// Converts this error to a serializable error envelope.
    ///
    /// Storage messages are truncated to [`STORAGE_MESSAGE_LIMIT`] characters.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        let message = match self {
            Self::Storage { message } => {
                format!("Storage error: {}", truncate(message, STORAGE_MESSAGE_LIMIT))
            }
            other => other.to_string(),
        };

        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message,
                category: self.category(),
                details: self.error_details(),
            },
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Returns additional error details for the envelope.
    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation {
                fields: Some(fields),
                ..
            } => serde_json::to_value(fields).ok(),
            Self::NotFound {
                resource_type: Some(rt),
                resource_id: Some(rid),
                ..
            } => Some(serde_json::json!({
                "resource_type": rt,
                "resource_id": rid
            })),
            _ => None,
        }
    }
}

/// Truncates a message to at most `limit` characters on a char boundary.
#[must_use]
pub fn truncate(message: &str, limit: usize) -> &str {
    match message.char_indices().nth(limit) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}

/// Field-specific validation errors.
///
/// Keyed by field path; each field carries one or more error messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Error)]
#[error("Field validation errors")]
pub struct FieldErrors {
    /// Map of field path to list of error messages.
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates a new empty `FieldErrors`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if there are no field errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts accumulated errors into a result.
    ///
    /// Returns `Ok(())` when empty, otherwise an [`ApiError::Validation`]
    /// naming every offending field.
    pub fn into_result(self) -> ApiResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let named: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        let message = format!("Invalid value for field(s): {}", named.join(", "));
        Err(ApiError::validation_with_fields(message, self))
    }
}

/// Serializable error envelope for HTTP responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Error category.
    pub category: ErrorCategory,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
