//! Typed error handling for the admin console core
//!
//! The view model itself never fails once it is built: absent filters, an
//! empty search term and an unsorted directive are all valid inputs, and
//! accessors are total. Errors only come from the boundaries where untyped
//! input enters the crate (URL parameters, config files, form submissions,
//! stored sessions, record sources).
//!
//! # Error Categories
//!
//! - [`ViewError`]: unknown column keys or sort directions
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ValidationError`]: form input validation
//! - [`SessionError`]: session storage
//! - [`SourceError`]: record fetching
//!
//! # Example
//!
//! ```rust
//! use medadmin::prelude::*;
//!
//! let err = VideoColumn::parse("colour").unwrap_err();
//! let console_err: ConsoleError = err.into();
//! assert_eq!(console_err.error_code(), "UNKNOWN_COLUMN");
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// View construction errors
    #[error(transparent)]
    View(#[from] ViewError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Form validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session storage errors
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Record source errors
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ConsoleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::View(e) => e.error_code(),
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Session(_) => "SESSION_ERROR",
            ConsoleError::Source(_) => "SOURCE_ERROR",
        }
    }
}

// =============================================================================
// View Errors
// =============================================================================

/// Errors raised while turning untyped keys into view inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A column key that the record type does not define
    #[error("Unknown column '{key}' for {record} records")]
    UnknownColumn { record: String, key: String },

    /// A sort direction other than asc/desc
    #[error("Invalid sort direction '{value}' (expected 'asc' or 'desc')")]
    InvalidSortDirection { value: String },

    /// A screen configured with no searchable column
    #[error("Screen '{screen}' must search at least one column")]
    EmptySearchColumns { screen: String },
}

impl ViewError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            ViewError::InvalidSortDirection { .. } => "INVALID_SORT_DIRECTION",
            ViewError::EmptySearchColumns { .. } => "EMPTY_SEARCH_COLUMNS",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to form input validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// One or more fields failed validation
    #[error("Validation errors: {}", .0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect::<Vec<_>>().join(", "))]
    FieldErrors(Vec<FieldValidationError>),
}

impl ValidationError {
    /// All field errors, in form order
    pub fn fields(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
        }
    }

    /// The first message reported for `field`, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors related to session storage
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing store could not be read or written
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be encoded
    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors reported by a record source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend answered with an error
    #[error("Failed to fetch {resource}: {message}")]
    FetchFailed { resource: String, message: String },

    /// The payload could not be decoded into records
    #[error("Malformed {resource} payload: {message}")]
    Malformed { resource: String, message: String },
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_display() {
        let err = ViewError::UnknownColumn {
            record: "video".to_string(),
            key: "colour".to_string(),
        };
        assert!(err.to_string().contains("colour"));
        assert!(err.to_string().contains("video"));
        assert_eq!(err.error_code(), "UNKNOWN_COLUMN");
    }

    #[test]
    fn test_console_error_codes() {
        let err: ConsoleError = ViewError::InvalidSortDirection {
            value: "up".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "INVALID_SORT_DIRECTION");

        let err: ConsoleError = ConfigError::FileNotFound {
            path: "/etc/medadmin.yaml".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("/etc/medadmin.yaml"));
    }

    #[test]
    fn test_parse_error_display_with_and_without_file() {
        let with_file = ConfigError::ParseError {
            file: Some("console.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            with_file.to_string(),
            "Failed to parse config file 'console.yaml': bad indent"
        );

        let without = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(without.to_string(), "Failed to parse config: bad indent");
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "username".to_string(),
                message: "Username is required.".to_string(),
            },
            FieldValidationError {
                field: "email".to_string(),
                message: "Invalid email address.".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("username"));
        assert!(display.contains("email"));
        assert_eq!(err.message_for("email"), Some("Invalid email address."));
        assert_eq!(err.message_for("phone"), None);
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError { file: None, .. }));
    }
}
