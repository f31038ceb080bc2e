//! Error types for the blog-store library.
//!
//! `ValidationError` is the single validation kind: each variant names the
//! constraint that failed and renders a human-readable message. `BlogError`
//! wraps it together with the storage and configuration failures a caller
//! can run into.

use thiserror::Error;

/// A candidate field value failed one of the entity rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or absent
    #[error("{field} is required")]
    Required {
        /// Field that failed
        field: &'static str,
    },

    /// Another row already holds this value
    #[error("{field} must be unique: {value:?} is already taken")]
    NotUnique {
        /// Field that failed
        field: &'static str,
        /// The conflicting value
        value: String,
    },

    /// The value does not have the expected shape
    #[error("{field} {reason}")]
    InvalidFormat {
        /// Field that failed
        field: &'static str,
        /// What the value should look like
        reason: String,
    },

    /// The value is shorter than allowed
    #[error("{field} must be at least {min} characters long (got {actual})")]
    TooShort {
        /// Field that failed
        field: &'static str,
        /// Minimum length in characters
        min: usize,
        /// Length of the rejected value
        actual: usize,
    },

    /// The value is longer than allowed
    #[error("{field} cannot be more than {max} characters (got {actual})")]
    TooLong {
        /// Field that failed
        field: &'static str,
        /// Maximum length in characters
        max: usize,
        /// Length of the rejected value
        actual: usize,
    },

    /// The value contains a disallowed phrase
    #[error("{field} is clickbait: contains {phrase:?}")]
    DisallowedContent {
        /// Field that failed
        field: &'static str,
        /// The phrase that matched
        phrase: String,
    },

    /// The value is not one of the permitted values
    #[error("invalid {field} {value:?}: must be one of {allowed:?}")]
    NotAllowed {
        /// Field that failed
        field: &'static str,
        /// The rejected value, if one was given
        value: Option<String>,
        /// The permitted values
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// Name of the field whose constraint failed
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::NotUnique { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::DisallowedContent { field, .. }
            | Self::NotAllowed { field, .. } => *field,
        }
    }

    /// Short constraint label, used for log fields and metric labels
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::NotUnique { .. } => "unique",
            Self::InvalidFormat { .. } => "format",
            Self::TooShort { .. } => "min_length",
            Self::TooLong { .. } => "max_length",
            Self::DisallowedContent { .. } => "disallowed_content",
            Self::NotAllowed { .. } => "enum",
        }
    }
}

/// Errors that can occur in the blog-store library.
#[derive(Error, Debug)]
pub enum BlogError {
    /// A candidate entity was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// No row with the given id
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind ("author" or "post")
        entity: &'static str,
        /// The missing id
        id: i64,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BlogError {
    /// The validation failure behind this error, if any
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience type alias for Result with `BlogError`
pub type Result<T> = std::result::Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "summary",
            max: 250,
            actual: 300,
        };
        assert_eq!(
            err.to_string(),
            "summary cannot be more than 250 characters (got 300)"
        );
    }

    #[test]
    fn field_and_rule_accessors() {
        let err = ValidationError::NotUnique {
            field: "name",
            value: "Jane Doe".to_string(),
        };
        assert_eq!(err.field(), "name");
        assert_eq!(err.rule(), "unique");
    }

    #[test]
    fn blog_error_exposes_validation() {
        let err = BlogError::from(ValidationError::Required { field: "title" });
        assert_eq!(err.as_validation().map(ValidationError::field), Some("title"));

        let err = BlogError::NotFound {
            entity: "post",
            id: 7,
        };
        assert!(err.as_validation().is_none());
        assert_eq!(err.to_string(), "post not found: 7");
    }
}
