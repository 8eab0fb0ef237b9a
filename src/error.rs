//! Error types for pretix API operations.

use thiserror::Error;

/// Errors that can occur during pretix API operations.
#[derive(Debug, Error)]
pub enum PretixError {
    /// Configuration is missing or incomplete.
    #[error("pretix configuration required: {0}")]
    ConfigMissing(String),

    /// The field is not present in this entity's payload.
    #[error("{entity} has no field '{field}'")]
    UnknownField { entity: &'static str, field: String },

    /// A multi-lingual field has no value for the requested locale.
    #[error("Invalid locale: {locale}")]
    InvalidLocale { field: String, locale: String },

    /// An accessor name that maps to no field of the entity.
    #[error("Call to undefined method {entity}::{accessor}()")]
    UndefinedAccessor {
        entity: &'static str,
        accessor: String,
    },

    /// A field holds a JSON value of a different shape than its accessor returns.
    #[error("{entity} field '{field}' is not {expected}")]
    UnexpectedType {
        entity: &'static str,
        field: String,
        expected: &'static str,
    },

    /// An argument has the wrong shape (e.g. a slug where an id is required).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The response body is valid JSON but not the expected shape.
    #[error("Unexpected payload: {0}")]
    InvalidPayload(String),

    /// API request failed.
    #[error("pretix API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl PretixError {
    /// Returns true if the error came from the HTTP boundary rather than
    /// from resolving entity data.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. }
                | Self::HttpError(_)
                | Self::ParseError(_)
                | Self::UrlError(_)
                | Self::RateLimited { .. }
        )
    }

    /// HTTP status code of a failed API call, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for pretix operations.
pub type Result<T> = core::result::Result<T, PretixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_locale_message() {
        let err = PretixError::InvalidLocale {
            field: "name".to_string(),
            locale: "fr".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid locale: fr");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_undefined_accessor_message() {
        let err = PretixError::UndefinedAccessor {
            entity: "Event",
            accessor: "getFoo".to_string(),
        };
        assert_eq!(err.to_string(), "Call to undefined method Event::getFoo()");
    }

    #[test]
    fn test_api_error_is_transport() {
        let err = PretixError::ApiError {
            message: "Not found.".to_string(),
            status_code: Some(404),
        };
        assert!(err.is_transport());
        assert_eq!(err.status_code(), Some(404));
    }
}
