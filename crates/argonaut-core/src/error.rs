use thiserror::Error;

/// Core error types for argonaut operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown FHIR version: {0}")]
    UnknownVersion(String),

    #[error("Unknown resource category: {0}")]
    UnknownCategory(String),

    #[error("Invalid FHIR DateTime: {0}")]
    InvalidDateTime(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a new UnknownVersion error
    pub fn unknown_version(version: impl Into<String>) -> Self {
        Self::UnknownVersion(version.into())
    }

    /// Create a new UnknownCategory error
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory(category.into())
    }

    /// Create a new InvalidDateTime error
    pub fn invalid_date_time(datetime: impl Into<String>) -> Self {
        Self::InvalidDateTime(datetime.into())
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
