//! Store error types
//!
//! Error codes:
//! - INV_VALIDATION_FAILED (client)
//! - INV_INVALID_ID (client)
//! - INV_NOT_FOUND (client)
//! - INV_STORE_CONFIG (server)
//! - INV_STORE_UNAVAILABLE (server)

use thiserror::Error;

use crate::product::ValidationErrors;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures a product store can report.
///
/// Callers branch on the variant; the display text is what clients see.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The candidate record violates one or more field rules
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The identifier is not in the store's id format
    #[error("Invalid product ID")]
    InvalidId(String),

    /// No record with this identifier
    #[error("Product not found")]
    NotFound,

    /// The store cannot be reached because it is not configured
    #[error("{0}")]
    Config(String),

    /// The store failed while serving the request
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "INV_VALIDATION_FAILED",
            StoreError::InvalidId(_) => "INV_INVALID_ID",
            StoreError::NotFound => "INV_NOT_FOUND",
            StoreError::Config(_) => "INV_STORE_CONFIG",
            StoreError::Unavailable(_) => "INV_STORE_UNAVAILABLE",
        }
    }

    /// Whether the caller caused this error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_) | StoreError::InvalidId(_) | StoreError::NotFound
        )
    }

    pub fn missing_uri(var: &str) -> Self {
        StoreError::Config(format!("{} environment variable is not defined", var))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
