use thiserror::Error;

use super::domain::Violation;

/// Business errors for customer workflows.
///
/// A missing customer is not an error; lookups return `Option` instead.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("validation failed: {0}")]
    Validation(#[from] Violation),
    #[error("repository error: {0}")]
    Repository(String),
}

impl CustomerError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CustomerError::Validation(_) => 2001,
            CustomerError::Repository(_) => 2200,
        }
    }
}

impl From<models::errors::ModelError> for CustomerError {
    fn from(e: models::errors::ModelError) -> Self {
        CustomerError::Repository(e.to_string())
    }
}
