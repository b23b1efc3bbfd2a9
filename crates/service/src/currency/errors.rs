use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyError {
    /// Upstream answered successfully but the body decoded to nothing.
    #[error("no currency data returned")]
    NoContent,
    #[error("currency data not found: {0}")]
    NotFound(String),
    #[error("currency fetch failed: {0}")]
    Fetch(String),
}

impl CurrencyError {
    pub fn code(&self) -> u16 {
        match self {
            CurrencyError::NoContent => 3001,
            CurrencyError::NotFound(_) => 3004,
            CurrencyError::Fetch(_) => 3100,
        }
    }
}
