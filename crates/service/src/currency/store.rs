use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::domain::ExchangeResponse;
use super::errors::CurrencyError;
use super::provider::CurrencyProvider;

/// Serves a pre-recorded exchange-rate snapshot from a JSON file.
///
/// The file is read on every call; edits show up on the next request.
#[derive(Clone, Debug)]
pub struct StaticCurrencyStore {
    path: PathBuf,
}

impl StaticCurrencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }
}

#[async_trait]
impl CurrencyProvider for StaticCurrencyStore {
    #[instrument(skip(self))]
    async fn currency_data(&self) -> Result<ExchangeResponse, CurrencyError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "currency resource unreadable");
            CurrencyError::NotFound(e.to_string())
        })?;
        let data: ExchangeResponse = serde_json::from_slice(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "currency resource malformed");
            CurrencyError::NotFound(e.to_string())
        })?;
        info!(total = data.data.as_ref().map(|d| d.total), "currency data loaded");
        Ok(data)
    }
}
