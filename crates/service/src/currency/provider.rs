use async_trait::async_trait;

use super::domain::ExchangeResponse;
use super::errors::CurrencyError;

/// Source of exchange-rate snapshots.
#[async_trait]
pub trait CurrencyProvider: Send + Sync {
    async fn currency_data(&self) -> Result<ExchangeResponse, CurrencyError>;
}
