use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info, instrument, warn};

use super::domain::ExchangeResponse;
use super::errors::CurrencyError;
use super::provider::CurrencyProvider;

/// Path of the currency server endpoint, relative to the API base URL.
pub const CURRENCY_SERVER_PATH: &str = "/currency-server/currencies";

/// Fetches exchange rates from a currency server over HTTP.
///
/// One GET per call, no retries. Both timeouts surface as [`CurrencyError::Fetch`].
#[derive(Clone)]
pub struct HttpCurrencyClient {
    http: reqwest::Client,
    url: String,
}

impl HttpCurrencyClient {
    pub fn new(base_url: &str, connect_timeout: Duration, read_timeout: Duration) -> Result<Self, CurrencyError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()
            .map_err(|e| CurrencyError::Fetch(e.to_string()))?;
        let url = format!("{}{}", base_url.trim_end_matches('/'), CURRENCY_SERVER_PATH);
        Ok(Self { http, url })
    }

    pub fn from_config(cfg: &configs::CurrencyConfig) -> Result<Self, CurrencyError> {
        Self::new(
            &cfg.base_url,
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.read_timeout_secs),
        )
    }

    pub fn url(&self) -> &str { &self.url }
}

/// An empty body or a literal `null` counts as no content.
pub fn decode_body(body: &[u8]) -> Result<ExchangeResponse, CurrencyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CurrencyError::NoContent);
    }
    let parsed: Option<ExchangeResponse> =
        serde_json::from_slice(body).map_err(|e| CurrencyError::Fetch(format!("decode body: {e}")))?;
    parsed.ok_or(CurrencyError::NoContent)
}

#[async_trait]
impl CurrencyProvider for HttpCurrencyClient {
    #[instrument(skip(self))]
    async fn currency_data(&self) -> Result<ExchangeResponse, CurrencyError> {
        let resp = self.http.get(&self.url).send().await.map_err(|e| {
            error!(url = %self.url, error = %e, "currency request failed");
            CurrencyError::Fetch(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            warn!("currency server returned 404");
            return Err(CurrencyError::NotFound(format!("upstream status {status}")));
        }
        if !status.is_success() {
            error!(url = %self.url, %status, "currency server returned error status");
            return Err(CurrencyError::Fetch(format!("upstream status {status}")));
        }

        let body = resp.bytes().await.map_err(|e| CurrencyError::Fetch(e.to_string()))?;
        let data = decode_body(&body)?;
        info!(total = data.data.as_ref().map(|d| d.total), "currency data fetched");
        Ok(data)
    }
}
