use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, warn};

use service::currency::{domain::ExchangeResponse, errors::CurrencyError};

use crate::{errors::JsonApiError, state::AppState};

/// Republish whatever the currency server returns.
pub async fn client_currencies(State(state): State<AppState>) -> Result<Json<ExchangeResponse>, JsonApiError> {
    state.currency_client.currency_data().await.map(Json).map_err(|e| {
        let code = e.code();
        match e {
            CurrencyError::NotFound(detail) => {
                warn!(code, %detail, "currency server returned 404");
                JsonApiError::not_found("Data not found on currency server")
            }
            CurrencyError::NoContent => {
                warn!(code, "currency server returned no data");
                JsonApiError::from_status(StatusCode::BAD_GATEWAY, "No data returned from currency server")
            }
            CurrencyError::Fetch(detail) => {
                error!(code, %detail, "currency client request failed");
                JsonApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "Currency client failed to fetch data")
            }
        }
    })
}

pub async fn server_currencies(State(state): State<AppState>) -> Result<Json<ExchangeResponse>, JsonApiError> {
    state.currency_store.currency_data().await.map(Json).map_err(|e| {
        warn!(code = e.code(), error = %e, "currency data unavailable");
        JsonApiError::not_found("Currency data not found")
    })
}
