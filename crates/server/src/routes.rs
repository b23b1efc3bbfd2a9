use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod currency;
pub mod customers;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// API routes without any prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/:id",
            get(customers::get_one).put(customers::update).delete(customers::remove),
        )
        .route("/currency-client/currencies", get(currency::client_currencies))
        .route("/currency-server/currencies", get(currency::server_currencies))
}

/// Build the application router: API under `context_path`, health at the root.
pub fn build_router(state: AppState, cors: CorsLayer, context_path: &str) -> Router {
    let api = api_routes().with_state(state);
    let api = if context_path.is_empty() || context_path == "/" {
        api
    } else {
        Router::new().nest(context_path, api)
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
