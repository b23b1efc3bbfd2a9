use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, AppState};
use service::currency::{HttpCurrencyClient, StaticCurrencyStore};
use service::customer::repository::memory::InMemoryCustomerRepository;

const BUNDLED_FEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/json/currency.json");

const UPSTREAM_BODY: &str = r#"{"head":{"version":"2.0","rep_code":"200"},"data":{"total":2,"searchlist":["USD/CNY","EUR/CNY"]},"records":[{"date":"2025-04-09","values":["7.2066","7.9620"]}]}"#;

async fn spawn(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(addr)
}

/// Upstream currency server answering `/api/v1/currency-server/currencies`.
async fn upstream(handler: axum::routing::MethodRouter) -> anyhow::Result<String> {
    let app = Router::new().route("/api/v1/currency-server/currencies", handler);
    Ok(format!("http://{}/api/v1", spawn(app).await?))
}

/// App under test with the client aimed at `upstream_api` and the store at `data_file`.
async fn start_server(upstream_api: &str, data_file: &str) -> anyhow::Result<String> {
    let client = HttpCurrencyClient::new(upstream_api, Duration::from_secs(2), Duration::from_secs(2))?;
    let state = AppState::new(
        Arc::new(InMemoryCustomerRepository::default()),
        Arc::new(client),
        Arc::new(StaticCurrencyStore::new(data_file)),
    );
    let app = routes::build_router(state, CorsLayer::very_permissive(), "/api/v1");
    Ok(format!("http://{}/api/v1", spawn(app).await?))
}

async fn get_json(url: String) -> anyhow::Result<(HttpStatusCode, Value)> {
    let res = reqwest::get(url).await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

#[tokio::test]
async fn server_endpoint_serves_bundled_feed() -> anyhow::Result<()> {
    let api = start_server("http://127.0.0.1:9/api/v1", BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-server/currencies")).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["total"], 27);
    assert_eq!(body["head"]["rep_code"], "200");
    assert!(body["records"].as_array().map(|r| !r.is_empty()).unwrap_or(false));
    Ok(())
}

#[tokio::test]
async fn server_endpoint_404_when_feed_missing() -> anyhow::Result<()> {
    let api = start_server("http://127.0.0.1:9/api/v1", "/nonexistent/currency.json").await?;
    let (status, body) = get_json(format!("{api}/currency-server/currencies")).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": 404, "error": "Not Found", "message": "Currency data not found"}));
    Ok(())
}

#[tokio::test]
async fn client_passes_upstream_body_through() -> anyhow::Result<()> {
    let up = upstream(get(|| async { ([("content-type", "application/json")], UPSTREAM_BODY) })).await?;
    let api = start_server(&up, BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-client/currencies")).await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["records"][0]["values"][0], "7.2066");
    assert_eq!(body["data"]["searchlist"], json!(["USD/CNY", "EUR/CNY"]));
    Ok(())
}

#[tokio::test]
async fn client_maps_upstream_404() -> anyhow::Result<()> {
    let up = upstream(get(|| async { StatusCode::NOT_FOUND })).await?;
    let api = start_server(&up, BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-client/currencies")).await?;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Data not found on currency server");
    Ok(())
}

#[tokio::test]
async fn client_maps_empty_body_to_bad_gateway() -> anyhow::Result<()> {
    let up = upstream(get(|| async { "" })).await?;
    let api = start_server(&up, BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-client/currencies")).await?;
    assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "No data returned from currency server");
    Ok(())
}

#[tokio::test]
async fn client_maps_upstream_failure_to_500() -> anyhow::Result<()> {
    let up = upstream(get(|| async { StatusCode::SERVICE_UNAVAILABLE })).await?;
    let api = start_server(&up, BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-client/currencies")).await?;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Currency client failed to fetch data");
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_keeps_server_alive() -> anyhow::Result<()> {
    let closed = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let dead = format!("http://{}/api/v1", closed.local_addr()?);
    drop(closed);

    let api = start_server(&dead, BUNDLED_FEED).await?;
    let (status, body) = get_json(format!("{api}/currency-client/currencies")).await?;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");

    // still serving
    let (status, _) = get_json(format!("{api}/customers")).await?;
    assert_eq!(status, HttpStatusCode::OK);
    Ok(())
}
