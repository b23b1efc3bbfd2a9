use std::future::Future;
use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::currency::{HttpCurrencyClient, StaticCurrencyStore};
use service::customer::repo::seaorm::SeaOrmCustomerRepository;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate and wire every dependency the handlers need.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let client = HttpCurrencyClient::from_config(&cfg.currency)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(url = client.url(), "currency client configured");

    Ok(AppState::new(
        Arc::new(SeaOrmCustomerRepository { db }),
        Arc::new(client),
        Arc::new(StaticCurrencyStore::new(&cfg.currency.data_file)),
    ))
}

pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), &cfg.server.context_path))
}

/// Resolves on Ctrl+C. A handler that cannot be installed never resolves.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}

/// Run with an already loaded config until Ctrl+C.
pub async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    serve(cfg, shutdown_signal()).await
}

/// Bind, serve, and drain in-flight requests once `shutdown` resolves.
pub async fn serve<F>(cfg: &AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let data_dir = common::env::sqlite_data_dir(&cfg.database.url).unwrap_or_default();
    common::env::ensure_env(&data_dir, &cfg.currency.data_file).await?;

    let app = build_app(cfg).await?;

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, context_path = %cfg.server.context_path, "starting server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(%addr, "server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn memory_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 0;
        cfg.database.url = "sqlite::memory:".into();
        cfg.currency.data_file = concat!(env!("CARGO_MANIFEST_DIR"), "/../../resources/json/currency.json").into();
        cfg
    }

    #[tokio::test]
    async fn serve_returns_once_shutdown_resolves() -> anyhow::Result<()> {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let cfg = memory_config();
        let task = tokio::spawn(async move {
            serve(&cfg, async move {
                let _ = rx.await;
            })
            .await
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!task.is_finished());
        let _ = tx.send(());

        let res = tokio::time::timeout(Duration::from_secs(5), task).await??;
        assert!(res.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn serve_fails_fast_on_bad_database() {
        let mut cfg = memory_config();
        cfg.database.url = "mysql://nowhere/db".into();
        let res = tokio::time::timeout(Duration::from_secs(5), serve(&cfg, std::future::pending())).await;
        assert!(matches!(res, Ok(Err(_))));
    }
}
