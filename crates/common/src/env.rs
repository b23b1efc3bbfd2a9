//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data directory exists; warn when the bundled currency payload is missing.
pub async fn ensure_env(data_dir: &str, currency_file: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(currency_file).await.is_err() {
        warn!(%currency_file, "currency data file not found; /currency-server/currencies will 404");
    }
    if !data_dir.is_empty() {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    }
    Ok(())
}

/// Directory a `sqlite://` file URL lives in, if any.
pub fn sqlite_data_dir(database_url: &str) -> Option<String> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let file = rest.split('?').next().unwrap_or(rest);
    let parent = Path::new(file).parent()?;
    let dir = parent.to_string_lossy().to_string();
    if dir.is_empty() { None } else { Some(dir) }
}
