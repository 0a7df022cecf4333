use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use clarity_server::{AppState, router};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bind = env::var("CLARITY_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let data_dir = data_dir()?;

    let state = AppState::open(&data_dir)?;
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, data_dir = %data_dir.display(), "clarity server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn data_dir() -> eyre::Result<PathBuf> {
    if let Ok(dir) = env::var("CLARITY_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("clarity"))
}
