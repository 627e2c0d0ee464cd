use std::{net::SocketAddr, path::Path};

use axum::Router;
use common::env::ensure_data_dir;
use configs::AppConfig;
use service::catalog::PlaceRegistry;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the registry at `places_file` and wire it into the router.
pub async fn build_app(places_file: &Path) -> anyhow::Result<Router> {
    ensure_data_dir(places_file).await?;
    let registry = PlaceRegistry::open(places_file).await?;
    Ok(routes::build_router(ServerState::new(registry), build_cors()))
}

/// Public entry: build the app and run the HTTP server.
/// Expects `.env` and the tracing subscriber to be set up by the caller.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_env()?;
    let app = build_app(&cfg.storage.places_file).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, file = %cfg.storage.places_file.display(), "starting places server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
