use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod geocode;
mod lookup;
mod routes;
#[cfg(test)]
mod testing;

use config::Config;
use geocode::NominatimClient;
use lookup::LookupService;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocache_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        backend = ?config.cache_backend,
        ttl_seconds = config.cache_ttl_seconds,
        upstream = %config.upstream_base_url,
        "Server starting"
    );

    // One store handle for the whole process
    let cache = cache::build_store(&config).await?;
    let geocoder = Arc::new(NominatimClient::new(&config)?);
    let lookup = Arc::new(LookupService::new(cache, geocoder, config.cache_ttl()));

    let listen_addr = config.listen_addr();
    let state = AppState {
        config: Arc::new(config),
        lookup,
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("Server listening on http://{}", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
