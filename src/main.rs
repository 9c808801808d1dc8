use rankcache::app::{AppServices, build_router};
use rankcache::config::{Settings, StoreKind};
use rankcache::store::{MemoryStore, RedisStore, StoreClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!(
                "Usage: rankcache [--bind <addr:port>] [--redis <url>] [--store redis|memory] \
                 [--timeout-ms <ms>] [--scan-count <n>] [--leaderboard <name>] [--log-level <level>]"
            );
            eprintln!("Example: rankcache --bind 127.0.0.1:8080 --redis redis://127.0.0.1:6379");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .init();

    tracing::info!("Starting rankcache on {}", settings.bind_addr);

    // 1. Store client:
    let store: Arc<dyn StoreClient> = match settings.store {
        StoreKind::Redis => Arc::new(
            RedisStore::connect(
                &settings.redis_url,
                settings.call_timeout,
                settings.scan_count,
            )
            .await?,
        ),
        StoreKind::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    // 2. Components:
    let services = AppServices::new(store, &settings.leaderboard, settings.ttl);
    tracing::info!("Leaderboard collection: '{}'", settings.leaderboard);

    // 3. HTTP Router:
    let app = build_router(services);

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;

    tracing::info!("HTTP server listening on {}", settings.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
