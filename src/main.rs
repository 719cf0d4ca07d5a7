//! TTL Cache demo host
//!
//! Embeds a cache the way a server process would: configuration from the
//! environment, logging through tracing, periodic stats reports, and teardown
//! of the sweeper on shutdown.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Config, TtlCache};

const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Main entry point for the demo host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache (starts the sweeper)
/// 4. Seed a few entries and report stats until Ctrl+C
/// 5. Drop the cache, which stops and joins the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info,ttl_cache_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, check_interval={}s",
        config.default_ttl.as_secs(),
        config.check_interval.as_secs()
    );

    let cache: TtlCache<String, String> =
        TtlCache::from_config(&config).context("failed to build cache")?;

    cache.set("greeting".to_string(), "hello".to_string(), None);
    cache.set(
        "session".to_string(),
        "short-lived".to_string(),
        Some(Duration::from_secs(3)),
    );
    let _ = cache.get("greeting");
    let _ = cache.get("missing");

    let mut ticker = tokio::time::interval(REPORT_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stats = serde_json::to_string(&cache.stats())?;
                info!(keys = ?cache.keys(), "Cache stats: {}", stats);
            }
            result = signal::ctrl_c() => {
                result.context("failed to listen for Ctrl+C")?;
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    drop(cache);
    info!("Shutdown complete");
    Ok(())
}
