use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use apr_simulator::{
    apr::{manager::AprManager, types::PoolSnapshot},
    config::AppConfig,
    pool_view::PoolViewStore,
    provider::{JsonFilePoolProvider, PoolProvider, StaticPoolProvider},
    service::spawn_apr_service,
    time::SystemClock,
};
use common::logger::init_logger;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};

fn select_provider(cfg: &AppConfig) -> Arc<dyn PoolProvider> {
    match &cfg.pools_file {
        Some(path) => Arc::new(JsonFilePoolProvider::new(path.clone())),
        None => Arc::new(StaticPoolProvider::demo()),
    }
}

async fn load_pools(provider: &dyn PoolProvider) -> anyhow::Result<Arc<[PoolSnapshot]>> {
    let pools = provider
        .fetch_pools()
        .await
        .context("failed to load upstream pools")?;

    Ok(Arc::from(pools))
}

/// Re-reads the provider on a fixed cadence. Every successful load is a new
/// list identity, so the service re-seeds.
fn start_reload_loop(
    provider: Arc<dyn PoolProvider>,
    pools_tx: watch::Sender<Arc<[PoolSnapshot]>>,
    every: Duration,
) {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match load_pools(provider.as_ref()).await {
                Ok(pools) => {
                    tracing::info!(pools = pools.len(), "upstream pools reloaded");
                    if pools_tx.send(pools).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = ?e, "pool reload failed; keeping previous list"),
            }
        }
    });
}

/// Stand-in for the rendering layer: logs the published board each interval.
fn start_board_reporter(view: PoolViewStore, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let board = view.get();
            for pool in &board.pools {
                tracing::info!(
                    tick = board.tick,
                    pool_id = %pool.id(),
                    apr = pool.apr,
                    history = ?pool.history.iter().map(|p| (p.label.as_str(), p.apr)).collect::<Vec<_>>(),
                    "pool apr"
                );
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("invalid configuration")?;
    init_logger("apr-simulator", cfg.json_logs);

    tracing::info!(?cfg, "Starting APR simulator...");

    let provider = select_provider(&cfg);
    let pools = load_pools(provider.as_ref()).await?;
    let (pools_tx, pools_rx) = watch::channel(pools);

    let view = PoolViewStore::new();
    let handle = spawn_apr_service(
        AprManager::new(cfg.refresh),
        pools_rx,
        SystemClock,
        view.clone(),
    );

    tracing::info!(trace_id = %handle.trace_id(), "apr service running");

    // Without reloading, the sender lives here so the channel stays open.
    let _pools_tx = match cfg.reload_every {
        Some(every) => {
            start_reload_loop(provider, pools_tx, every);
            None
        }
        None => Some(pools_tx),
    };

    start_board_reporter(view, cfg.refresh);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    handle.stop().await;

    Ok(())
}
