mod jobs;

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxoffice_core::broadcast::SeatBroadcaster;
use boxoffice_core::cache::{HoldCache, NullCache};
use boxoffice_core::store::pg::{PgHoldStore, PgSeatStore};
use boxoffice_core::store::{HoldStore, SeatStore};
use boxoffice_integrations::cache::RedisHoldCache;
use boxoffice_realtime::{RealtimeBroadcaster, RoomRegistry};
use boxoffice_types::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting seat reservation background jobs...");

    let config = Config::from_env()?;

    let pool = boxoffice_db::create_pool(&config.database_url).await?;
    tracing::info!("database connection established");

    let seats: Arc<dyn SeatStore> = Arc::new(PgSeatStore { pool: pool.clone() });
    let holds: Arc<dyn HoldStore> = Arc::new(PgHoldStore { pool: pool.clone() });

    let cache: Arc<dyn HoldCache> = match &config.cache_url {
        Some(url) => Arc::new(RedisHoldCache::new(url).await?),
        None => Arc::new(NullCache),
    };

    // A fresh, process-local registry: this binary has no WebSocket
    // clients of its own, so an expired-hold broadcast here reaches no
    // one. It still drives the reclaim through the same code path the
    // API's opportunistic reclamation uses, which is what matters for
    // correctness; a deployment that wants reclaim events to reach
    // connected browsers runs this tick inside the API process instead.
    let broadcaster: Arc<dyn SeatBroadcaster> = Arc::new(RealtimeBroadcaster::new(RoomRegistry::new()));

    let args: Vec<String> = std::env::args().collect();
    if args.contains(&"--run-once".to_string()) {
        tracing::info!("running expiration tick immediately...");
        let reclaimed = jobs::expire_holds::run(&seats, &holds, &cache, &broadcaster).await?;
        tracing::info!(reclaimed, "expiration tick complete");
        return Ok(());
    }

    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(config.expiry_check_interval, move |_uuid, _l| {
        let seats = seats.clone();
        let holds = holds.clone();
        let cache = cache.clone();
        let broadcaster = broadcaster.clone();
        Box::pin(async move {
            match jobs::expire_holds::run(&seats, &holds, &cache, &broadcaster).await {
                Ok(reclaimed) if reclaimed > 0 => {
                    tracing::info!(reclaimed, "expiration tick reclaimed holds");
                }
                Ok(_) => {}
                Err(err) => tracing::error!(error = %err, "expiration tick failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(interval_secs = config.expiry_check_interval.as_secs(), "expiration worker scheduled");

    let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = term.recv() => {}
    }

    tracing::info!("shutdown signal received, stopping scheduler");
    Ok(())
}
