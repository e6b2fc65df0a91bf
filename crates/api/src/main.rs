mod middleware;
mod response;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxoffice_core::cache::{HoldCache, NullCache};
use boxoffice_core::checkout::CheckoutCoordinator;
use boxoffice_core::hold::HoldArbiter;
use boxoffice_core::identity::{AnonymousIdentityProvider, IdentityProvider};
use boxoffice_core::notify::LoggingNotifier;
use boxoffice_core::payment::{MockPaymentGateway, PaymentGateway};
use boxoffice_core::store::pg::{PgEventCatalog, PgHoldStore, PgOrderStore, PgSeatStore, PgTicketStore};
use boxoffice_integrations::cache::RedisHoldCache;
use boxoffice_integrations::identity::JwtIdentityProvider;
use boxoffice_integrations::payment::StubLiveGateway;
use boxoffice_realtime::{RealtimeBroadcaster, RoomRegistry};
use boxoffice_types::Config;
use middleware::{AppState, HoldRateLimiter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxoffice_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting seat reservation API...");

    let config = Config::from_env()?;

    let pool = boxoffice_db::create_pool(&config.database_url).await?;
    tracing::info!("database connection established");

    let rooms = RoomRegistry::new();
    let broadcaster = Arc::new(RealtimeBroadcaster::new(rooms.clone()));

    let cache: Arc<dyn HoldCache> = match &config.cache_url {
        Some(url) => {
            let cache = RedisHoldCache::new(url).await?;
            tracing::info!("hold cache connected to redis");
            Arc::new(cache)
        }
        None => {
            tracing::info!("CACHE_URL unset, hold cache disabled");
            Arc::new(NullCache)
        }
    };

    let seats = Arc::new(PgSeatStore { pool: pool.clone() });
    let holds = Arc::new(PgHoldStore { pool: pool.clone() });
    let orders = Arc::new(PgOrderStore { pool: pool.clone() });
    let tickets = Arc::new(PgTicketStore { pool: pool.clone() });
    let catalog = Arc::new(PgEventCatalog { pool: pool.clone() });

    let arbiter = Arc::new(HoldArbiter::new(
        seats.clone(),
        holds,
        catalog.clone(),
        broadcaster.clone(),
        cache,
        config.max_seats_per_hold,
        config.hold_expiry,
    ));

    let gateway: Arc<dyn PaymentGateway> = if config.mock_payments() {
        tracing::info!("PAYMENT_PROVIDER_KEY unset, running in mock-succeed payment mode");
        Arc::new(MockPaymentGateway)
    } else {
        tracing::info!("real payment provider configured");
        Arc::new(StubLiveGateway::new(config.payment_provider_key.clone().unwrap()))
    };

    let checkout = Arc::new(CheckoutCoordinator::new(
        arbiter.clone(),
        orders,
        tickets,
        catalog,
        seats,
        gateway,
        Arc::new(LoggingNotifier),
        broadcaster,
    ));

    let identity: Arc<dyn IdentityProvider> = match &config.jwt_signing_secret {
        Some(secret) => Arc::new(JwtIdentityProvider::new(secret, &config.jwt_audience)),
        None => Arc::new(AnonymousIdentityProvider),
    };

    let webhook_secret: Arc<str> = config.payment_webhook_secret.clone().unwrap_or_default().into();

    let state = AppState {
        arbiter,
        checkout,
        identity,
        rate_limiter: Arc::new(HoldRateLimiter::new(config.max_hold_grants_per_minute, Duration::from_secs(60))),
        webhook_secret,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/seats/event/:event_id/status", get(routes::seats::get_status))
        .route("/seats/event/:event_id/plan", get(routes::seats::get_plan))
        .route("/seats/hold", post(routes::seats::hold))
        .route("/seats/release", delete(routes::seats::release))
        .route("/orders/checkout-intent", post(routes::orders::create_checkout_intent))
        .route("/orders/:id", get(routes::orders::get_order))
        .route("/orders/:id/finalize", post(routes::orders::finalize))
        .route("/payments/webhook", post(routes::payments::webhook))
        .layer(
            CorsLayer::new()
                .allow_origin(config.frontend_url.parse::<axum::http::HeaderValue>()?)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
        .merge(boxoffice_realtime::ws::router(rooms));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("shutdown signal received, draining in-flight requests");
}

async fn health_check() -> &'static str {
    "OK"
}
