//! Environment-derived configuration, loaded once at process start.
//!
//! Mirrors the teacher's habit of reading configuration straight from
//! `std::env::var` in `main()`, centralized here so both the API and the
//! jobs binary share one source of truth.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_port: u16,
    pub frontend_url: String,

    /// Hold TTL. `SEAT_HOLD_EXPIRY_MINUTES`, default 10.
    pub hold_expiry: Duration,
    /// Seats per hold cap. `SEAT_HOLD_MAX_PER_HOLD`, default 10.
    pub max_seats_per_hold: i32,
    /// Per-session hold-grant rate limit. `SEAT_HOLD_MAX_PER_MINUTE`, default 5.
    pub max_hold_grants_per_minute: u32,
    /// Expiration worker tick interval. `SEAT_HOLD_EXPIRY_CHECK_SECONDS`, default 60.
    pub expiry_check_interval: Duration,

    /// Enables the real payment gateway shape; absent -> mock-succeed mode.
    pub payment_provider_key: Option<String>,
    pub payment_webhook_secret: Option<String>,

    /// Optional side-channel cache. Absent -> cache disabled.
    pub cache_url: Option<String>,

    /// Enables bearer JWT verification; absent -> anonymous identity only.
    pub jwt_signing_secret: Option<String>,
    pub jwt_audience: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            api_port: env_or("API_PORT", 3000),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            hold_expiry: Duration::from_secs(60 * env_or::<u64>("SEAT_HOLD_EXPIRY_MINUTES", 10)),
            max_seats_per_hold: env_or("SEAT_HOLD_MAX_PER_HOLD", 10),
            max_hold_grants_per_minute: env_or("SEAT_HOLD_MAX_PER_MINUTE", 5),
            expiry_check_interval: Duration::from_secs(env_or(
                "SEAT_HOLD_EXPIRY_CHECK_SECONDS",
                60,
            )),
            payment_provider_key: std::env::var("PAYMENT_PROVIDER_KEY").ok(),
            payment_webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET").ok(),
            cache_url: std::env::var("CACHE_URL").ok(),
            jwt_signing_secret: std::env::var("JWT_SIGNING_SECRET").ok(),
            jwt_audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string()),
        })
    }

    pub fn mock_payments(&self) -> bool {
        self.payment_provider_key.is_none()
    }
}
