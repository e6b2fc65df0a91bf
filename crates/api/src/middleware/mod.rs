pub mod auth;
pub mod rate_limit;

pub use auth::MaybeAuthUser;
pub use rate_limit::HoldRateLimiter;

use std::sync::Arc;

use boxoffice_core::checkout::CheckoutCoordinator;
use boxoffice_core::hold::HoldArbiter;
use boxoffice_core::identity::IdentityProvider;

/// Shared application state, constructed once at startup and cloned (Arc
/// fields only) into every request.
#[derive(Clone)]
pub struct AppState {
    pub arbiter: Arc<HoldArbiter>,
    pub checkout: Arc<CheckoutCoordinator>,
    pub identity: Arc<dyn IdentityProvider>,
    pub rate_limiter: Arc<HoldRateLimiter>,
    pub webhook_secret: Arc<str>,
}
