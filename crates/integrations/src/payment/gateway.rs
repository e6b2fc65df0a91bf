//! Shape-only real-provider gateway: the struct layout a production
//! integration would carry (API key, an HTTP client) without the network
//! call itself, since payment-provider SDK internals are out of scope.
//! `create_intent` returns `EXTERNAL_UNAVAILABLE` until a real client is
//! wired in — the same posture `StripePayments` took in its pre-SDK form.

use async_trait::async_trait;

use boxoffice_core::payment::{PaymentGateway, PaymentIntent, PaymentMetadata};
use boxoffice_types::{AppError, Result};

#[derive(Clone)]
pub struct StubLiveGateway {
    #[allow(dead_code)]
    secret_key: String,
}

impl StubLiveGateway {
    pub fn new(secret_key: String) -> Self {
        Self { secret_key }
    }
}

#[async_trait]
impl PaymentGateway for StubLiveGateway {
    async fn create_intent(&self, _total_cents: i64, metadata: PaymentMetadata) -> Result<PaymentIntent> {
        tracing::warn!(
            order_number = %metadata.order_number,
            event_id = %metadata.event_id,
            seat_count = metadata.seat_ids.len(),
            "real payment provider not wired in; refusing to fabricate a live payment intent"
        );
        Err(AppError::ExternalUnavailable(
            "Payment provider is not configured for this deployment".to_string(),
        ))
    }

    fn is_mock(&self) -> bool {
        false
    }
}
