//! The "external payment authority" seam. `MockPaymentGateway` is the
//! synchronous-success implementation used when no provider is
//! configured; a shape-only real-provider implementation lives in
//! `boxoffice-integrations::payment` and satisfies the same trait.

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

use boxoffice_types::Result;

#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent for `total_cents` minor units. `metadata`
    /// is attached as provider-side metadata for webhook reconciliation.
    async fn create_intent(&self, total_cents: i64, metadata: PaymentMetadata) -> Result<PaymentIntent>;

    /// True if this gateway finalizes synchronously within
    /// `create_intent` rather than waiting on a webhook.
    fn is_mock(&self) -> bool;
}

/// Attached to the provider-side intent so a webhook delivered with only a
/// `payment_intent_id` can be reconciled back to what was being sold,
/// without a round trip to the order store.
#[derive(Debug, Clone)]
pub struct PaymentMetadata {
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub order_number: String,
    pub customer_email: String,
    pub session_id: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Synchronous-success implementation used when `PAYMENT_PROVIDER_KEY` is
/// unset. Never makes a network call.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(&self, _total_cents: i64, _metadata: PaymentMetadata) -> Result<PaymentIntent> {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(20)
            .map(char::from)
            .collect();

        Ok(PaymentIntent {
            id: format!("pi_mock_{}", suffix.to_lowercase()),
            client_secret: None,
        })
    }

    fn is_mock(&self) -> bool {
        true
    }
}
