//! Best-effort confirmation email. Failures are logged, never propagated —
//! `finalize_order` must not fail because notification did.

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_order_confirmed(&self, order_id: Uuid, customer_email: &str, ticket_count: usize);
}

/// Logs what it would have sent. Real email delivery is out of scope.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify_order_confirmed(&self, order_id: Uuid, customer_email: &str, ticket_count: usize) {
        tracing::info!(
            order_id = %order_id,
            customer_email,
            ticket_count,
            "would send order confirmation email"
        );
    }
}
