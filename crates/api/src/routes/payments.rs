use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::body::Bytes;

use boxoffice_integrations::payment::{verify_and_parse, WebhookOutcome};
use boxoffice_types::AppError;

use crate::middleware::AppState;
use crate::response::ApiError;

/// `payment_intent.succeeded` finalizes the order; `payment_intent.payment_failed`
/// marks it `FAILED`. Every other event type is ignored after signature
/// verification. Idempotent against Stripe's at-least-once delivery — see
/// `CheckoutCoordinator::on_payment_success`.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::InvalidInput("missing stripe-signature header".to_string()))?;

    let payload = std::str::from_utf8(&body)
        .map_err(|e| AppError::InvalidInput(format!("invalid UTF-8 payload: {e}")))?;

    let outcome = verify_and_parse(payload, signature, &state.webhook_secret)?;

    match outcome {
        WebhookOutcome::PaymentSucceeded { payment_intent_id } => {
            state.checkout.on_payment_success(&payment_intent_id).await?;
        }
        WebhookOutcome::PaymentFailed { payment_intent_id } => {
            state.checkout.on_payment_failure(&payment_intent_id).await?;
        }
        WebhookOutcome::Ignored => {}
    }

    Ok(StatusCode::OK)
}
