//! Stripe webhook signature verification and event routing. Mirrors the
//! construct-then-match shape of the old booking webhook handler, narrowed
//! to the two event types Checkout actually consumes.

use stripe::{Event, EventObject, EventType, Webhook};

use boxoffice_types::{AppError, Result};

/// The subset of a verified webhook delivery that Checkout cares about.
/// Every other event type is parsed (to validate the signature) and
/// discarded as `Ignored`.
#[derive(Debug, Clone)]
pub enum WebhookOutcome {
    PaymentSucceeded { payment_intent_id: String },
    PaymentFailed { payment_intent_id: String },
    Ignored,
}

/// Verifies the `Stripe-Signature` header against `webhook_secret` and
/// extracts the outcome. Returns `InvalidInput` for a bad signature or
/// malformed payload rather than panicking — the caller should answer the
/// webhook with 400 so Stripe doesn't retry a payload we'll never accept.
pub fn verify_and_parse(payload: &str, signature: &str, webhook_secret: &str) -> Result<WebhookOutcome> {
    let event: Event = Webhook::construct_event(payload, signature, webhook_secret)
        .map_err(|err| AppError::InvalidInput(format!("invalid webhook signature: {err}")))?;

    let outcome = match event.type_ {
        EventType::PaymentIntentSucceeded => payment_intent_id(&event)
            .map(|payment_intent_id| WebhookOutcome::PaymentSucceeded { payment_intent_id }),
        EventType::PaymentIntentPaymentFailed => payment_intent_id(&event)
            .map(|payment_intent_id| WebhookOutcome::PaymentFailed { payment_intent_id }),
        _ => None,
    };

    Ok(outcome.unwrap_or(WebhookOutcome::Ignored))
}

fn payment_intent_id(event: &Event) -> Option<String> {
    match &event.data.object {
        EventObject::PaymentIntent(intent) => Some(intent.id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_signature_is_rejected_as_invalid_input() {
        let err = verify_and_parse("{}", "t=1,v1=deadbeef", "whsec_test").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
