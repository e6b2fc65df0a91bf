use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use boxoffice_core::store::OrderRow;
use boxoffice_types::{
    api::{CheckoutIntentResponse, CreateCheckoutIntentRequest, OrderResponse, PriceBreakdown},
    validate_seat_selection, AppError,
};

use crate::middleware::{AppState, MaybeAuthUser};
use crate::response::ApiError;

fn to_response(order: OrderRow) -> OrderResponse {
    OrderResponse {
        id: order.id,
        order_number: order.order_number,
        event_id: order.event_id,
        seat_ids: order.seat_ids,
        customer_email: order.customer_email,
        payment_status: order.payment_status,
        payment_intent_id: order.payment_intent_id,
        breakdown: PriceBreakdown {
            subtotal_cents: order.subtotal_cents,
            fees_cents: order.fees_cents,
            tax_cents: order.tax_cents,
            total_cents: order.total_cents,
        },
        ticket_refs: order.ticket_refs,
        mock: order.mock,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

pub async fn create_checkout_intent(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(payload): Json<CreateCheckoutIntentRequest>,
) -> Result<Json<CheckoutIntentResponse>, ApiError> {
    validate_seat_selection(&payload.seat_ids, i32::MAX).map_err(AppError::InvalidInput)?;

    let session_id = payload
        .session_id
        .unwrap_or_else(|| format!("anon-{}", Uuid::new_v4()));

    let (order, client_secret) = state
        .checkout
        .create_checkout_intent(
            payload.event_id,
            payload.seat_ids,
            payload.customer_info.email,
            session_id,
            user.map(|u| u.id),
        )
        .await?;

    Ok(Json(CheckoutIntentResponse {
        order: to_response(order),
        client_secret,
    }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .checkout
        .orders()
        .find_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    Ok(Json(to_response(order)))
}

pub async fn finalize(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.checkout.finalize_order(order_id).await?;
    Ok(Json(to_response(order)))
}
