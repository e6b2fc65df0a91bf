use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::Order;

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    order_number: &str,
    event_id: Uuid,
    seat_ids: &[String],
    customer_email: &str,
    customer_name: Option<&str>,
    customer_phone: Option<&str>,
    user_id: Option<Uuid>,
    payment_status: &str,
    payment_intent_id: Option<&str>,
    subtotal_cents: i64,
    fees_cents: i64,
    tax_cents: i64,
    total_cents: i64,
    mock: bool,
) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (
            id, order_number, event_id, seat_ids, customer_email, customer_name,
            customer_phone, user_id, payment_status, payment_intent_id,
            subtotal_cents, fees_cents, tax_cents, total_cents, ticket_refs,
            mock, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, '{}', $15, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(order_number)
    .bind(event_id)
    .bind(seat_ids)
    .bind(customer_email)
    .bind(customer_name)
    .bind(customer_phone)
    .bind(user_id)
    .bind(payment_status)
    .bind(payment_intent_id)
    .bind(subtotal_cents)
    .bind(fees_cents)
    .bind(tax_cents)
    .bind(total_cents)
    .bind(mock)
    .fetch_one(&mut **tx)
    .await?;

    Ok(order)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn find_by_payment_intent(pool: &PgPool, payment_intent_id: &str) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE payment_intent_id = $1")
        .bind(payment_intent_id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn mark_succeeded(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    ticket_refs: &[Uuid],
) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET payment_status = 'succeeded',
            ticket_refs = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(ticket_refs)
    .fetch_one(&mut **tx)
    .await?;

    Ok(order)
}

pub async fn mark_failed(pool: &PgPool, id: Uuid) -> Result<Order> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
        SET payment_status = 'failed',
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(order)
}
