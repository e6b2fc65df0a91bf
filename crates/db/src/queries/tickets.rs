use anyhow::Result;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::models::Ticket;

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    order_id: Uuid,
    event_id: Uuid,
    seat_id: &str,
    ticket_code: &str,
) -> Result<Ticket> {
    let ticket = sqlx::query_as::<_, Ticket>(
        r#"
        INSERT INTO tickets (id, order_id, event_id, seat_id, ticket_code, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(order_id)
    .bind(event_id)
    .bind(seat_id)
    .bind(ticket_code)
    .fetch_one(&mut **tx)
    .await?;

    Ok(ticket)
}

pub async fn find_by_order(tx: &mut Transaction<'_, Postgres>, order_id: Uuid) -> Result<Vec<Ticket>> {
    let tickets = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE order_id = $1")
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;

    Ok(tickets)
}
