use anyhow::Result;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::SeatState;

/// All rows for an event, for `get_availability`/`get_seat_plan`.
pub async fn list_for_event(pool: &PgPool, event_id: Uuid) -> Result<Vec<SeatState>> {
    let rows = sqlx::query_as::<_, SeatState>(
        "SELECT * FROM event_seats WHERE event_id = $1 ORDER BY seat_id",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn find_many(
    pool: &PgPool,
    event_id: Uuid,
    seat_ids: &[String],
) -> Result<Vec<SeatState>> {
    let rows = sqlx::query_as::<_, SeatState>(
        "SELECT * FROM event_seats WHERE event_id = $1 AND seat_id = ANY($2)",
    )
    .bind(event_id)
    .bind(seat_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The core of the Hold Arbiter's contention algorithm: flip every listed
/// seat from `available` to `held` in one statement and hand back only the
/// seat_ids that actually flipped. The caller compares the returned set
/// against the requested set to decide all-or-nothing success.
pub async fn try_hold_seats(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    seat_ids: &[String],
    hold_id: Uuid,
) -> Result<Vec<String>> {
    let now = Utc::now();
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE event_seats
        SET status = 'held',
            hold_ref = $3,
            version = version + 1,
            last_updated = $4
        WHERE event_id = $1
          AND seat_id = ANY($2)
          AND status = 'available'
        RETURNING seat_id
        "#,
    )
    .bind(event_id)
    .bind(seat_ids)
    .bind(hold_id)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Compensating rollback: releases exactly the seats this hold actually
/// flipped, back to `available`. Run inside the same transaction as
/// `try_hold_seats` when the requested set wasn't fully granted.
pub async fn release_held_by(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    hold_id: Uuid,
) -> Result<Vec<String>> {
    let now = Utc::now();
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE event_seats
        SET status = 'available',
            hold_ref = NULL,
            version = version + 1,
            last_updated = $3
        WHERE event_id = $1
          AND hold_ref = $2
          AND status = 'held'
        RETURNING seat_id
        "#,
    )
    .bind(event_id)
    .bind(hold_id)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Releases seats held by `hold_id` on a plain pool connection, used by
/// `release_seats` and the Expiration Worker (no enclosing transaction
/// needed since it's a single statement).
pub async fn release_held_by_pool(
    pool: &PgPool,
    event_id: Uuid,
    hold_id: Uuid,
) -> Result<Vec<String>> {
    let now = Utc::now();
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE event_seats
        SET status = 'available',
            hold_ref = NULL,
            version = version + 1,
            last_updated = $3
        WHERE event_id = $1
          AND hold_ref = $2
          AND status = 'held'
        RETURNING seat_id
        "#,
    )
    .bind(event_id)
    .bind(hold_id)
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Transitions the named seats on an order to `sold`, conditioned only on
/// not already being sold (I9/finalize is idempotent against a seat this
/// same order already sold). Returns the seat_ids actually flipped; the
/// caller treats a short count as `SEAT_CONFLICT`.
pub async fn mark_sold(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    seat_ids: &[String],
    order_id: Uuid,
) -> Result<Vec<String>> {
    let now = Utc::now();
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE event_seats
        SET status = 'sold',
            hold_ref = NULL,
            order_ref = $3,
            version = version + 1,
            last_updated = $4
        WHERE event_id = $1
          AND seat_id = ANY($2)
          AND (status != 'sold' OR order_ref = $3)
        RETURNING seat_id
        "#,
    )
    .bind(event_id)
    .bind(seat_ids)
    .bind(order_id)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Seeds `available` rows for a seat index, used only by test fixtures.
pub async fn seed_available(pool: &PgPool, event_id: Uuid, seat_ids: &[String]) -> Result<()> {
    let now = Utc::now();
    for seat_id in seat_ids {
        sqlx::query(
            r#"
            INSERT INTO event_seats (event_id, seat_id, status, version, last_updated)
            VALUES ($1, $2, 'available', 0, $3)
            ON CONFLICT (event_id, seat_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(seat_id)
        .bind(now)
        .execute(pool)
        .await?;
    }

    Ok(())
}
