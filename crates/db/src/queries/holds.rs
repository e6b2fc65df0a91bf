use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::Hold;

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    event_id: Uuid,
    seat_ids: &[String],
    session_id: &str,
    user_id: Option<Uuid>,
    expires_at: DateTime<Utc>,
) -> Result<Hold> {
    let hold = sqlx::query_as::<_, Hold>(
        r#"
        INSERT INTO seat_holds (id, event_id, seat_ids, session_id, user_id, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(event_id)
    .bind(seat_ids)
    .bind(session_id)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(hold)
}

/// Augments an existing Hold with a new seat set and resets `expires_at`,
/// used when `hold_seats` extends a session's already-live Hold.
pub async fn extend(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    seat_ids: &[String],
    expires_at: DateTime<Utc>,
) -> Result<Hold> {
    let hold = sqlx::query_as::<_, Hold>(
        r#"
        UPDATE seat_holds
        SET seat_ids = $2, expires_at = $3
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(seat_ids)
    .bind(expires_at)
    .fetch_one(&mut **tx)
    .await?;

    Ok(hold)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Hold>> {
    let hold = sqlx::query_as::<_, Hold>("SELECT * FROM seat_holds WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(hold)
}

pub async fn find_by_session(pool: &PgPool, event_id: Uuid, session_id: &str) -> Result<Option<Hold>> {
    let hold = sqlx::query_as::<_, Hold>(
        "SELECT * FROM seat_holds WHERE event_id = $1 AND session_id = $2",
    )
    .bind(event_id)
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(hold)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM seat_holds WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_tx(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM seat_holds WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Holds whose `expires_at` has passed, for the Expiration Worker's tick.
pub async fn find_expired(pool: &PgPool, before: DateTime<Utc>) -> Result<Vec<Hold>> {
    let holds = sqlx::query_as::<_, Hold>("SELECT * FROM seat_holds WHERE expires_at < $1")
        .bind(before)
        .fetch_all(pool)
        .await?;

    Ok(holds)
}
