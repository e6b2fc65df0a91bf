use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, PricingZone};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(event)
}

pub async fn list_pricing_zones(pool: &PgPool, event_id: Uuid) -> Result<Vec<PricingZone>> {
    let zones = sqlx::query_as::<_, PricingZone>(
        "SELECT * FROM pricing_zones WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(zones)
}

/// Test-fixture seeding helper; full event/venue CRUD lives outside this
/// crate's scope.
pub async fn seed(pool: &PgPool, id: Uuid, name: &str, status: &str, seat_index: &[String]) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO events (id, name, status, seat_index, svg)
        VALUES ($1, $2, $3, $4, NULL)
        ON CONFLICT (id) DO UPDATE SET status = EXCLUDED.status
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(status)
    .bind(seat_index)
    .execute(pool)
    .await?;

    Ok(())
}
