use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::SeatStatus;

/// One row of `GET /seats/event/{eventId}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct SeatAvailability {
    pub seat_id: String,
    pub status: SeatStatus,
    pub last_updated: DateTime<Utc>,
}

/// A seat as it appears on the seat plan: live status plus the (minimal)
/// layout data owned by the external venue/event catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct SeatPlanEntry {
    pub seat_id: String,
    pub section: String,
    pub status: SeatStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct SectionSummary {
    pub code: String,
    pub name: String,
    pub price_cents: i64,
    pub currency: String,
}

/// `GET /seats/event/{eventId}/plan` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct SeatPlanResponse {
    pub event_id: Uuid,
    pub seats: Vec<SeatPlanEntry>,
    pub sections: Vec<SectionSummary>,
    /// Venue SVG layout, passed through from the external catalog verbatim.
    pub svg: Option<String>,
}

/// `POST /seats/hold` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct HoldSeatsRequest {
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    /// Generated client-side and persisted across reconnects if absent here
    /// the caller is expected to have supplied it via an authenticated session.
    pub session_id: Option<String>,
}

/// `DELETE /seats/release` request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReleaseSeatsRequest {
    pub hold_id: Uuid,
    pub session_id: String,
}

/// Returned by `holdSeats`/`releaseSeats` and `GET` of the current hold.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
pub struct HoldResponse {
    pub hold_id: Uuid,
    pub event_id: Uuid,
    pub seat_ids: Vec<String>,
    pub session_id: String,
    pub user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
