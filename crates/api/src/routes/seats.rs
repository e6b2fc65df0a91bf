use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use boxoffice_types::{
    api::{HoldResponse, HoldSeatsRequest, ReleaseSeatsRequest, SeatAvailability, SeatPlanResponse},
    AppError,
};

use crate::middleware::{AppState, MaybeAuthUser};
use crate::response::ApiError;

pub async fn get_status(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<SeatAvailability>>, ApiError> {
    Ok(Json(state.arbiter.get_availability(event_id).await?))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<SeatPlanResponse>, ApiError> {
    Ok(Json(state.arbiter.get_seat_plan(event_id).await?))
}

pub async fn hold(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(payload): Json<HoldSeatsRequest>,
) -> Result<Json<HoldResponse>, ApiError> {
    let session_id = payload
        .session_id
        .ok_or_else(|| AppError::InvalidInput("sessionId is required".to_string()))?;

    state.rate_limiter.check(&session_id)?;

    let hold = state
        .arbiter
        .hold_seats(payload.event_id, payload.seat_ids, session_id, user.map(|u| u.id))
        .await?;

    Ok(Json(HoldResponse {
        hold_id: hold.id,
        event_id: hold.event_id,
        seat_ids: hold.seat_ids,
        session_id: hold.session_id,
        user_id: hold.user_id,
        expires_at: hold.expires_at,
        created_at: hold.created_at,
    }))
}

pub async fn release(
    State(state): State<AppState>,
    Json(payload): Json<ReleaseSeatsRequest>,
) -> Result<(), ApiError> {
    state.arbiter.release_seats(payload.hold_id, &payload.session_id).await
}
