use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use boxoffice_types::{
    api::{SeatAvailability, SeatPlanEntry, SeatPlanResponse, SectionSummary},
    enums::{EventStatus, SeatStatus},
    parse_section, validate_seat_selection, AppError, Result,
};

use crate::broadcast::{SeatBroadcaster, SeatDelta};
use crate::cache::HoldCache;
use crate::store::{EventCatalog, HoldRow, HoldStore, SeatRow, SeatStore};

/// Grants, extends, and releases holds; arbitrates contention.
///
/// The whole contention algorithm is: ask the seat store to try an
/// all-or-nothing conditional flip, and treat a short result as
/// `SEAT_CONFLICT`. Reclaiming another session's stale hold is attempted
/// opportunistically before the conflict is surfaced, never as a
/// precondition for granting.
pub struct HoldArbiter {
    seats: Arc<dyn SeatStore>,
    holds: Arc<dyn HoldStore>,
    catalog: Arc<dyn EventCatalog>,
    broadcaster: Arc<dyn SeatBroadcaster>,
    cache: Arc<dyn HoldCache>,
    max_seats_per_hold: i32,
    hold_ttl: Duration,
}

impl HoldArbiter {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        seats: Arc<dyn SeatStore>,
        holds: Arc<dyn HoldStore>,
        catalog: Arc<dyn EventCatalog>,
        broadcaster: Arc<dyn SeatBroadcaster>,
        cache: Arc<dyn HoldCache>,
        max_seats_per_hold: i32,
        hold_ttl: Duration,
    ) -> Self {
        Self {
            seats,
            holds,
            catalog,
            broadcaster,
            cache,
            max_seats_per_hold,
            hold_ttl,
        }
    }

    async fn ensure_event_published(&self, event_id: Uuid) -> Result<()> {
        let event = self
            .catalog
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event".to_string()))?;

        if event.status != EventStatus::Published {
            return Err(AppError::InvalidState(
                "This event is not currently available for booking.".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn hold_seats(
        &self,
        event_id: Uuid,
        seat_ids: Vec<String>,
        session_id: String,
        user_id: Option<Uuid>,
    ) -> Result<HoldRow> {
        validate_seat_selection(&seat_ids, self.max_seats_per_hold).map_err(AppError::InvalidInput)?;
        self.ensure_event_published(event_id).await?;

        let rows = self.seats.find_many(event_id, &seat_ids).await?;
        if rows.len() != seat_ids.len() {
            return Err(AppError::NotFound("Seat".to_string()));
        }

        let existing = self.holds.find_by_session(event_id, &session_id).await?;
        let already_mine: HashSet<&str> = existing
            .as_ref()
            .map(|h| h.seat_ids.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let mut to_grant: Vec<String> = Vec::new();
        let now = Utc::now();

        for row in &rows {
            if already_mine.contains(row.seat_id.as_str()) {
                continue;
            }

            match row.status {
                SeatStatus::Sold => {
                    return Err(AppError::SeatConflict(row.seat_id.clone()));
                }
                SeatStatus::Available => {
                    to_grant.push(row.seat_id.clone());
                }
                SeatStatus::Held => {
                    let Some(other_hold_id) = row.hold_ref else {
                        // Inconsistent row (I1 violated upstream); treat as reclaimable.
                        to_grant.push(row.seat_id.clone());
                        continue;
                    };

                    let other_hold = self.holds.find_by_id(other_hold_id).await?;
                    let stale = match &other_hold {
                        None => true,
                        Some(h) => h.expires_at < now,
                    };

                    if !stale {
                        return Err(AppError::SeatConflict(row.seat_id.clone()));
                    }

                    if let Some(h) = &other_hold {
                        crate::expiration::reclaim_hold(
                            self.seats.as_ref(),
                            self.holds.as_ref(),
                            self.cache.as_ref(),
                            h,
                        )
                        .await?;
                    } else {
                        self.seats.release_held_by(event_id, other_hold_id).await?;
                    }
                    to_grant.push(row.seat_id.clone());
                }
            }
        }

        let hold_id = existing.as_ref().map(|h| h.id).unwrap_or_else(Uuid::new_v4);

        if !to_grant.is_empty() {
            let granted = self.seats.try_hold(event_id, &to_grant, hold_id).await?;
            if granted.len() != to_grant.len() {
                // All-or-nothing: nothing from this call is left HELD.
                if existing.is_none() {
                    self.seats.release_held_by(event_id, hold_id).await?;
                }
                return Err(AppError::SeatConflict(seat_ids.join(",")));
            }
        }

        let expires_at = now + chrono::Duration::from_std(self.hold_ttl).unwrap_or(chrono::Duration::minutes(10));

        let mut union_seat_ids: Vec<String> = existing
            .as_ref()
            .map(|h| h.seat_ids.clone())
            .unwrap_or_default();
        for seat_id in &to_grant {
            if !union_seat_ids.contains(seat_id) {
                union_seat_ids.push(seat_id.clone());
            }
        }

        let hold = match existing {
            Some(_) => self.holds.extend(hold_id, &union_seat_ids, expires_at).await?,
            None => {
                self.holds
                    .insert(hold_id, event_id, &union_seat_ids, &session_id, user_id, expires_at)
                    .await?
            }
        };

        self.cache.put(hold.id, &hold.seat_ids, hold.expires_at).await;

        if !to_grant.is_empty() {
            let updates = to_grant
                .iter()
                .map(|seat_id| SeatDelta {
                    seat_id: seat_id.clone(),
                    status: SeatStatus::Held,
                })
                .collect();
            self.broadcaster
                .publish_availability_update(event_id, updates, now)
                .await;
        }

        Ok(hold)
    }

    pub async fn release_seats(&self, hold_id: Uuid, session_id: &str) -> Result<()> {
        let hold = self
            .holds
            .find_by_id(hold_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Hold".to_string()))?;

        if hold.session_id != session_id {
            return Err(AppError::Unauthorized);
        }

        let released = self.seats.release_held_by(hold.event_id, hold_id).await?;
        self.holds.delete(hold_id).await?;
        self.cache.invalidate(hold_id).await;

        if !released.is_empty() {
            let updates = released
                .into_iter()
                .map(|seat_id| SeatDelta {
                    seat_id,
                    status: SeatStatus::Available,
                })
                .collect();
            self.broadcaster
                .publish_availability_update(hold.event_id, updates, Utc::now())
                .await;
        }

        Ok(())
    }

    pub async fn get_availability(&self, event_id: Uuid) -> Result<Vec<SeatAvailability>> {
        let rows = self.seats.list_for_event(event_id).await?;
        Ok(rows
            .into_iter()
            .map(|row: SeatRow| SeatAvailability {
                seat_id: row.seat_id,
                status: row.status,
                last_updated: row.last_updated,
            })
            .collect())
    }

    pub async fn get_seat_plan(&self, event_id: Uuid) -> Result<SeatPlanResponse> {
        let event = self
            .catalog
            .find_event(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event".to_string()))?;

        let rows = self.seats.list_for_event(event_id).await?;
        let status_by_seat: std::collections::HashMap<&str, SeatStatus> =
            rows.iter().map(|r| (r.seat_id.as_str(), r.status)).collect();

        let mut seats = Vec::with_capacity(event.seat_index.len());
        let mut section_codes: Vec<String> = Vec::new();

        for seat_id in &event.seat_index {
            let section = parse_section(seat_id).map(|s| s.0).unwrap_or_default();
            if !section_codes.contains(&section) {
                section_codes.push(section.clone());
            }

            seats.push(SeatPlanEntry {
                seat_id: seat_id.clone(),
                section,
                status: status_by_seat.get(seat_id.as_str()).copied().unwrap_or_default(),
            });
        }

        let mut sections = Vec::with_capacity(section_codes.len());
        for code in section_codes {
            if let Some(zone) = self.catalog.find_pricing_zone(event_id, &code).await? {
                sections.push(SectionSummary {
                    code,
                    name: zone.name,
                    price_cents: zone.price_cents,
                    currency: zone.currency,
                });
            }
        }

        Ok(SeatPlanResponse {
            event_id,
            seats,
            sections,
            svg: event.svg,
        })
    }
}
