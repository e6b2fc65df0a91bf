use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;
use utoipa::ToSchema;

/// Status of a single `(event, seat)` row.
///
/// Transitions are one-directional: `Available -> Held -> Sold`, with
/// `Held -> Available` on release/expiry. `Sold` is terminal for the life
/// of the event (I4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    #[default]
    Available,
    Held,
    Sold,
}

impl FromStr for SeatStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "held" => Ok(Self::Held),
            "sold" => Ok(Self::Sold),
            "available" => Ok(Self::Available),
            _ => Err(()),
        }
    }
}

/// Order payment lifecycle. DAG: Pending -> {Succeeded, Failed}; Succeeded -> Refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(()),
        }
    }
}

/// Status of the parent event (external `EventCatalog` collaborator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export, export_to = "../../../frontend/src/lib/types/")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(()),
        }
    }
}
