//! Checkout pricing: section lookup by seat id, fee/tax calculation.

use boxoffice_types::{parse_section, AppError, Result};

use crate::store::{EventCatalog, PricingZoneRow};

const FEE_BASIS_POINTS: i64 = 500; // 5%
const TAX_BASIS_POINTS: i64 = 800; // 8%

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub subtotal_cents: i64,
    pub fees_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

fn round_half_up_bp(amount_cents: i64, basis_points: i64) -> i64 {
    (amount_cents * basis_points + 5_000) / 10_000
}

/// Looks up each seat's pricing zone and sums the subtotal, applying fees
/// and tax on top.
pub async fn price_seats(
    catalog: &dyn EventCatalog,
    event_id: uuid::Uuid,
    seat_ids: &[String],
) -> Result<PriceBreakdown> {
    let mut subtotal_cents = 0i64;

    for seat_id in seat_ids {
        let section = parse_section(seat_id)
            .ok_or_else(|| AppError::InvalidInput(format!("Seat {seat_id} has no parseable section")))?;

        let zone: PricingZoneRow = catalog
            .find_pricing_zone(event_id, &section.0)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Pricing zone {}", section.0)))?;

        subtotal_cents += zone.price_cents;
    }

    let fees_cents = round_half_up_bp(subtotal_cents, FEE_BASIS_POINTS);
    let tax_cents = round_half_up_bp(subtotal_cents, TAX_BASIS_POINTS);
    let total_cents = subtotal_cents + fees_cents + tax_cents;

    Ok(PriceBreakdown {
        subtotal_cents,
        fees_cents,
        tax_cents,
        total_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FakeEventCatalog;
    use boxoffice_types::enums::EventStatus;
    use uuid::Uuid;

    #[tokio::test]
    async fn sums_subtotal_and_applies_fee_and_tax() {
        let catalog = FakeEventCatalog::new();
        let event_id = Uuid::new_v4();
        catalog.seed_event(event_id, "E1", EventStatus::Published, vec!["A-R1-S1".to_string()]);
        catalog.seed_zone(event_id, "A", "Orchestra", 1_000, "USD");

        let seats = vec!["A-R1-S1".to_string(), "A-R1-S2".to_string()];
        let breakdown = price_seats(&catalog, event_id, &seats).await.unwrap();

        assert_eq!(breakdown.subtotal_cents, 2_000);
        assert_eq!(breakdown.fees_cents, 100);
        assert_eq!(breakdown.tax_cents, 160);
        assert_eq!(breakdown.total_cents, 2_260);
    }

    #[tokio::test]
    async fn missing_zone_is_not_found() {
        let catalog = FakeEventCatalog::new();
        let event_id = Uuid::new_v4();
        let err = price_seats(&catalog, event_id, &["A-R1-S1".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
