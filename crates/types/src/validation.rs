//! Validation helpers for hold-request shaped values.
//!
//! These centralize validation rules that are more than a single
//! `validator` derive attribute can express.

/// Validates a requested seat-id set against the per-hold cap and distinctness
/// rule (spec §4.1 preconditions: `1 <= |seatIds| <= MAX_SEATS_PER_HOLD`,
/// seatIds distinct).
pub fn validate_seat_selection(seat_ids: &[String], max_per_hold: i32) -> Result<(), String> {
    if seat_ids.is_empty() {
        return Err("At least one seat must be requested".to_string());
    }

    if seat_ids.len() as i32 > max_per_hold {
        return Err(format!(
            "Cannot request more than {} seats per hold",
            max_per_hold
        ));
    }

    let mut seen = std::collections::HashSet::with_capacity(seat_ids.len());
    for seat_id in seat_ids {
        if !seen.insert(seat_id) {
            return Err(format!("Duplicate seat id in request: {}", seat_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_selection() {
        assert!(validate_seat_selection(&[], 10).is_err());
    }

    #[test]
    fn rejects_over_cap() {
        let seats: Vec<String> = (0..11).map(|i| format!("A-R1-S{i}")).collect();
        assert!(validate_seat_selection(&seats, 10).is_err());
    }

    #[test]
    fn rejects_duplicates() {
        let seats = vec!["A-R1-S1".to_string(), "A-R1-S1".to_string()];
        assert!(validate_seat_selection(&seats, 10).is_err());
    }

    #[test]
    fn accepts_valid_selection() {
        let seats = vec!["A-R1-S1".to_string(), "A-R1-S2".to_string()];
        assert!(validate_seat_selection(&seats, 10).is_ok());
    }
}
