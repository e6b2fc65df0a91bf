use rand::{distributions::Alphanumeric, Rng};

/// Generate a human-readable order number (`BX-XXXXX`).
pub fn generate_order_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();

    format!("BX-{}", suffix.to_uppercase())
}

/// Generate an opaque ticket code. The QR *image* encoding of this value is
/// out of scope; `QrCodeEncoder` consumes this string verbatim.
pub fn generate_ticket_code() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    format!("TIX-{}", suffix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_has_expected_shape() {
        let code = generate_order_number();
        assert!(code.starts_with("BX-"));
        assert_eq!(code.len(), "BX-".len() + 8);
    }

    #[test]
    fn ticket_code_has_expected_shape() {
        let code = generate_ticket_code();
        assert!(code.starts_with("TIX-"));
        assert_eq!(code.len(), "TIX-".len() + 16);
    }

    #[test]
    fn codes_are_not_trivially_repeated() {
        assert_ne!(generate_ticket_code(), generate_ticket_code());
    }
}
