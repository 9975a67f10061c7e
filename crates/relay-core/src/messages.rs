//! # User-Facing Messages
//!
//! Processor messages are written for developers. Before a failure reaches a
//! customer it is matched against this table (case-sensitive substring,
//! first match wins) and replaced with something a shopper can act on.

/// Substring triggers and their replacements, in priority order.
pub const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    ("insufficient", "Insufficient funds. Please use a different card."),
    (
        "declined",
        "Card declined. Please contact your bank or use a different card.",
    ),
    ("expired", "Card has expired. Please use a different card."),
    (
        "Invalid card",
        "Invalid card details. Please check your information.",
    ),
    ("Invalid token", "Payment token invalid. Please try again."),
];

/// Rewrite a resolved failure message for end users.
///
/// Messages that match no trigger are returned unchanged.
pub fn friendly_message(message: &str) -> String {
    FRIENDLY_MESSAGES
        .iter()
        .find(|(trigger, _)| message.contains(*trigger))
        .map(|(_, replacement)| (*replacement).to_string())
        .unwrap_or_else(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_trigger() {
        assert_eq!(
            friendly_message("insufficient balance"),
            "Insufficient funds. Please use a different card."
        );
        assert_eq!(
            friendly_message("Card declined by issuer"),
            "Card declined. Please contact your bank or use a different card."
        );
        assert_eq!(
            friendly_message("card expired"),
            "Card has expired. Please use a different card."
        );
        assert_eq!(
            friendly_message("Invalid card number"),
            "Invalid card details. Please check your information."
        );
        assert_eq!(
            friendly_message("Invalid token supplied"),
            "Payment token invalid. Please try again."
        );
    }

    #[test]
    fn test_priority_order() {
        // "expired" appears first in the text but "declined" ranks higher
        assert_eq!(
            friendly_message("expired card was declined"),
            "Card declined. Please contact your bank or use a different card."
        );
        assert_eq!(
            friendly_message("declined: insufficient funds"),
            "Insufficient funds. Please use a different card."
        );
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(friendly_message("Card DECLINED"), "Card DECLINED");
        assert_eq!(friendly_message("invalid card"), "invalid card");
    }

    #[test]
    fn test_unmatched_passthrough() {
        assert_eq!(friendly_message("Amount too small"), "Amount too small");
        assert_eq!(friendly_message(""), "");
    }

    #[test]
    fn test_idempotent() {
        for (trigger, _) in FRIENDLY_MESSAGES {
            let once = friendly_message(trigger);
            assert_eq!(friendly_message(&once), once);
        }
    }
}
