//! WhatsApp click-to-chat links.

/// Base URL of the click-to-chat endpoint.
const WA_ME: &str = "https://wa.me";

/// Build a `wa.me` link that opens a chat with `number` prefilled with `message`.
///
/// `number` must already be normalized to digits (see `StorefrontConfig`).
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("{WA_ME}/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_encodes_message() {
        let link = whatsapp_link("543855227041", "¡Hola!\n- Remera (x2)");
        assert_eq!(
            link,
            "https://wa.me/543855227041?text=%C2%A1Hola%21%0A-%20Remera%20%28x2%29"
        );
    }

    #[test]
    fn test_link_keeps_emoji_round_trippable() {
        let message = "💰 Total: $40.00 & más";
        let link = whatsapp_link("5491100000000", message);
        let encoded = link
            .split_once("?text=")
            .map(|(_, text)| text)
            .unwrap_or_default();
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('&'));
        assert_eq!(urlencoding::decode(encoded).unwrap_or_default(), message);
    }
}
