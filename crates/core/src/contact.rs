//! Outbound integration links: phone dialer, WhatsApp deep links.
//!
//! All of these are fire-and-forget URLs handed to the platform opener;
//! no response is ever read.

/// WhatsApp deep link for the business contact number.
pub const WHATSAPP_CONTACT_URL: &str = "https://wa.me/919884397271";

/// Business contact phone number, dialer format.
pub const CONTACT_PHONE: &str = "+919884397271";

/// Build a `tel:` dialer link for a phone number.
pub fn dialer_link(phone: &str) -> String {
    format!("tel:{phone}")
}

/// Build a WhatsApp share deep link with prefilled message text.
///
/// The text is query-encoded; WhatsApp opens a chat picker with the
/// message ready to send.
pub fn whatsapp_share_link(text: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("text", text)
        .finish();
    format!("https://wa.me/?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialer_link_prefixes_tel_scheme() {
        assert_eq!(dialer_link(CONTACT_PHONE), "tel:+919884397271");
    }

    #[test]
    fn share_link_encodes_text() {
        let link = whatsapp_share_link("Check out Grand Wedding!\nhttps://example.com");
        assert!(link.starts_with("https://wa.me/?text="));
        // Raw newline and space must not survive encoding.
        assert!(!link.contains('\n'));
        assert!(!link.contains(' '));
        assert!(link.contains("Grand"));
    }
}
