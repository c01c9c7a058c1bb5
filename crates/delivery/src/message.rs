//! The channel-agnostic outbound message.

/// Everything a transport needs to address and render one delivery.
///
/// Built by the fan-out engine from the notification row and the target
/// user; transports pick the addressing fields relevant to their medium.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub title: String,
    pub content: String,
}

impl OutboundMessage {
    /// The SMS recipient: phone number when present, username otherwise.
    pub fn sms_recipient(&self) -> &str {
        self.phone_number.as_deref().unwrap_or(&self.username)
    }
}
