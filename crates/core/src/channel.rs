//! Delivery channel vocabulary.
//!
//! Channels form a closed set; everything that varies per channel (transport
//! selection, read-tracking) is keyed off this enum rather than string
//! comparison. The string forms below must match the values stored in the
//! `channel` columns of `notification_preferences` and
//! `notification_deliveries`.

use serde::{Deserialize, Serialize};

/// A delivery medium for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Stored for the notification bell UI; the only channel with
    /// read-tracking.
    InApp,
    /// Delivered to the user's email address via SMTP.
    Email,
    /// Delivered to the user's phone number.
    Sms,
}

impl Channel {
    /// Every supported channel, in dispatch order.
    pub const ALL: [Channel; 3] = [Channel::InApp, Channel::Email, Channel::Sms];

    /// The stable string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::InApp => "in_app",
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }

    /// Parse a stored channel value. Returns `None` for unknown strings.
    pub fn parse(s: &str) -> Option<Channel> {
        match s {
            "in_app" => Some(Channel::InApp),
            "email" => Some(Channel::Email),
            "sms" => Some(Channel::Sms),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
