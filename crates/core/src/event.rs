//! The closed set of trigger events.
//!
//! Each variant owns its message template and payload requirements, so an
//! unsupported event is rejected by [`TriggerEvent::parse`] at the API
//! boundary instead of by a runtime string comparison deep in the fan-out
//! path.

use std::collections::HashMap;

use crate::error::CoreError;

/// Payload accompanying a trigger request: free-form string key/value pairs
/// whose required keys depend on the event.
pub type EventPayload = HashMap<String, String>;

/// An administrative event that fans out into notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// A comment was posted; broadcast to all users.
    NewComment,
    /// A login from an unrecognized device; targeted at the single user
    /// named by the payload's `user_id`.
    NewLogin,
    /// Periodic summary; broadcast to all users.
    WeeklySummary,
}

impl TriggerEvent {
    /// The stable event code used on the wire and as
    /// `notification_types.code`.
    pub fn code(self) -> &'static str {
        match self {
            TriggerEvent::NewComment => "new_comment",
            TriggerEvent::NewLogin => "new_login",
            TriggerEvent::WeeklySummary => "weekly_summary",
        }
    }

    /// Parse an event code. `None` means the event is unsupported.
    pub fn parse(code: &str) -> Option<TriggerEvent> {
        match code {
            "new_comment" => Some(TriggerEvent::NewComment),
            "new_login" => Some(TriggerEvent::NewLogin),
            "weekly_summary" => Some(TriggerEvent::WeeklySummary),
            _ => None,
        }
    }

    /// Whether the resulting notification is addressed to every user.
    ///
    /// Only `new_login` is targeted; all other events broadcast.
    pub fn is_global(self) -> bool {
        !matches!(self, TriggerEvent::NewLogin)
    }

    /// Check that the payload carries the keys this event requires.
    pub fn validate_payload(self, payload: &EventPayload) -> Result<(), CoreError> {
        match self {
            TriggerEvent::NewLogin => {
                if !payload.contains_key("user_id") {
                    return Err(CoreError::Validation(
                        "Event 'new_login' requires a 'user_id' key in data".into(),
                    ));
                }
                Ok(())
            }
            TriggerEvent::NewComment | TriggerEvent::WeeklySummary => Ok(()),
        }
    }

    /// Render the notification message for this event. Pure; no side
    /// effects.
    pub fn render_message(self, payload: &EventPayload) -> String {
        match self {
            TriggerEvent::NewComment => {
                let comment = payload
                    .get("comment")
                    .map(String::as_str)
                    .unwrap_or("(no content)");
                format!("New comment posted: {comment}")
            }
            TriggerEvent::NewLogin => "New login from an unrecognized device.".to_string(),
            TriggerEvent::WeeklySummary => "Here is your weekly summary.".to_string(),
        }
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
