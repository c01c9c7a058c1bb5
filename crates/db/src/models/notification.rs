//! Notification entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notifyhub_core::channel::Channel;
use notifyhub_core::types::{DbId, Timestamp};

/// A row from the `notification_types` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationType {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `notification_preferences` table.
///
/// One row per (user, notification type, channel) opt-in; the `channel`
/// column holds the stable string form of [`Channel`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type_id: DbId,
    pub channel: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NotificationPreference {
    /// The typed channel, or `None` if the stored value is unknown (only
    /// possible if the CHECK constraint and enum drift apart).
    pub fn channel(&self) -> Option<Channel> {
        Channel::parse(&self.channel)
    }
}

/// A row from the `notifications` table: one concrete notification
/// instance created per trigger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub notification_type_id: DbId,
    pub title: String,
    pub content: String,
    pub is_global: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// A row from the `notification_deliveries` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationDelivery {
    pub id: DbId,
    pub notification_id: DbId,
    pub user_id: DbId,
    pub channel: String,
    pub status: String,
    pub is_read: bool,
    pub sent_at: Option<Timestamp>,
    pub last_attempted_at: Option<Timestamp>,
    pub attempts: i32,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A delivery joined with its notification content, as returned by the
/// history and unread listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeliveryHistoryEntry {
    pub id: DbId,
    pub notification_id: DbId,
    pub title: String,
    pub notification_content: String,
    pub channel: String,
    pub status: String,
    pub is_read: bool,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification preference.
#[derive(Debug, Deserialize)]
pub struct CreatePreference {
    pub notification_type_id: DbId,
    pub channel: Channel,
}

/// DTO for updating a notification preference's channel.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub channel: Channel,
}
