//! Repository for the `notification_types` lookup table.

use sqlx::PgExecutor;

use crate::models::notification::NotificationType;

/// Column list for `notification_types` queries.
const COLUMNS: &str = "id, code, name, description, is_active, created_at, updated_at";

/// Provides read operations for notification types.
///
/// Rows are created by migration/configuration, not through this repo.
pub struct NotificationTypeRepo;

impl NotificationTypeRepo {
    /// Find an active notification type by its stable code.
    ///
    /// Inactive types are treated the same as missing ones: a trigger for
    /// them must fail with not-found.
    pub async fn find_active_by_code(
        executor: impl PgExecutor<'_>,
        code: &str,
    ) -> Result<Option<NotificationType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notification_types WHERE code = $1 AND is_active = true");
        sqlx::query_as::<_, NotificationType>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// Find a notification type by ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: notifyhub_core::types::DbId,
    ) -> Result<Option<NotificationType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_types WHERE id = $1");
        sqlx::query_as::<_, NotificationType>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all notification types ordered by code.
    pub async fn list(
        executor: impl PgExecutor<'_>,
    ) -> Result<Vec<NotificationType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_types ORDER BY code");
        sqlx::query_as::<_, NotificationType>(&query)
            .fetch_all(executor)
            .await
    }
}
