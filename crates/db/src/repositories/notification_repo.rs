//! Repository for the `notifications` table.

use sqlx::PgExecutor;

use notifyhub_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, notification_type_id, title, content, is_global, metadata, created_at";

/// Provides operations for concrete notification instances.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification row, returning the generated ID.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        notification_type_id: DbId,
        title: &str,
        content: &str,
        is_global: bool,
        metadata: Option<&serde_json::Value>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (notification_type_id, title, content, is_global, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(notification_type_id)
        .bind(title)
        .bind(content)
        .bind(is_global)
        .bind(metadata)
        .fetch_one(executor)
        .await
    }

    /// Find a notification by ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
