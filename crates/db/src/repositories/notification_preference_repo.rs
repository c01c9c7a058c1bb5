//! Repository for the `notification_preferences` table.

use sqlx::PgExecutor;

use notifyhub_core::channel::Channel;
use notifyhub_core::types::DbId;

use crate::models::notification::NotificationPreference;

/// Column list for `notification_preferences` queries.
const COLUMNS: &str = "id, user_id, notification_type_id, channel, created_at, updated_at";

/// Provides CRUD operations for notification preferences.
pub struct NotificationPreferenceRepo;

impl NotificationPreferenceRepo {
    /// List all preferences for a user.
    pub async fn list_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 \
             ORDER BY notification_type_id, channel"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// List a user's preferences scoped to one notification type.
    ///
    /// The channel ordering here fixes the delivery-creation order within a
    /// user during fan-out. An empty result means zero deliveries for that
    /// user, not an error.
    pub async fn list_for_user_and_type(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        notification_type_id: DbId,
    ) -> Result<Vec<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences \
             WHERE user_id = $1 AND notification_type_id = $2 \
             ORDER BY channel"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(notification_type_id)
            .fetch_all(executor)
            .await
    }

    /// Insert a new preference, returning the created row.
    ///
    /// A duplicate (user, type, channel) triple surfaces as a unique
    /// violation on `uq_notification_preferences_user_type_channel`.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        notification_type_id: DbId,
        channel: Channel,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences (user_id, notification_type_id, channel) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(user_id)
            .bind(notification_type_id)
            .bind(channel.as_str())
            .fetch_one(executor)
            .await
    }

    /// Change the channel of an existing preference owned by `user_id`.
    ///
    /// Returns `None` if the row does not exist or belongs to another user.
    pub async fn update_channel(
        executor: impl PgExecutor<'_>,
        id: DbId,
        user_id: DbId,
        channel: Channel,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        let query = format!(
            "UPDATE notification_preferences \
             SET channel = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreference>(&query)
            .bind(id)
            .bind(user_id)
            .bind(channel.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Delete a preference owned by `user_id`. Returns `true` if a row was
    /// removed.
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notification_preferences WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Provision default preferences for a newly created user: one in-app
    /// row per active notification type.
    ///
    /// Get-or-create semantics -- re-running for the same user is a no-op.
    /// Returns the number of rows actually inserted.
    pub async fn provision_defaults(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notification_preferences (user_id, notification_type_id, channel) \
             SELECT $1, id, $2 FROM notification_types WHERE is_active = true \
             ON CONFLICT ON CONSTRAINT uq_notification_preferences_user_type_channel \
             DO NOTHING",
        )
        .bind(user_id)
        .bind(Channel::InApp.as_str())
        .execute(executor)
        .await?;

        tracing::debug!(
            user_id,
            provisioned = result.rows_affected(),
            "Provisioned default notification preferences"
        );
        Ok(result.rows_affected())
    }
}
