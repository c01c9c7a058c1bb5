//! Repository for the `notification_deliveries` ledger.

use sqlx::PgExecutor;

use notifyhub_core::channel::Channel;
use notifyhub_core::status::DeliveryStatus;
use notifyhub_core::types::DbId;

use crate::models::notification::{DeliveryHistoryEntry, NotificationDelivery};

/// Column list for `notification_deliveries` queries.
const COLUMNS: &str = "id, notification_id, user_id, channel, status, is_read, sent_at, \
                       last_attempted_at, attempts, error_message, created_at, updated_at";

/// Column list for the history/unread joins against `notifications`.
const HISTORY_COLUMNS: &str = "d.id, d.notification_id, n.title, \
                               n.content AS notification_content, d.channel, d.status, \
                               d.is_read, d.sent_at, d.created_at";

/// Provides operations for the delivery ledger.
///
/// Status transitions go through [`DeliveryRepo::mark_sent`] and
/// [`DeliveryRepo::mark_failed`]; both bump the attempts counter and stamp
/// `last_attempted_at` so a future retry scheduler has the bookkeeping it
/// needs.
pub struct DeliveryRepo;

impl DeliveryRepo {
    /// Insert a pending delivery row, returning its ID.
    ///
    /// Returns `None` when a row for the same (notification, user, channel)
    /// triple already exists: the unique constraint is the idempotency key
    /// for fan-out, and the losing writer skips instead of double-delivering.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        notification_id: DbId,
        user_id: DbId,
        channel: Channel,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notification_deliveries (notification_id, user_id, channel) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_notification_deliveries_notification_user_channel \
             DO NOTHING \
             RETURNING id",
        )
        .bind(notification_id)
        .bind(user_id)
        .bind(channel.as_str())
        .fetch_optional(executor)
        .await
    }

    /// Record a successful dispatch: pending -> sent.
    pub async fn mark_sent(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_deliveries \
             SET status = $2, sent_at = NOW(), last_attempted_at = NOW(), \
                 attempts = attempts + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(DeliveryStatus::Sent.as_str())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Record a failed dispatch: pending -> failed, with the stringified
    /// cause.
    pub async fn mark_failed(
        executor: impl PgExecutor<'_>,
        id: DbId,
        error_message: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_deliveries \
             SET status = $2, error_message = $3, last_attempted_at = NOW(), \
                 attempts = attempts + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(DeliveryStatus::Failed.as_str())
        .bind(error_message)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Bulk mark-read for in-app deliveries owned by `user_id`.
    ///
    /// Rows not owned by the user or not on the in-app channel are silently
    /// excluded. The update is a pure set, so re-marking an already-read row
    /// still counts it -- calling this twice with the same IDs returns the
    /// same count.
    pub async fn mark_read(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        delivery_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_deliveries \
             SET is_read = true, updated_at = NOW() \
             WHERE user_id = $1 AND id = ANY($2) AND channel = $3",
        )
        .bind(user_id)
        .bind(delivery_ids)
        .bind(Channel::InApp.as_str())
        .execute(executor)
        .await?;

        tracing::debug!(
            user_id,
            requested = delivery_ids.len(),
            updated = result.rows_affected(),
            "Marked in-app deliveries read"
        );
        Ok(result.rows_affected())
    }

    /// Find a delivery by ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<NotificationDelivery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_deliveries WHERE id = $1");
        sqlx::query_as::<_, NotificationDelivery>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all deliveries created for one notification, in creation order.
    pub async fn list_for_notification(
        executor: impl PgExecutor<'_>,
        notification_id: DbId,
    ) -> Result<Vec<NotificationDelivery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_deliveries \
             WHERE notification_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, NotificationDelivery>(&query)
            .bind(notification_id)
            .fetch_all(executor)
            .await
    }

    /// A user's delivery history, newest first, joined with notification
    /// content.
    pub async fn list_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<DeliveryHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} \
             FROM notification_deliveries d \
             JOIN notifications n ON n.id = d.notification_id \
             WHERE d.user_id = $1 \
             ORDER BY d.created_at DESC, d.id DESC"
        );
        sqlx::query_as::<_, DeliveryHistoryEntry>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// A user's unread in-app deliveries, newest first.
    pub async fn list_unread_in_app(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<DeliveryHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} \
             FROM notification_deliveries d \
             JOIN notifications n ON n.id = d.notification_id \
             WHERE d.user_id = $1 AND d.is_read = false AND d.channel = $2 \
             ORDER BY d.created_at DESC, d.id DESC"
        );
        sqlx::query_as::<_, DeliveryHistoryEntry>(&query)
            .bind(user_id)
            .bind(Channel::InApp.as_str())
            .fetch_all(executor)
            .await
    }
}
