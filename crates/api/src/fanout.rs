//! The notification fan-out engine.
//!
//! [`FanoutEngine::trigger`] turns one administrative event into a
//! notification row plus one delivery row per (target user, preferred
//! channel), dispatching each delivery synchronously and recording the
//! outcome in the ledger. The whole sequence runs inside a single
//! transaction: either every row commits or none do. A failed dispatch is
//! not a transaction failure -- it is recorded on the delivery row itself
//! and the loop keeps going.

use std::sync::Arc;

use sqlx::PgConnection;

use notifyhub_core::error::CoreError;
use notifyhub_core::event::{EventPayload, TriggerEvent};
use notifyhub_core::types::DbId;
use notifyhub_db::models::user::User;
use notifyhub_db::repositories::{
    DeliveryRepo, NotificationPreferenceRepo, NotificationRepo, NotificationTypeRepo, UserRepo,
};
use notifyhub_db::DbPool;
use notifyhub_delivery::{Dispatcher, OutboundMessage};

use crate::error::AppError;

/// Result of a successful trigger.
///
/// `deliveries_created` counts ledger rows created, not successful sends;
/// a trigger where every dispatch failed still reports the full count.
#[derive(Debug, Clone, Copy)]
pub struct TriggerOutcome {
    pub notification_id: DbId,
    pub deliveries_created: u64,
}

/// Orchestrates trigger -> resolve recipients -> resolve preferences ->
/// create deliveries -> dispatch -> record.
pub struct FanoutEngine {
    pool: DbPool,
    dispatcher: Arc<Dispatcher>,
}

impl FanoutEngine {
    pub fn new(pool: DbPool, dispatcher: Arc<Dispatcher>) -> Self {
        Self { pool, dispatcher }
    }

    /// Fan out one event.
    ///
    /// Fails before any mutation on an unsupported event code (400), a
    /// payload missing required keys (400), or a missing/inactive
    /// notification type (404). Storage errors roll back every row created
    /// in this trigger.
    pub async fn trigger(
        &self,
        event_code: &str,
        payload: &EventPayload,
    ) -> Result<TriggerOutcome, AppError> {
        tracing::info!(event = event_code, "Notification trigger requested");

        let event = TriggerEvent::parse(event_code).ok_or_else(|| {
            tracing::warn!(event = event_code, "Unsupported event type");
            CoreError::Validation("Invalid or unsupported event name.".into())
        })?;
        event.validate_payload(payload)?;

        let notify_type = NotificationTypeRepo::find_active_by_code(&self.pool, event.code())
            .await?
            .ok_or_else(|| {
                tracing::warn!(event = event_code, "Notification type not found or inactive");
                CoreError::NotFound {
                    entity: "NotificationType",
                    key: event.code().to_string(),
                }
            })?;
        tracing::debug!(notification_type_id = notify_type.id, "Resolved notification type");

        let message = event.render_message(payload);
        tracing::debug!(event = %event, message = %message, "Generated message content");

        let metadata = if payload.is_empty() {
            None
        } else {
            serde_json::to_value(payload).ok()
        };

        let mut tx = self.pool.begin().await?;

        let notification_id = NotificationRepo::create(
            &mut *tx,
            notify_type.id,
            &notify_type.name,
            &message,
            event.is_global(),
            metadata.as_ref(),
        )
        .await?;
        tracing::info!(notification_id, "Notification created");

        let targets = resolve_targets(&mut tx, event, payload).await?;
        tracing::info!(
            notification_id,
            target_count = targets.len(),
            "Resolved target users"
        );

        let mut created = 0u64;
        for user in &targets {
            created += self
                .deliver_to_user(&mut tx, notification_id, notify_type.id, &message, &notify_type.name, user)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(notification_id, deliveries = created, "Trigger complete");
        Ok(TriggerOutcome {
            notification_id,
            deliveries_created: created,
        })
    }

    /// Create and dispatch deliveries for one user, per their preferences.
    ///
    /// Returns the number of delivery rows created. A preference whose
    /// (notification, user, channel) row already exists is skipped -- the
    /// unique constraint is the idempotency key, so concurrent identical
    /// triggers never double-deliver.
    async fn deliver_to_user(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        notification_id: DbId,
        notification_type_id: DbId,
        content: &str,
        title: &str,
        user: &User,
    ) -> Result<u64, AppError> {
        let prefs =
            NotificationPreferenceRepo::list_for_user_and_type(&mut **tx, user.id, notification_type_id)
                .await?;

        let mut created = 0u64;
        for pref in prefs {
            let Some(channel) = pref.channel() else {
                tracing::warn!(preference_id = pref.id, channel = %pref.channel, "Skipping unknown channel");
                continue;
            };

            let Some(delivery_id) =
                DeliveryRepo::create(&mut **tx, notification_id, user.id, channel).await?
            else {
                tracing::debug!(
                    notification_id,
                    user_id = user.id,
                    channel = %channel,
                    "Delivery already exists, skipping"
                );
                continue;
            };
            created += 1;

            let message = OutboundMessage {
                username: user.username.clone(),
                email: user.email.clone(),
                phone_number: user.phone_number.clone(),
                title: title.to_string(),
                content: content.to_string(),
            };

            // One channel failing must never abort the remaining
            // deliveries; the outcome lands on the row either way.
            match self.dispatcher.dispatch(channel, &message).await {
                Ok(()) => {
                    DeliveryRepo::mark_sent(&mut **tx, delivery_id).await?;
                    tracing::debug!(delivery_id, user_id = user.id, channel = %channel, "Delivery sent");
                }
                Err(e) => {
                    DeliveryRepo::mark_failed(&mut **tx, delivery_id, &e.to_string()).await?;
                    tracing::error!(
                        delivery_id,
                        user_id = user.id,
                        channel = %channel,
                        error = %e,
                        "Delivery dispatch failed"
                    );
                }
            }
        }

        Ok(created)
    }
}

/// Resolve the target user set for an event.
///
/// `new_login` targets exactly the user named by the payload's `user_id`
/// (empty set when the value is malformed or no such user exists); every
/// other event broadcasts to all active users.
async fn resolve_targets(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event: TriggerEvent,
    payload: &EventPayload,
) -> Result<Vec<User>, sqlx::Error> {
    let conn: &mut PgConnection = &mut *tx;
    match event {
        TriggerEvent::NewLogin => {
            let Some(user_id) = payload.get("user_id").and_then(|v| v.parse::<DbId>().ok())
            else {
                return Ok(Vec::new());
            };
            Ok(UserRepo::find_by_id(conn, user_id)
                .await?
                .into_iter()
                .collect())
        }
        TriggerEvent::NewComment | TriggerEvent::WeeklySummary => UserRepo::list_active(conn).await,
    }
}
