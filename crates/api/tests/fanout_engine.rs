//! Integration tests for the fan-out engine with a failing channel
//! transport, exercising the record-and-continue failure semantics the
//! HTTP tests cannot reach (the simulated transports never fail).

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use notifyhub_api::fanout::FanoutEngine;
use notifyhub_core::channel::Channel;
use notifyhub_db::repositories::{DeliveryRepo, NotificationPreferenceRepo};
use notifyhub_delivery::{
    ChannelTransport, DispatchError, Dispatcher, InAppTransport, OutboundMessage, SmsTransport,
};

struct AlwaysFails;

#[async_trait]
impl ChannelTransport for AlwaysFails {
    async fn send(&self, _message: &OutboundMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Channel("smtp relay unreachable".into()))
    }
}

/// Engine whose email transport always fails; in-app and SMS succeed.
fn engine_with_broken_email(pool: PgPool) -> FanoutEngine {
    let dispatcher = Dispatcher::new(
        Box::new(InAppTransport),
        Box::new(AlwaysFails),
        Box::new(SmsTransport),
    );
    FanoutEngine::new(pool, Arc::new(dispatcher))
}

/// A failed email dispatch is recorded on its own delivery row while the
/// user's other channels still go out, all within the committed trigger.
#[sqlx::test(migrations = "../db/migrations")]
async fn failed_channel_is_recorded_without_aborting_others(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    let nt: i64 = sqlx::query_scalar("SELECT id FROM notification_types WHERE code = 'new_comment'")
        .fetch_one(&pool)
        .await
        .unwrap();
    NotificationPreferenceRepo::create(&pool, alice.id, nt, Channel::InApp)
        .await
        .unwrap();
    NotificationPreferenceRepo::create(&pool, alice.id, nt, Channel::Email)
        .await
        .unwrap();

    let engine = engine_with_broken_email(pool.clone());
    let payload = [("comment".to_string(), "hi".to_string())].into_iter().collect();
    let outcome = engine.trigger("new_comment", &payload).await.unwrap();

    assert_eq!(outcome.deliveries_created, 2);

    let deliveries = DeliveryRepo::list_for_notification(&pool, outcome.notification_id)
        .await
        .unwrap();
    assert_eq!(deliveries.len(), 2);

    let email = deliveries.iter().find(|d| d.channel == "email").unwrap();
    assert_eq!(email.status, "failed");
    assert_eq!(email.attempts, 1);
    assert!(email.sent_at.is_none());
    assert!(
        email
            .error_message
            .as_deref()
            .unwrap()
            .contains("smtp relay unreachable"),
        "the dispatch error must land on the delivery row"
    );

    let in_app = deliveries.iter().find(|d| d.channel == "in_app").unwrap();
    assert_eq!(in_app.status, "sent");
    assert_eq!(in_app.attempts, 1);
    assert!(in_app.sent_at.is_some());
    assert!(in_app.error_message.is_none());
}

/// Triggering the same logical event twice creates a fresh notification
/// each time; idempotency applies within one notification, not across
/// triggers.
#[sqlx::test(migrations = "../db/migrations")]
async fn repeat_triggers_create_separate_notifications(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    NotificationPreferenceRepo::provision_defaults(&pool, alice.id)
        .await
        .unwrap();

    let engine = engine_with_broken_email(pool.clone());
    let payload = std::collections::HashMap::new();

    let first = engine.trigger("weekly_summary", &payload).await.unwrap();
    let second = engine.trigger("weekly_summary", &payload).await.unwrap();

    assert_ne!(first.notification_id, second.notification_id);
    assert_eq!(first.deliveries_created, 1);
    assert_eq!(second.deliveries_created, 1);
}

/// Within one notification, a duplicate (user, channel) insert is skipped
/// rather than erroring, and the skip is not counted.
#[sqlx::test(migrations = "../db/migrations")]
async fn existing_delivery_row_is_skipped(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    let nt: i64 =
        sqlx::query_scalar("SELECT id FROM notification_types WHERE code = 'weekly_summary'")
            .fetch_one(&pool)
            .await
            .unwrap();
    NotificationPreferenceRepo::create(&pool, alice.id, nt, Channel::InApp)
        .await
        .unwrap();

    let engine = engine_with_broken_email(pool.clone());
    let outcome = engine
        .trigger("weekly_summary", &std::collections::HashMap::new())
        .await
        .unwrap();
    assert_eq!(outcome.deliveries_created, 1);

    // The second insert for the same triple reports no new row.
    let dup = DeliveryRepo::create(&pool, outcome.notification_id, alice.id, Channel::InApp)
        .await
        .unwrap();
    assert!(dup.is_none());
}
