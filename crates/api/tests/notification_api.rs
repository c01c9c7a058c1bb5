//! HTTP-level integration tests for the per-user notification views:
//! history, unread, and bulk mark-read.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, token_for};
use sqlx::PgPool;

use notifyhub_core::channel::Channel;
use notifyhub_db::models::user::User;
use notifyhub_db::repositories::{DeliveryRepo, NotificationRepo};

/// Insert a notification and one delivery for the user on the given
/// channel, returning the delivery id.
async fn seed_delivery(pool: &PgPool, user: &User, title: &str, channel: Channel) -> i64 {
    let notification_id = NotificationRepo::create(
        pool,
        type_id(pool, "new_comment").await,
        title,
        "Something happened.",
        true,
        None,
    )
    .await
    .unwrap();
    DeliveryRepo::create(pool, notification_id, user.id, channel)
        .await
        .unwrap()
        .expect("fresh delivery should insert")
}

async fn type_id(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM notification_types WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// History returns only the caller's deliveries, newest first, with the
/// joined notification content.
#[sqlx::test(migrations = "../db/migrations")]
async fn history_is_scoped_and_newest_first(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    let bob = common::create_test_user(&pool, "bob", false).await;

    seed_delivery(&pool, &alice, "First", Channel::InApp).await;
    seed_delivery(&pool, &alice, "Second", Channel::Email).await;
    seed_delivery(&pool, &bob, "Bob only", Channel::InApp).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/history", &token_for(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Second");
    assert_eq!(entries[1]["title"], "First");
    assert_eq!(entries[1]["notification_content"], "Something happened.");
    assert_eq!(entries[1]["channel"], "in_app");
    assert_eq!(entries[1]["status"], "pending");
}

// ---------------------------------------------------------------------------
// Unread
// ---------------------------------------------------------------------------

/// Unread lists only unread in-app deliveries; other channels and read
/// rows are excluded.
#[sqlx::test(migrations = "../db/migrations")]
async fn unread_excludes_read_and_non_in_app(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;

    let unread_id = seed_delivery(&pool, &alice, "Unread", Channel::InApp).await;
    let read_id = seed_delivery(&pool, &alice, "Read", Channel::InApp).await;
    seed_delivery(&pool, &alice, "Email", Channel::Email).await;

    DeliveryRepo::mark_read(&pool, alice.id, &[read_id]).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/unread", &token_for(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], unread_id);
    assert_eq!(entries[0]["is_read"], false);
}

// ---------------------------------------------------------------------------
// Mark-read
// ---------------------------------------------------------------------------

/// Bulk mark-read updates only the caller's in-app rows; foreign and
/// non-in-app ids in the list are silently ignored.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_ignores_foreign_and_non_in_app_rows(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    let bob = common::create_test_user(&pool, "bob", false).await;

    let mine = seed_delivery(&pool, &alice, "Mine", Channel::InApp).await;
    let email = seed_delivery(&pool, &alice, "Email", Channel::Email).await;
    let theirs = seed_delivery(&pool, &bob, "Theirs", Channel::InApp).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "notifications": [mine, email, theirs, 424242] });
    let response = post_json_auth(
        app,
        "/api/v1/notifications/read",
        &token_for(&alice),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["detail"], "Marked 1 notifications as read.");

    let row = DeliveryRepo::find_by_id(&pool, theirs).await.unwrap().unwrap();
    assert!(!row.is_read, "another user's delivery must stay unread");
    let row = DeliveryRepo::find_by_id(&pool, email).await.unwrap().unwrap();
    assert!(!row.is_read, "non-in-app deliveries are not readable");
}

/// Mark-read is idempotent: re-marking an already-read row still counts it.
#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_is_idempotent(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    let id = seed_delivery(&pool, &alice, "Once", Channel::InApp).await;
    let app = common::build_test_app(pool);
    let token = token_for(&alice);

    for _ in 0..2 {
        let body = serde_json::json!({ "notifications": [id] });
        let response = post_json_auth(
            app.clone(),
            "/api/v1/notifications/read",
            &token,
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Marked 1 notifications as read.");
    }
}

// ---------------------------------------------------------------------------
// Types listing
// ---------------------------------------------------------------------------

/// The type catalogue lists all seeded types, active or not.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_types_returns_seeded_catalogue(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice", false).await;
    sqlx::query("UPDATE notification_types SET is_active = false WHERE code = 'new_login'")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications/types", &token_for(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let types = json["data"].as_array().unwrap();
    assert_eq!(types.len(), 3);

    let codes: Vec<&str> = types.iter().map(|t| t["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["new_comment", "new_login", "weekly_summary"]);
}
