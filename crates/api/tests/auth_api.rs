//! HTTP-level integration tests for registration and login.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

use notifyhub_db::repositories::NotificationPreferenceRepo;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with a token, the user info, and
/// provisions one in-app preference per seeded notification type.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_user_and_default_preferences(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "a_strong_password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["user"]["username"], "alice");
    assert_eq!(json["data"]["user"]["is_admin"], false);
    assert!(
        json["data"]["user"]["password_hash"].is_null(),
        "password hash must never appear in responses"
    );

    // Three active notification types are seeded, so three in-app rows.
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    let prefs = NotificationPreferenceRepo::list_for_user(&pool, user_id)
        .await
        .unwrap();
    assert_eq!(prefs.len(), 3);
    assert!(prefs.iter().all(|p| p.channel == "in_app"));
}

/// A duplicate username maps to 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_returns_conflict(pool: PgPool) {
    common::create_test_user(&pool, "bob", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "bob",
        "email": "other@example.com",
        "password": "a_strong_password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Validation failures (short password, bad email) map to 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_invalid_input_returns_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "carol",
        "email": "not-an-email",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns a token that works against protected routes.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_usable_token(pool: PgPool) {
    common::create_test_user(&pool, "dave", false).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "dave", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap();
    assert_eq!(json["data"]["user"]["username"], "dave");

    let response = get_auth(app, "/api/v1/notifications/history", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A wrong password and an unknown username both return 401 with the same
/// message, so the endpoint does not leak which accounts exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    common::create_test_user(&pool, "erin", false).await;
    let app = common::build_test_app(pool);

    let wrong_pw = serde_json::json!({ "username": "erin", "password": "not-the-password" });
    let response = post_json(app.clone(), "/api/v1/auth/login", wrong_pw).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body = body_json(response).await;

    let no_user = serde_json::json!({ "username": "nobody", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", no_user).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let no_user_body = body_json(response).await;

    assert_eq!(wrong_pw_body["error"], no_user_body["error"]);
}

/// A deactivated account gets 403, not 401, on correct credentials.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_deactivated_account_returns_forbidden(pool: PgPool) {
    let user = common::create_test_user(&pool, "frank", false).await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "frank", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

/// Protected routes reject missing and malformed tokens with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_require_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/notifications/history").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/notifications/history", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
