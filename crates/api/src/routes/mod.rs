pub mod auth;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /notifications/trigger         trigger fan-out (admin only)
/// /notifications/history         delivery history
/// /notifications/unread          unread in-app deliveries
/// /notifications/read            bulk mark-read
/// /notifications/types           notification type catalogue
/// /notifications/preferences     list, create
/// /notifications/preferences/{id} update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/notifications", notification::router())
}
