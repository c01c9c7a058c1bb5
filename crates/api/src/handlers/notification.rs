//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`]; triggering
//! additionally requires [`RequireAdmin`].

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use notifyhub_core::event::EventPayload;
use notifyhub_core::types::DbId;
use notifyhub_db::repositories::{DeliveryRepo, NotificationTypeRepo};

use crate::error::AppResult;
use crate::fanout::FanoutEngine;
use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /notifications/trigger`.
#[derive(Debug, Deserialize)]
pub struct TriggerRequest {
    pub event: String,
    #[serde(default)]
    pub data: EventPayload,
}

/// Request body for `POST /notifications/read`.
#[derive(Debug, Deserialize)]
pub struct ReadRequest {
    pub notifications: Vec<DbId>,
}

/// POST /api/v1/notifications/trigger
///
/// Fan an event out to target users (admin only). The response reports
/// the number of delivery rows created, which is not the number
/// successfully sent -- per-channel failures live on the rows themselves.
pub async fn trigger(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<TriggerRequest>,
) -> AppResult<Json<serde_json::Value>> {
    tracing::info!(admin_id = admin.user_id, event = %input.event, "Trigger requested");

    let engine = FanoutEngine::new(state.pool.clone(), Arc::clone(&state.dispatcher));
    let outcome = engine.trigger(&input.event, &input.data).await?;

    Ok(Json(json!({
        "detail": format!(
            "Notification triggered: {} deliveries created.",
            outcome.deliveries_created
        ),
        "notification_id": outcome.notification_id,
    })))
}

/// GET /api/v1/notifications/history
///
/// The authenticated user's delivery history across all channels, newest
/// first.
pub async fn history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let entries = DeliveryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/notifications/unread
///
/// The authenticated user's unread in-app deliveries, newest first.
pub async fn unread(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let entries = DeliveryRepo::list_unread_in_app(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/notifications/read
///
/// Bulk mark-read. Only in-app deliveries owned by the caller are
/// updated; everything else in the ID list is silently ignored. The
/// operation is idempotent -- re-marking an already-read row still counts
/// it.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReadRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let updated = DeliveryRepo::mark_read(&state.pool, auth.user_id, &input.notifications).await?;

    Ok(Json(json!({
        "detail": format!("Marked {updated} notifications as read."),
    })))
}

/// GET /api/v1/notifications/types
///
/// List all notification types (active and inactive) so clients can
/// render preference toggles.
pub async fn list_types(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let types = NotificationTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}
