//! Handlers for the `/notifications/preferences` resource.
//!
//! Preferences are strictly caller-scoped: every query filters on the
//! authenticated user, so one user can never read or edit another's rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use notifyhub_core::error::CoreError;
use notifyhub_core::types::DbId;
use notifyhub_db::models::notification::{CreatePreference, UpdatePreference};
use notifyhub_db::repositories::{NotificationPreferenceRepo, NotificationTypeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications/preferences
///
/// List the authenticated user's preferences.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let prefs = NotificationPreferenceRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: prefs }))
}

/// POST /api/v1/notifications/preferences
///
/// Opt in to a (notification type, channel) pair. A duplicate pair maps
/// to 409 via the unique constraint; an unknown type maps to 404.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePreference>,
) -> AppResult<impl IntoResponse> {
    let notify_type = NotificationTypeRepo::find_by_id(&state.pool, input.notification_type_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "NotificationType",
                key: input.notification_type_id.to_string(),
            })
        })?;

    let pref = NotificationPreferenceRepo::create(
        &state.pool,
        auth.user_id,
        notify_type.id,
        input.channel,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: pref })))
}

/// PUT /api/v1/notifications/preferences/{id}
///
/// Change the channel of an owned preference. Returns 404 when the row
/// does not exist or belongs to another user.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePreference>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let pref =
        NotificationPreferenceRepo::update_channel(&state.pool, id, auth.user_id, input.channel)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "NotificationPreference",
                    key: id.to_string(),
                })
            })?;

    Ok(Json(DataResponse { data: pref }))
}

/// DELETE /api/v1/notifications/preferences/{id}
///
/// Remove an owned preference. Returns 204 on success, 404 when the row
/// does not exist or belongs to another user.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = NotificationPreferenceRepo::delete(&state.pool, id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "NotificationPreference",
            key: id.to_string(),
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
