//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use notifyhub_core::error::CoreError;
use notifyhub_db::models::user::{CreateUser, UserResponse};
use notifyhub_db::repositories::{NotificationPreferenceRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone_number: Option<String>,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/register
///
/// Create a user and provision their default notification preferences
/// (one in-app row per active notification type) in one transaction, then
/// return an access token. Duplicate username/email maps to 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let password_hash = password::hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let mut tx = state.pool.begin().await?;

    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username: input.username,
            email: input.email,
            phone_number: input.phone_number,
            password_hash,
            is_admin: false,
        },
    )
    .await?;

    let provisioned = NotificationPreferenceRepo::provision_defaults(&mut *tx, user.id).await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, provisioned, "User registered");

    let token = generate_access_token(user.id, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "data": {
                "token": token,
                "user": UserResponse::from(user),
            }
        })),
    ))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return an access token. Unknown usernames and
/// wrong passwords get the same 401 so the endpoint does not leak which
/// accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid username or password".into()))?;

    let verified = password::verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !verified {
        return Err(CoreError::Unauthorized("Invalid username or password".into()).into());
    }

    if !user.is_active {
        return Err(CoreError::Forbidden("Account is deactivated".into()).into());
    }

    let token = generate_access_token(user.id, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(json!({
        "data": {
            "token": token,
            "user": UserResponse::from(user),
        }
    })))
}
