//! Handlers for account signup and login.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use crate::domain::entities::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /signup`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "pw1", "role": "user" }
/// ```
///
/// # Errors
///
/// - **400**: username taken (checked first), empty username/password, or unknown role
pub async fn signup_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;

    // A taken username is reported ahead of field and role errors.
    state
        .credential_service
        .ensure_available(&payload.username)
        .await?;
    payload.validate()?;

    let role = match payload.role.as_deref() {
        None => Role::User,
        Some(raw) => raw.parse::<Role>().map_err(|e| {
            AppError::bad_request("Invalid role", json!({ "reason": e.to_string() }))
        })?,
    };

    state
        .credential_service
        .register(&payload.username, &payload.password, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Exchanges credentials for a session token valid for 12 hours.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// - **400**: empty username or password
/// - **403**: unknown username or wrong password (indistinguishable)
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let account = state
        .credential_service
        .verify(&payload.username, &payload.password)
        .await?;

    let token = state.token_service.issue(&account)?;

    tracing::info!(account_id = account.id, username = %account.username, "Login succeeded");

    Ok(Json(LoginResponse { token }))
}
