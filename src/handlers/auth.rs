// src/handlers/auth.rs

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User},
    session::{Sessions, bearer_token},
    store::{self, JsonStore},
};

/// Registers a new account.
///
/// The email is lowercased before the uniqueness check and before storage,
/// so no two users can differ only by letter case. Registration also logs
/// the new user in, mirroring the original flow.
/// Returns 201 Created with a session token and the session projection.
pub async fn register(
    State(store): State<JsonStore>,
    State(sessions): State<Sessions>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email = payload.email.to_lowercase();

    // The uniqueness check and the append run under one store guard, so two
    // racing registrations cannot both claim the same email.
    let user = store.update(store::USERS, |users: &mut Vec<User>| {
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict(format!(
                "An account with email '{}' already exists",
                email
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4(),
            username: payload.username,
            email: email.clone(),
            password: payload.password,
            created_at: chrono::Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    })?;

    tracing::info!("registered user {}", user.id);

    let (token, session) = sessions.begin(&user);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "user": session,
        })),
    ))
}

/// Authenticates a user against the stored collection.
///
/// Email matching is case-insensitive; the password comparison is exact.
/// Passwords are stored and compared in plain text, a documented legacy of
/// the demo this grew from; do not reuse this pattern anywhere real.
pub async fn login(
    State(store): State<JsonStore>,
    State(sessions): State<Sessions>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let email = payload.email.to_lowercase();

    let users: Vec<User> = store.load(store::USERS);
    let user = users
        .iter()
        .find(|u| u.email == email && u.password == payload.password)
        .ok_or(AppError::AuthError("Invalid email or password".to_string()))?;

    let (token, session) = sessions.begin(user);

    Ok(Json(json!({
        "token": token,
        "user": session,
    })))
}

/// Returns the live session behind the caller's bearer token.
///
/// Recovery rule: with `SINGLE_USER_AUTO_LOGIN` enabled and exactly one
/// registered user, a missing session is answered by establishing a fresh
/// one for that sole user instead of a 401. Off by default; the original
/// did this unconditionally, which is more surprise than convenience.
pub async fn current_session(
    State(store): State<JsonStore>,
    State(sessions): State<Sessions>,
    State(config): State<Config>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = bearer_token(&headers) {
        if let Some(session) = sessions.current(token) {
            return Ok(Json(json!({
                "token": token,
                "user": session,
            })));
        }
    }

    if config.single_user_auto_login {
        let users: Vec<User> = store.load(store::USERS);
        if let [sole_user] = users.as_slice() {
            tracing::info!("auto-establishing session for sole user {}", sole_user.id);
            let (token, session) = sessions.begin(sole_user);
            return Ok(Json(json!({
                "token": token,
                "user": session,
            })));
        }
    }

    Err(AppError::AuthError("No active session".to_string()))
}

/// Ends the caller's session. Always 204, even for an unknown token.
pub async fn logout(State(sessions): State<Sessions>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        sessions.end(token);
    }
    StatusCode::NO_CONTENT
}
