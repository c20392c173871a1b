//! Login, registration and current-user handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{AuthResponse, User, UserPatch},
    services::{AuthError, AuthService},
    state::AppState,
};

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me).patch(update_me))
}

/// Login credentials.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    password: String,
    pub name: String,
}

/// Check demo credentials and start a session.
///
/// # Errors
///
/// Returns 401 if the credentials do not match a demo account.
#[instrument(skip_all, fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth = AuthService::new(state.sessions(), state.latency());
    let password = SecretString::from(body.password);
    Ok(Json(auth.login(&body.email, &password).await?))
}

/// Create an account and start a session.
///
/// # Errors
///
/// Returns 409 if the email belongs to a demo account, 400 on invalid input.
#[instrument(skip_all, fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let auth = AuthService::new(state.sessions(), state.latency());
    let password = SecretString::from(body.password);
    let response = auth.register(&body.email, &password, &body.name).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Clear the stored session.
///
/// # Errors
///
/// Returns 500 if the session cannot be cleared.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    AuthService::new(state.sessions(), state.latency()).logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// The signed-in user.
pub async fn me(RequireSession(user): RequireSession) -> Json<User> {
    Json(user)
}

/// Update the signed-in user's profile.
///
/// # Errors
///
/// Returns 401 if the session disappeared while the request was in flight.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update_me(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }
    let updated = state
        .sessions()
        .update_user(patch)?
        .ok_or(AuthError::NotAuthenticated)?;
    Ok(Json(updated))
}
