//! Bearer-token authentication extractors.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires a valid session token.
///
/// Reads `Authorization: Bearer <token>` and compares it with the stored
/// session. Rejects with 401 when the header is missing or the token does
/// not match.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(user): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireSession(pub User);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::NotAuthenticated)?;
        let user = AuthService::new(state.sessions(), state.latency()).verify(token)?;

        set_sentry_user(&user);
        Ok(Self(user))
    }
}

/// The token from an `Authorization: Bearer` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Attach the signed-in user to Sentry events for this request.
fn set_sentry_user(user: &User) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user.id.to_string()),
            email: Some(user.email.to_string()),
            username: Some(user.name.clone()),
            ..Default::default()
        }));
    });
}
