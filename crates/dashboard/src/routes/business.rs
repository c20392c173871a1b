//! Business-type catalog and selection.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{BUSINESS_TYPES, BusinessType, User, UserPatch},
    services::AuthError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/business-types", get(list_business_types))
        .route("/api/business-type", post(select_business_type))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectBusinessType {
    pub business_type: String,
}

/// Every supported business type.
pub async fn list_business_types() -> Json<Vec<BusinessType>> {
    Json(BUSINESS_TYPES.to_vec())
}

/// Tailor the dashboard to a business type.
///
/// # Errors
///
/// Returns 400 if the id is not in the catalog.
#[instrument(skip_all, fields(user_id = %user.id, business_type = %body.business_type))]
pub async fn select_business_type(
    RequireSession(user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<SelectBusinessType>,
) -> Result<Json<User>, AppError> {
    let business_type = BusinessType::find(&body.business_type).ok_or_else(|| {
        AppError::BadRequest(format!("unknown business type: {}", body.business_type))
    })?;

    let updated = state
        .sessions()
        .update_user(UserPatch {
            business_type: Some(business_type.id.to_string()),
            ..UserPatch::default()
        })?
        .ok_or(AuthError::NotAuthenticated)?;
    tracing::info!("Business type selected");
    Ok(Json(updated))
}
