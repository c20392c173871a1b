//! Customer handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use msme_core::CustomerId;

use super::VersionedPatch;
use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{Customer, CustomerPatch, NewCustomer},
    state::AppState,
};

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(create_customer))
        .route(
            "/api/customers/{id}",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
}

/// All customers.
///
/// # Errors
///
/// Returns 500 if the collection cannot be read.
#[instrument(skip_all)]
pub async fn list_customers(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.store().customers().list().await?))
}

/// One customer.
///
/// # Errors
///
/// Returns 404 if no customer has this ID.
#[instrument(skip_all, fields(id = %id))]
pub async fn get_customer(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.store().customers().get(&id).await?))
}

/// Add a customer with zeroed aggregates.
///
/// # Errors
///
/// Returns 400 if the customer fails validation.
#[instrument(skip_all)]
pub async fn create_customer(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let customer = state.store().customers().create(body).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Merge a partial update into a customer.
///
/// # Errors
///
/// Returns 404 if no customer has this ID, 409 on a stale `expectedVersion`.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_customer(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(body): Json<VersionedPatch<CustomerPatch>>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .store()
        .customers()
        .update(&id, body.patch, body.expected_version)
        .await?;
    Ok(Json(customer))
}

/// Remove a customer. Their orders are kept.
///
/// # Errors
///
/// Returns 500 if the collection cannot be written.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_customer(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode, AppError> {
    state.store().customers().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
