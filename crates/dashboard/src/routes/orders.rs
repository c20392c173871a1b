//! Order handlers.
//!
//! Creating an order also updates the customer's order count and total
//! spend; see [`crate::db::OrderRepository::create`].

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::instrument;

use msme_core::{OrderId, OrderStatus};

use super::VersionedPatch;
use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{NewOrder, Order, OrderPatch},
    state::AppState,
};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/{id}",
            get(get_order).patch(update_order).delete(delete_order),
        )
        .route("/api/orders/{id}/status", put(update_status))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// All orders.
///
/// # Errors
///
/// Returns 500 if the collection cannot be read.
#[instrument(skip_all)]
pub async fn list_orders(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(state.store().orders().list().await?))
}

/// One order.
///
/// # Errors
///
/// Returns 404 if no order has this ID.
#[instrument(skip_all, fields(id = %id))]
pub async fn get_order(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.store().orders().get(&id).await?))
}

/// Place an order.
///
/// # Errors
///
/// Returns 422 if the customer does not exist, 400 if the order fails
/// validation. Nothing is written in either case.
#[instrument(skip_all, fields(customer_id = %body.customer_id))]
pub async fn create_order(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.store().orders().create(body).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Merge a partial update into an order.
///
/// # Errors
///
/// Returns 404 if no order has this ID, 409 on a stale `expectedVersion`.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_order(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<VersionedPatch<OrderPatch>>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .store()
        .orders()
        .update(&id, body.patch, body.expected_version)
        .await?;
    Ok(Json(order))
}

/// Move an order to a new status.
///
/// # Errors
///
/// Returns 404 if no order has this ID.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_status(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(
        state.store().orders().update_status(&id, body.status).await?,
    ))
}

/// Remove an order. Customer aggregates are left as they are.
///
/// # Errors
///
/// Returns 500 if the collection cannot be written.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_order(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<StatusCode, AppError> {
    state.store().orders().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
