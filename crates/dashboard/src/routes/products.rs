//! Product catalog handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use msme_core::ProductId;

use super::VersionedPatch;
use crate::{
    error::AppError,
    middleware::RequireSession,
    models::{NewProduct, Product, ProductPatch},
    state::AppState,
};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// All products.
///
/// # Errors
///
/// Returns 500 if the collection cannot be read.
#[instrument(skip_all)]
pub async fn list_products(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.store().products().list().await?))
}

/// One product.
///
/// # Errors
///
/// Returns 404 if no product has this ID.
#[instrument(skip_all, fields(id = %id))]
pub async fn get_product(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.store().products().get(&id).await?))
}

/// Add a product.
///
/// # Errors
///
/// Returns 400 if the product fails validation.
#[instrument(skip_all, fields(name = %body.name))]
pub async fn create_product(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.store().products().create(body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge a partial update into a product.
///
/// # Errors
///
/// Returns 404 if no product has this ID, 409 on a stale `expectedVersion`.
#[instrument(skip_all, fields(id = %id))]
pub async fn update_product(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<VersionedPatch<ProductPatch>>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .store()
        .products()
        .update(&id, body.patch, body.expected_version)
        .await?;
    Ok(Json(product))
}

/// Remove a product. Succeeds whether or not it existed.
///
/// # Errors
///
/// Returns 500 if the collection cannot be written.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_product(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    state.store().products().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
