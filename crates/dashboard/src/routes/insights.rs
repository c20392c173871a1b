//! Forecasts, growth tips, demand and pricing suggestions.

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    services::insights::{self, DemandPrediction, Insights, PricingSuggestion},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/insights", get(overview))
        .route("/api/insights/demand", get(demand))
        .route("/api/insights/pricing", get(pricing))
}

/// Revenue predictions, growth tips and performance metrics.
///
/// # Errors
///
/// Returns 500 if a collection cannot be read.
#[instrument(skip_all)]
pub async fn overview(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Insights>, AppError> {
    let store = state.store();
    let (products, orders, customers) = (store.products(), store.orders(), store.customers());
    let (products, orders, customers) =
        tokio::try_join!(products.list(), orders.list(), customers.list())?;
    Ok(Json(insights::insights(
        &products,
        &orders,
        &customers,
        Utc::now(),
    )))
}

/// Per-product demand forecast.
///
/// # Errors
///
/// Returns 500 if products cannot be read.
#[instrument(skip_all)]
pub async fn demand(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<DemandPrediction>>, AppError> {
    let products = state.store().products().list().await?;
    Ok(Json(insights::demand_predictions(
        &products,
        &mut rand::rng(),
    )))
}

/// Per-product price suggestions.
///
/// # Errors
///
/// Returns 500 if products cannot be read.
#[instrument(skip_all)]
pub async fn pricing(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<PricingSuggestion>>, AppError> {
    let products = state.store().products().list().await?;
    Ok(Json(insights::pricing_suggestions(&products)))
}
