//! Dashboard headline numbers and sales chart.

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    services::insights::{self, DashboardStats, SalesPoint},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/stats", get(stats))
        .route("/api/dashboard/sales", get(sales))
}

/// Revenue, order, customer and stock counts.
///
/// # Errors
///
/// Returns 500 if a collection cannot be read.
#[instrument(skip_all)]
pub async fn stats(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let store = state.store();
    let (products, orders, customers) = (store.products(), store.orders(), store.customers());
    let (products, orders, customers) =
        tokio::try_join!(products.list(), orders.list(), customers.list())?;
    Ok(Json(insights::dashboard_stats(
        &products,
        &orders,
        &customers,
        Utc::now(),
    )))
}

/// Simulated daily sales for the last 30 days.
#[instrument(skip_all)]
pub async fn sales(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
) -> Json<Vec<SalesPoint>> {
    state.latency().simulate_read().await;
    Json(insights::sales_series(
        Utc::now().date_naive(),
        &mut rand::rng(),
    ))
}
