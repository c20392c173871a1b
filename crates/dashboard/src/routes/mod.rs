//! HTTP route handlers for the dashboard JSON API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth (public except /me)
//! POST   /api/auth/login
//! POST   /api/auth/register
//! POST   /api/auth/logout
//! GET    /api/auth/me
//! PATCH  /api/auth/me
//!
//! # Business types
//! GET    /api/business-types          - Catalog (public)
//! POST   /api/business-type           - Select one for the current user
//!
//! # Dashboard
//! GET    /api/dashboard/stats
//! GET    /api/dashboard/sales         - 30-day sales series
//!
//! # Products / Orders / Customers
//! GET    /api/{entity}
//! POST   /api/{entity}
//! GET    /api/{entity}/{id}
//! PATCH  /api/{entity}/{id}           - Optional `expectedVersion` in the body
//! DELETE /api/{entity}/{id}
//! PUT    /api/orders/{id}/status
//!
//! # Insights
//! GET    /api/insights
//! GET    /api/insights/demand
//! GET    /api/insights/pricing
//!
//! # Chat
//! POST   /api/chat
//!
//! # Finance
//! GET    /api/finance/credit-score
//! GET    /api/finance/loans
//! POST   /api/finance/loans
//! GET    /api/finance/payment-methods
//! POST   /api/finance/payment-methods
//! ```
//!
//! Everything except the public routes requires `Authorization: Bearer <token>`.

pub mod auth;
pub mod business;
pub mod chat;
pub mod customers;
pub mod dashboard;
pub mod finance;
pub mod health;
pub mod insights;
pub mod orders;
pub mod products;

use axum::Router;
use serde::Deserialize;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(business::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(insights::router())
        .merge(chat::router())
        .merge(finance::router())
}

/// PATCH body: the partial update plus an optional optimistic-concurrency
/// version.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedPatch<T> {
    #[serde(flatten)]
    pub patch: T,
    pub expected_version: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::ProductPatch;

    #[test]
    fn test_versioned_patch_flattens() {
        let body: VersionedPatch<ProductPatch> =
            serde_json::from_str(r#"{"price": "10", "expectedVersion": 3}"#).unwrap();
        assert_eq!(body.expected_version, Some(3));
        assert!(body.patch.price.is_some());
        assert!(body.patch.stock.is_none());

        let body: VersionedPatch<ProductPatch> =
            serde_json::from_str(r#"{"stock": 4}"#).unwrap();
        assert_eq!(body.expected_version, None);
    }
}
