//! Integration tests for the MSME dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p msme-integration-tests
//! ```
//!
//! Every test builds its own in-memory store with simulated latency turned
//! off, so tests are independent and need no running server.
//!
//! # Test Categories
//!
//! - `entity_store` - Product, order and customer repositories
//! - `session` - Mock login and the stored session
//! - `api_routes` - The JSON API driven through the router

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use msme_core::{CustomerGroup, Email, Price};
use msme_dashboard::db::{Latency, Store};
use msme_dashboard::models::{Customer, NewCustomer, NewProduct, Product};
use msme_dashboard::services::AuthService;
use msme_dashboard::state::AppState;
use msme_dashboard::storage::{MemoryStorage, StoragePort};

/// Demo admin account.
pub const ADMIN_EMAIL: &str = "test@msme.com";
pub const ADMIN_PASSWORD: &str = "pass123";

/// A fresh in-memory dashboard.
pub struct TestContext {
    pub storage: Arc<MemoryStorage>,
    pub state: AppState,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let state = AppState::new(storage.clone(), Latency::none());
        Self { storage, state }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        self.state.store()
    }

    /// Raw stored value for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.storage.get(key).expect("Failed to read storage")
    }

    #[must_use]
    pub fn router(&self) -> Router {
        msme_dashboard::app(self.state.clone())
    }

    /// Log in as the demo admin and return the session token.
    pub async fn login(&self) -> String {
        AuthService::new(self.state.sessions(), self.state.latency())
            .login(ADMIN_EMAIL, &SecretString::from(ADMIN_PASSWORD.to_string()))
            .await
            .expect("Failed to log in demo admin")
            .token
    }

    /// Send a request through the router and decode the JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Create a product with the given whole-shilling price and stock.
    pub async fn create_product(&self, name: &str, price: i64, stock: u32) -> Product {
        self.store()
            .products()
            .create(new_product(name, price, stock))
            .await
            .expect("Failed to create product")
    }

    /// Create a customer with zeroed aggregates.
    pub async fn create_customer(&self, name: &str, email: &str) -> Customer {
        self.store()
            .customers()
            .create(NewCustomer {
                name: name.to_string(),
                email: Email::parse(email).expect("Invalid test email"),
                phone: "+254 700 000 000".to_string(),
                group: CustomerGroup::New,
            })
            .await
            .expect("Failed to create customer")
    }
}

/// Whole shillings as a [`Price`].
#[must_use]
pub fn ksh(amount: i64) -> Price {
    Price::new(Decimal::from(amount))
}

#[must_use]
pub fn new_product(name: &str, price: i64, stock: u32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: String::new(),
        price: ksh(price),
        unit: None,
        stock,
        category: "Hardware".to_string(),
        image: String::new(),
        variants: Vec::new(),
    }
}
