//! Order types.
//!
//! `customer_name`, `customer_email`, `product_name` and the item `price` are
//! snapshots taken when the order is created. Later edits to the customer or
//! product never flow back into existing orders, so order history keeps what
//! was actually sold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use msme_core::{CustomerId, Email, OrderId, OrderStatus, Price, ProductId};

use super::{Customer, Product};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Weak reference; the customer may have been deleted since.
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: Email,
    pub items: Vec<OrderItem>,
    /// As supplied at creation; the store does not recompute it.
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Order {
    /// Whether any line references `product_id`.
    #[must_use]
    pub fn contains_product(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }
}

/// One order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at the time of ordering.
    pub price: Price,
}

impl OrderItem {
    /// Snapshot a product into an order line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price: product.price,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Fields for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: Email,
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(default)]
    pub status: OrderStatus,
}

impl NewOrder {
    /// Build a pending order for `customer`, snapshotting their contact
    /// details and totalling the lines.
    #[must_use]
    pub fn for_customer(customer: &Customer, items: Vec<OrderItem>) -> Self {
        let total = items.iter().map(OrderItem::line_total).sum();
        Self {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
            items,
            total,
            status: OrderStatus::Pending,
        }
    }

    /// Sum of the line totals.
    #[must_use]
    pub fn items_total(&self) -> Price {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Form-level checks.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("order must contain at least one item".to_string());
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            return Err("item quantity must be positive".to_string());
        }
        if self.total.is_negative() {
            return Err("order total cannot be negative".to_string());
        }
        Ok(())
    }

    pub(crate) fn into_order(self, id: OrderId, now: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            items: self.items,
            total: self.total,
            status: self.status,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }
}

/// Partial order update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub customer_email: Option<Email>,
    pub items: Option<Vec<OrderItem>>,
    pub total: Option<Price>,
}

impl OrderPatch {
    /// A patch that only moves the order to `status`.
    #[must_use]
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Form-level checks.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(items) = &self.items {
            if items.is_empty() {
                return Err("order must contain at least one item".to_string());
            }
            if items.iter().any(|item| item.quantity == 0) {
                return Err("item quantity must be positive".to_string());
            }
        }
        Ok(())
    }

    /// Shallow-merge the set fields into `order` and stamp `updated_at`.
    pub fn apply(self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(name) = self.customer_name {
            order.customer_name = name;
        }
        if let Some(email) = self.customer_email {
            order.customer_email = email;
        }
        if let Some(items) = self.items {
            order.items = items;
        }
        if let Some(total) = self.total {
            order.total = total;
        }
        order.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: u32, minor: i64) -> OrderItem {
        OrderItem {
            product_id: ProductId::new("3"),
            product_name: "Laptop Stand".to_string(),
            quantity,
            price: Price::from_minor(minor),
        }
    }

    fn new_order(items: Vec<OrderItem>) -> NewOrder {
        NewOrder {
            customer_id: CustomerId::new("CUST-002"),
            customer_name: "Bob Smith".to_string(),
            customer_email: Email::parse("bob@example.com").unwrap(),
            total: items.iter().map(OrderItem::line_total).sum(),
            items,
            status: OrderStatus::default(),
        }
    }

    #[test]
    fn test_items_total() {
        let order = new_order(vec![item(1, 39999), item(2, 4999)]);
        assert_eq!(order.items_total(), Price::from_minor(49997));
        assert_eq!(order.total, order.items_total());
    }

    #[test]
    fn test_validate() {
        assert!(new_order(vec![]).validate().is_err());
        assert!(new_order(vec![item(0, 100)]).validate().is_err());
        assert!(new_order(vec![item(1, 100)]).validate().is_ok());
    }

    #[test]
    fn test_status_patch_stamps_updated_at() {
        let created = DateTime::parse_from_rfc3339("2024-09-28T16:45:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut order = new_order(vec![item(1, 100)]).into_order(OrderId::new("ORD-001"), created);

        let later = created + chrono::Duration::hours(2);
        OrderPatch::status(OrderStatus::Shipped).apply(&mut order, later);

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.created_at, created);
        assert_eq!(order.updated_at, later);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let json = r#"{
            "customerId": "CUST-001", "customerName": "Alice Johnson",
            "customerEmail": "alice@example.com",
            "items": [{"productId": "1", "productName": "Headphones", "quantity": 1, "price": 299.99}],
            "total": 299.99
        }"#;
        let order: NewOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
