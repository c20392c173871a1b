//! Order repository.
//!
//! Creating an order also updates the referenced customer's running
//! `totalOrders`/`totalSpent`. Both collections are written inside one
//! critical section; if the order write fails the customer collection is
//! put back the way it was.

use chrono::Utc;
use tracing::instrument;

use msme_core::{OrderId, OrderStatus, SequenceId};

use super::{Record, RepositoryError, Store};
use crate::models::{Customer, NewOrder, Order, OrderPatch};
use crate::storage::keys;

/// Counter name under the `sequences` key.
pub(crate) const SEQUENCE: &str = "orders";

impl Record for Order {
    const KEY: &'static str = keys::ORDERS;
    const ENTITY: &'static str = "order";
    const SEED: &'static str = include_str!("../../seed/orders.json");

    fn record_id(&self) -> &str {
        self.id.as_str()
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version += 1;
    }
}

/// Repository for the order collection.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All orders in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        self.store.list_records().await
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, RepositoryError> {
        self.store.get_record(id.as_str()).await
    }

    /// Create an order with the next `ORD-###` ID and record it against
    /// its customer.
    ///
    /// `total` is stored as supplied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the order fails validation.
    /// Returns `RepositoryError::InvalidReference` if the customer does not
    /// exist; nothing is written in that case.
    /// Returns `RepositoryError::Storage` if either collection cannot be written.
    #[instrument(skip(self, new), fields(customer_id = %new.customer_id))]
    pub async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        new.validate().map_err(RepositoryError::Invalid)?;

        self.store.latency().simulate_write().await;
        let guard = self.store.lock().await;

        let previous_customers = self.store.load::<Customer>(&guard)?;
        let mut customers = previous_customers.clone();
        let customer = customers
            .iter_mut()
            .find(|c| c.id == new.customer_id)
            .ok_or_else(|| {
                RepositoryError::InvalidReference(format!(
                    "order references unknown customer {}",
                    new.customer_id
                ))
            })?;

        let mut orders = self.store.load::<Order>(&guard)?;
        let n = self
            .store
            .next_sequence(&guard, SEQUENCE, orders.iter().map(|o| &o.id))?;
        let order = new.into_order(OrderId::from_sequence(n), Utc::now());

        customer.record_order(order.total);
        customer.bump_version();
        orders.push(order.clone());

        self.store.save(&guard, &customers)?;
        if let Err(e) = self.store.save(&guard, &orders) {
            tracing::warn!(error = %e, "Order write failed, restoring customers");
            if let Err(restore) = self.store.save(&guard, &previous_customers) {
                tracing::error!(error = %restore, "Failed to restore customers");
            }
            return Err(e);
        }

        tracing::info!(order_id = %order.id, total = %order.total, "Created order");
        Ok(order)
    }

    /// Merge `patch` into the order and refresh `updatedAt`.
    ///
    /// Customer aggregates are not adjusted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    /// Returns `RepositoryError::Conflict` if the version does not match.
    /// Returns `RepositoryError::Invalid` if the patch fails validation.
    #[instrument(skip(self, patch), fields(order_id = %id))]
    pub async fn update(
        &self,
        id: &OrderId,
        patch: OrderPatch,
        expected_version: Option<u64>,
    ) -> Result<Order, RepositoryError> {
        patch.validate().map_err(RepositoryError::Invalid)?;
        let now = Utc::now();
        self.store
            .update_record(id.as_str(), expected_version, |order: &mut Order| {
                patch.apply(order, now);
            })
            .await
    }

    /// Move the order to `status`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order = self.update(id, OrderPatch::status(status), None).await?;
        tracing::info!(order_id = %id, %status, "Order status changed");
        Ok(order)
    }

    /// Delete an order. Customer aggregates are not reversed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        if self.store.delete_record::<Order>(id.as_str()).await? {
            tracing::info!("Deleted order");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use msme_core::{CustomerId, Price};

    use super::*;
    use crate::db::Latency;
    use crate::models::OrderItem;
    use crate::storage::{MemoryStorage, StoragePort};

    fn store() -> (Arc<MemoryStorage>, Store) {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::new(storage.clone(), Latency::none());
        (storage, store)
    }

    async fn order_for(store: &Store, customer: &str, minor: i64) -> NewOrder {
        let customer = store.customers().get(&CustomerId::new(customer)).await.unwrap();
        let product = &store.products().list().await.unwrap()[0];
        let mut new = NewOrder::for_customer(&customer, vec![OrderItem::from_product(product, 1)]);
        new.total = Price::from_minor(minor);
        new
    }

    #[tokio::test]
    async fn test_create_updates_customer_aggregates() {
        let (_, store) = store();
        let new = order_for(&store, "CUST-003", 50000).await;

        let order = store.orders().create(new).await.unwrap();
        assert_eq!(order.id.as_str(), "ORD-004");
        assert_eq!(order.status, OrderStatus::Pending);

        let carol = store.customers().get(&CustomerId::new("CUST-003")).await.unwrap();
        assert_eq!(carol.total_orders, 2);
        assert_eq!(carol.total_spent, Price::from_minor(14999 + 50000));
        assert_eq!(carol.version, 2);
    }

    #[tokio::test]
    async fn test_unknown_customer_writes_nothing() {
        let (storage, store) = store();
        let mut new = order_for(&store, "CUST-001", 100).await;
        new.customer_id = CustomerId::new("CUST-999");

        let orders_before = storage.get(keys::ORDERS).unwrap();
        let customers_before = storage.get(keys::CUSTOMERS).unwrap();

        let err = store.orders().create(new).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidReference(_)));
        assert_eq!(storage.get(keys::ORDERS).unwrap(), orders_before);
        assert_eq!(storage.get(keys::CUSTOMERS).unwrap(), customers_before);
    }

    #[tokio::test]
    async fn test_update_status_keeps_snapshot() {
        let (_, store) = store();
        let id = OrderId::new("ORD-003");
        let before = store.orders().get(&id).await.unwrap();

        let after = store
            .orders()
            .update_status(&id, OrderStatus::Shipped)
            .await
            .unwrap();

        assert_eq!(after.status, OrderStatus::Shipped);
        assert_eq!(after.items, before.items);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }
}
