//! Customer repository.

use chrono::Utc;
use tracing::instrument;

use msme_core::{CustomerId, SequenceId};

use super::{Record, RepositoryError, Store};
use crate::models::{Customer, CustomerPatch, NewCustomer};
use crate::storage::keys;

/// Counter name under the `sequences` key.
pub(crate) const SEQUENCE: &str = "customers";

impl Record for Customer {
    const KEY: &'static str = keys::CUSTOMERS;
    const ENTITY: &'static str = "customer";
    const SEED: &'static str = include_str!("../../seed/customers.json");

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

/// Repository for the customer collection.
pub struct CustomerRepository<'a> {
    store: &'a Store,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All customers in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.store.list_records().await
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no customer has this ID.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        self.store.get_record(id.as_str()).await
    }

    /// Create a customer with the next `CUST-###` ID and zeroed aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the fields fail validation.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewCustomer) -> Result<Customer, RepositoryError> {
        new.validate().map_err(RepositoryError::Invalid)?;

        self.store.latency().simulate_write().await;
        let guard = self.store.lock().await;
        let mut customers = self.store.load::<Customer>(&guard)?;

        let n = self
            .store
            .next_sequence(&guard, SEQUENCE, customers.iter().map(|c| &c.id))?;
        let customer = new.into_customer(CustomerId::from_sequence(n), Utc::now());
        customers.push(customer.clone());
        self.store.save(&guard, &customers)?;

        tracing::info!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    /// Merge `patch` into the customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no customer has this ID.
    /// Returns `RepositoryError::Conflict` if the version does not match.
    #[instrument(skip(self, patch), fields(customer_id = %id))]
    pub async fn update(
        &self,
        id: &CustomerId,
        patch: CustomerPatch,
        expected_version: Option<u64>,
    ) -> Result<Customer, RepositoryError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(RepositoryError::Invalid(
                "customer name cannot be empty".to_string(),
            ));
        }
        self.store
            .update_record(id.as_str(), expected_version, |customer: &mut Customer| {
                patch.apply(customer);
            })
            .await
    }

    /// Delete a customer. Their orders are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete(&self, id: &CustomerId) -> Result<(), RepositoryError> {
        if self.store.delete_record::<Customer>(id.as_str()).await? {
            tracing::info!("Deleted customer");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use msme_core::{CustomerGroup, Email, Price};

    use super::*;
    use crate::db::Latency;
    use crate::storage::MemoryStorage;

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()), Latency::none())
    }

    fn dana() -> NewCustomer {
        NewCustomer {
            name: "Dana Lee".to_string(),
            email: Email::parse("dana@example.com").unwrap(),
            phone: "+1-555-0104".to_string(),
            group: CustomerGroup::New,
        }
    }

    #[tokio::test]
    async fn test_create_continues_seed_numbering() {
        let store = store();
        let customer = store.customers().create(dana()).await.unwrap();
        assert_eq!(customer.id.as_str(), "CUST-004");
        assert_eq!(customer.total_orders, 0);
        assert_eq!(customer.total_spent, Price::ZERO);
    }

    #[tokio::test]
    async fn test_update_cannot_blank_name() {
        let store = store();
        let patch = CustomerPatch {
            name: Some(" ".to_string()),
            ..CustomerPatch::default()
        };
        let err = store
            .customers()
            .update(&CustomerId::new("CUST-001"), patch, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Invalid(_)));
    }
}
