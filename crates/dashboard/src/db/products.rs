//! Product catalog repository.

use chrono::Utc;
use tracing::instrument;

use msme_core::ProductId;

use super::{Record, RepositoryError, Store};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::storage::keys;

impl Record for Product {
    const KEY: &'static str = keys::PRODUCTS;
    const ENTITY: &'static str = "product";
    const SEED: &'static str = include_str!("../../seed/products.json");

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

/// Repository for the product collection.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.store.list_records().await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.store.get_record(id.as_str()).await
    }

    /// Create a product with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the fields fail validation.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        new.validate().map_err(RepositoryError::Invalid)?;
        let product = self
            .store
            .append_record(|_: &[Product]| new.into_product(ProductId::generate(), Utc::now()))
            .await?;
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Merge `patch` into the product.
    ///
    /// Pass `expected_version` to reject the update if someone else changed
    /// the product since it was read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Conflict` if the version does not match.
    /// Returns `RepositoryError::Invalid` if the patch fails validation.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: &ProductId,
        patch: ProductPatch,
        expected_version: Option<u64>,
    ) -> Result<Product, RepositoryError> {
        patch.validate().map_err(RepositoryError::Invalid)?;
        self.store
            .update_record(id.as_str(), expected_version, |product: &mut Product| {
                patch.apply(product);
            })
            .await
    }

    /// Set the stock count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    pub async fn set_stock(&self, id: &ProductId, stock: u32) -> Result<Product, RepositoryError> {
        let patch = ProductPatch {
            stock: Some(stock),
            ..ProductPatch::default()
        };
        self.update(id, patch, None).await
    }

    /// Delete a product. Deleting an absent ID is not an error.
    ///
    /// Orders referencing the product keep their snapshot lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        if self.store.delete_record::<Product>(id.as_str()).await? {
            tracing::info!("Deleted product");
        }
        Ok(())
    }
}
