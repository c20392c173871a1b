//! Starter dataset management.
//!
//! Collections seed themselves on first read; these helpers let the
//! operator do it up front, overwrite existing data, or wipe everything.

use serde::Serialize;
use tracing::instrument;

use super::{Record, RepositoryError, Store, WriteGuard};
use crate::models::{Customer, MicroloanApplication, Order, PaymentMethod, Product};
use crate::storage::keys;

/// Which collections a seed run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Collection keys that were written.
    pub seeded: Vec<&'static str>,
    /// Collection keys that already had data and were left alone.
    pub skipped: Vec<&'static str>,
}

impl Store {
    /// Write the starter dataset.
    ///
    /// Without `force`, only absent or empty collections are written. With `force`,
    /// every collection is overwritten and the ID counters are cleared.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self))]
    pub async fn seed(&self, force: bool) -> Result<SeedReport, RepositoryError> {
        self.latency().simulate_write().await;
        let guard = self.lock().await;
        let mut report = SeedReport::default();

        if force {
            self.storage().remove(keys::SEQUENCES)?;
        }
        self.seed_one::<Product>(&guard, force, &mut report)?;
        self.seed_one::<Customer>(&guard, force, &mut report)?;
        self.seed_one::<Order>(&guard, force, &mut report)?;
        self.seed_one::<PaymentMethod>(&guard, force, &mut report)?;
        self.seed_one::<MicroloanApplication>(&guard, force, &mut report)?;

        tracing::info!(seeded = ?report.seeded, skipped = ?report.skipped, "Seed complete");
        Ok(report)
    }

    /// Remove every key the dashboard writes, including the session.
    ///
    /// The next read of each collection seeds it again.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock().await;
        for key in keys::ALL {
            self.storage().remove(key)?;
        }
        tracing::info!("Storage reset");
        Ok(())
    }

    fn seed_one<T: Record>(
        &self,
        guard: &WriteGuard<'_>,
        force: bool,
        report: &mut SeedReport,
    ) -> Result<(), RepositoryError> {
        if !force && self.stored::<T>()?.is_some() {
            report.skipped.push(T::KEY);
            return Ok(());
        }
        let records = T::seed().map_err(|e| {
            RepositoryError::DataCorruption(format!("{} seed data: {e}", T::KEY))
        })?;
        self.save(guard, &records)?;
        report.seeded.push(T::KEY);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::Latency;
    use crate::storage::{MemoryStorage, StoragePort};

    #[tokio::test]
    async fn test_seed_skips_existing_unless_forced() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::new(storage.clone(), Latency::none());
        let mut products = store.products().list().await.unwrap();
        products.truncate(2);
        storage
            .set(keys::PRODUCTS, &serde_json::to_string(&products).unwrap())
            .unwrap();
        storage.set(keys::CUSTOMERS, "[]").unwrap();

        let report = store.seed(false).await.unwrap();
        assert_eq!(report.skipped, vec![keys::PRODUCTS]);
        assert!(report.seeded.contains(&keys::CUSTOMERS));
        assert_eq!(store.products().list().await.unwrap().len(), 2);

        let report = store.seed(true).await.unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(store.products().list().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::new(storage.clone(), Latency::none());
        store.seed(false).await.unwrap();
        storage.set(keys::AUTH_TOKEN, "token").unwrap();

        store.reset().await.unwrap();

        assert!(storage.is_empty().unwrap());
    }
}
