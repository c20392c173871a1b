//! Entity store over the storage port.
//!
//! # Collections
//!
//! - `products` - Catalog ([`ProductRepository`])
//! - `orders` - Orders; creation also updates customer aggregates ([`OrderRepository`])
//! - `customers` - Customer records ([`CustomerRepository`])
//! - `payment_methods`, `microloans` - Finance records ([`PaymentMethodRepository`],
//!   [`MicroloanRepository`])
//! - `sequences` - `ORD-###`/`CUST-###` counters
//!
//! Each collection is one JSON array under a fixed key. Every operation
//! waits out its simulated latency, then runs inside a single-writer
//! critical section: load the whole array (seeding it if the key is absent),
//! change it in memory, write the whole array back.
//!
//! Updates bump a per-record `version`; callers holding a stale copy can
//! pass the version they read and get [`RepositoryError::Conflict`] instead
//! of silently overwriting someone else's change.

pub mod customers;
pub mod finance;
pub mod orders;
pub mod products;
pub mod seed;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use msme_core::SequenceId;

use crate::storage::{SharedStorage, StorageError, keys};

pub use customers::CustomerRepository;
pub use finance::{MicroloanRepository, PaymentMethodRepository};
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use seed::SeedReport;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data could not be decoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The caller's copy of the record is out of date.
    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        entity: &'static str,
        id: String,
        expected: u64,
        found: u64,
    },

    /// A record points at another record that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Input failed form-level validation.
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl RepositoryError {
    fn not_found<T: Record>(id: &str) -> Self {
        Self::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        }
    }
}

// =============================================================================
// Simulated Latency
// =============================================================================

/// Artificial delays applied before store and service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Before list/get.
    pub read: Duration,
    /// Before create/update/delete and auth calls.
    pub write: Duration,
    /// Before a chat reply.
    pub chat: Duration,
    /// Before long-running work such as loan decisions.
    pub processing: Duration,
}

impl Latency {
    pub const DEFAULT_READ_MS: u64 = 300;
    pub const DEFAULT_WRITE_MS: u64 = 500;
    pub const DEFAULT_CHAT_MS: u64 = 800;
    pub const DEFAULT_PROCESSING_MS: u64 = 2000;

    /// No delays at all (tests, CLI).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
            chat: Duration::ZERO,
            processing: Duration::ZERO,
        }
    }

    pub async fn simulate_read(&self) {
        pause(self.read).await;
    }

    pub async fn simulate_write(&self) {
        pause(self.write).await;
    }

    pub async fn simulate_chat(&self) {
        pause(self.chat).await;
    }

    pub async fn simulate_processing(&self) {
        pause(self.processing).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(Self::DEFAULT_READ_MS),
            write: Duration::from_millis(Self::DEFAULT_WRITE_MS),
            chat: Duration::from_millis(Self::DEFAULT_CHAT_MS),
            processing: Duration::from_millis(Self::DEFAULT_PROCESSING_MS),
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

// =============================================================================
// Records
// =============================================================================

/// A type stored as one element of a JSON array collection.
pub(crate) trait Record: Serialize + DeserializeOwned + Clone + Send {
    /// Storage key of the collection.
    const KEY: &'static str;
    /// Human-readable entity name for errors and logs.
    const ENTITY: &'static str;
    /// Starter dataset, in the persisted JSON layout.
    const SEED: &'static str;

    fn record_id(&self) -> &str;

    fn version(&self) -> u64 {
        0
    }

    fn bump_version(&mut self) {}

    /// Decode the starter dataset.
    fn seed() -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(Self::SEED)
    }
}

/// Proof that the caller holds the store's write lock.
pub(crate) struct WriteGuard<'a>(#[allow(dead_code)] MutexGuard<'a, ()>);

// =============================================================================
// Store
// =============================================================================

/// The entity store: a storage port plus the single-writer lock and latency
/// profile every repository shares.
pub struct Store {
    storage: SharedStorage,
    latency: Latency,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Create a store over `storage`.
    #[must_use]
    pub fn new(storage: SharedStorage, latency: Latency) -> Self {
        Self {
            storage,
            latency,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying storage port.
    #[must_use]
    pub const fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// The latency profile.
    #[must_use]
    pub const fn latency(&self) -> &Latency {
        &self.latency
    }

    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self)
    }

    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }

    #[must_use]
    pub const fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(self)
    }

    #[must_use]
    pub const fn payment_methods(&self) -> PaymentMethodRepository<'_> {
        PaymentMethodRepository::new(self)
    }

    #[must_use]
    pub const fn microloans(&self) -> MicroloanRepository<'_> {
        MicroloanRepository::new(self)
    }

    pub(crate) async fn lock(&self) -> WriteGuard<'_> {
        WriteGuard(self.write_lock.lock().await)
    }

    /// Load a collection, seeding and persisting it if it is absent or empty.
    pub(crate) fn load<T: Record>(&self, guard: &WriteGuard<'_>) -> Result<Vec<T>, RepositoryError> {
        if let Some(records) = self.stored::<T>()? {
            return Ok(records);
        }
        let seeded = T::seed().map_err(|e| {
            RepositoryError::DataCorruption(format!("{} seed data: {e}", T::KEY))
        })?;
        self.save(guard, &seeded)?;
        tracing::info!(collection = T::KEY, count = seeded.len(), "Seeded collection");
        Ok(seeded)
    }

    /// The persisted collection, or `None` when the key is absent or holds
    /// an empty array.
    pub(crate) fn stored<T: Record>(&self) -> Result<Option<Vec<T>>, RepositoryError> {
        let Some(raw) = self.storage.get(T::KEY)? else {
            return Ok(None);
        };
        let records: Vec<T> = serde_json::from_str(&raw).map_err(|e| {
            RepositoryError::DataCorruption(format!("{} collection: {e}", T::KEY))
        })?;
        Ok((!records.is_empty()).then_some(records))
    }

    /// Replace a whole collection.
    pub(crate) fn save<T: Record>(
        &self,
        _guard: &WriteGuard<'_>,
        records: &[T],
    ) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(records)?;
        self.storage.set(T::KEY, &raw)?;
        Ok(())
    }

    pub(crate) async fn list_records<T: Record>(&self) -> Result<Vec<T>, RepositoryError> {
        self.latency.simulate_read().await;
        let guard = self.lock().await;
        self.load(&guard)
    }

    pub(crate) async fn get_record<T: Record>(&self, id: &str) -> Result<T, RepositoryError> {
        self.list_records::<T>()
            .await?
            .into_iter()
            .find(|record| record.record_id() == id)
            .ok_or_else(|| RepositoryError::not_found::<T>(id))
    }

    /// Append one record built from the current collection contents.
    pub(crate) async fn append_record<T: Record>(
        &self,
        build: impl FnOnce(&[T]) -> T + Send,
    ) -> Result<T, RepositoryError> {
        self.latency.simulate_write().await;
        let guard = self.lock().await;
        let mut records = self.load::<T>(&guard)?;
        let record = build(&records);
        records.push(record.clone());
        self.save(&guard, &records)?;
        Ok(record)
    }

    /// Find by id, check the expected version, mutate, bump the version, persist.
    pub(crate) async fn update_record<T: Record>(
        &self,
        id: &str,
        expected_version: Option<u64>,
        mutate: impl FnOnce(&mut T) + Send,
    ) -> Result<T, RepositoryError> {
        self.latency.simulate_write().await;
        let guard = self.lock().await;
        let mut records = self.load::<T>(&guard)?;
        let record = records
            .iter_mut()
            .find(|record| record.record_id() == id)
            .ok_or_else(|| RepositoryError::not_found::<T>(id))?;

        if let Some(expected) = expected_version {
            if record.version() != expected {
                return Err(RepositoryError::Conflict {
                    entity: T::ENTITY,
                    id: id.to_string(),
                    expected,
                    found: record.version(),
                });
            }
        }

        mutate(record);
        record.bump_version();
        let updated = record.clone();
        self.save(&guard, &records)?;
        Ok(updated)
    }

    /// Remove by id. Returns whether anything was removed; absent ids are not an error.
    pub(crate) async fn delete_record<T: Record>(&self, id: &str) -> Result<bool, RepositoryError> {
        self.latency.simulate_write().await;
        let guard = self.lock().await;
        let mut records = self.load::<T>(&guard)?;
        let before = records.len();
        records.retain(|record| record.record_id() != id);
        let removed = records.len() != before;
        self.save(&guard, &records)?;
        Ok(removed)
    }

    /// Next number for a `PREFIX-###` id.
    ///
    /// Takes the larger of the persisted counter and the highest suffix
    /// already present, so ids are never handed out twice even after
    /// deletions or when the counter key was lost.
    pub(crate) fn next_sequence<'i, I>(
        &self,
        _guard: &WriteGuard<'_>,
        name: &str,
        existing: impl Iterator<Item = &'i I>,
    ) -> Result<u64, RepositoryError>
    where
        I: SequenceId + 'i,
    {
        let mut counters: BTreeMap<String, u64> = match self.storage.get(keys::SEQUENCES)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                RepositoryError::DataCorruption(format!("{} counters: {e}", keys::SEQUENCES))
            })?,
            None => BTreeMap::new(),
        };

        let highest_existing = existing.filter_map(SequenceId::sequence).max().unwrap_or(0);
        let current = counters.get(name).copied().unwrap_or(0);
        let next = current.max(highest_existing) + 1;

        counters.insert(name.to_string(), next);
        self.storage
            .set(keys::SEQUENCES, &serde_json::to_string(&counters)?)?;
        Ok(next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use msme_core::OrderId;

    use super::*;
    use crate::storage::{MemoryStorage, StoragePort};

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()), Latency::none())
    }

    #[test]
    fn test_default_latency_profile() {
        let latency = Latency::default();
        assert_eq!(latency.read, Duration::from_millis(300));
        assert_eq!(latency.write, Duration::from_millis(500));
        assert_eq!(latency.processing, Duration::from_millis(2000));
        assert_eq!(Latency::none().read, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_next_sequence_skips_existing_suffixes() {
        let store = store();
        let existing = [OrderId::new("ORD-001"), OrderId::new("ORD-007")];

        let guard = store.lock().await;
        let first = store.next_sequence(&guard, "orders", existing.iter()).unwrap();
        let second = store.next_sequence(&guard, "orders", existing.iter()).unwrap();

        assert_eq!(first, 8);
        assert_eq!(second, 9);
    }

    #[tokio::test]
    async fn test_next_sequence_counts_past_deleted_ids() {
        let store = store();
        let guard = store.lock().await;
        let ids = [OrderId::new("ORD-003")];
        assert_eq!(store.next_sequence(&guard, "orders", ids.iter()).unwrap(), 4);

        // ORD-004 was deleted again; the counter still moves forward.
        let none: [OrderId; 0] = [];
        assert_eq!(store.next_sequence(&guard, "orders", none.iter()).unwrap(), 5);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_reported() {
        let store = store();
        store.storage().set(keys::PRODUCTS, "{not json").unwrap();
        let err = store.products().list().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
