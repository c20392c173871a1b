//! Payment method and microloan repositories.

use tracing::instrument;

use msme_core::{LoanId, PaymentMethodId, PaymentMethodStatus, SequenceId};

use super::{Record, RepositoryError, Store};
use crate::models::{MicroloanApplication, NewPaymentMethod, PaymentMethod};
use crate::storage::keys;

/// Counter name under the `sequences` key.
pub(crate) const LOAN_SEQUENCE: &str = "loans";

impl Record for PaymentMethod {
    const KEY: &'static str = keys::PAYMENT_METHODS;
    const ENTITY: &'static str = "payment method";
    const SEED: &'static str = include_str!("../../seed/payment_methods.json");

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

impl Record for MicroloanApplication {
    const KEY: &'static str = keys::MICROLOANS;
    const ENTITY: &'static str = "microloan";
    const SEED: &'static str = include_str!("../../seed/microloans.json");

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Repository for connected mobile-money accounts.
pub struct PaymentMethodRepository<'a> {
    store: &'a Store,
}

impl<'a> PaymentMethodRepository<'a> {
    /// Create a new payment method repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All payment methods.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PaymentMethod>, RepositoryError> {
        self.store.list_records().await
    }

    /// Connect a new account. It starts out pending and non-default.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the phone number or account name is blank.
    #[instrument(skip(self, new), fields(method_type = ?new.method_type))]
    pub async fn connect(&self, new: NewPaymentMethod) -> Result<PaymentMethod, RepositoryError> {
        if new.phone_number.trim().is_empty() {
            return Err(RepositoryError::Invalid(
                "phone number cannot be empty".to_string(),
            ));
        }
        if new.account_name.trim().is_empty() {
            return Err(RepositoryError::Invalid(
                "account name cannot be empty".to_string(),
            ));
        }

        let method = self
            .store
            .append_record(|_: &[PaymentMethod]| PaymentMethod {
                id: PaymentMethodId::generate(),
                method_type: new.method_type,
                phone_number: new.phone_number,
                account_name: new.account_name,
                is_default: false,
                status: PaymentMethodStatus::Pending,
            })
            .await?;
        tracing::info!(payment_method_id = %method.id, "Connected payment method");
        Ok(method)
    }
}

// =============================================================================
// Microloans
// =============================================================================

/// Repository for decided microloan applications.
pub struct MicroloanRepository<'a> {
    store: &'a Store,
}

impl<'a> MicroloanRepository<'a> {
    /// Create a new microloan repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All applications, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MicroloanApplication>, RepositoryError> {
        self.store.list_records().await
    }

    /// Get an application by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no application has this ID.
    pub async fn get(&self, id: &LoanId) -> Result<MicroloanApplication, RepositoryError> {
        self.store.get_record(id.as_str()).await
    }

    /// Persist a decided application under the next `loan-###` ID.
    ///
    /// `build` receives the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    #[instrument(skip(self, build))]
    pub async fn record(
        &self,
        build: impl FnOnce(LoanId) -> MicroloanApplication + Send,
    ) -> Result<MicroloanApplication, RepositoryError> {
        self.store.latency().simulate_write().await;
        let guard = self.store.lock().await;
        let mut loans = self.store.load::<MicroloanApplication>(&guard)?;

        let n = self
            .store
            .next_sequence(&guard, LOAN_SEQUENCE, loans.iter().map(|l| &l.id))?;
        let loan = build(LoanId::from_sequence(n));
        loans.push(loan.clone());
        self.store.save(&guard, &loans)?;

        tracing::info!(loan_id = %loan.id, status = ?loan.status, "Recorded microloan application");
        Ok(loan)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use msme_core::PaymentMethodType;

    use super::*;
    use crate::db::Latency;
    use crate::storage::MemoryStorage;

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()), Latency::none())
    }

    #[tokio::test]
    async fn test_seeded_payment_methods() {
        let store = store();
        let methods = store.payment_methods().list().await.unwrap();
        assert_eq!(methods.len(), 2);
        assert!(methods[0].is_default);
        assert_eq!(methods[1].method_type, PaymentMethodType::AirtelMoney);
        assert_eq!(methods[1].status, PaymentMethodStatus::Inactive);
    }

    #[tokio::test]
    async fn test_connect_appends_pending_method() {
        let store = store();
        let method = store
            .payment_methods()
            .connect(NewPaymentMethod {
                method_type: PaymentMethodType::Mpesa,
                phone_number: "+254700000001".to_string(),
                account_name: "Shop Till".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(method.status, PaymentMethodStatus::Pending);
        assert!(!method.is_default);
        assert_eq!(store.payment_methods().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seeded_loan_is_readable() {
        let store = store();
        let loan = store.microloans().get(&LoanId::new("loan-001")).await.unwrap();
        assert_eq!(loan.term, 12);
        assert_eq!(loan.credit_score, 85);
    }
}
