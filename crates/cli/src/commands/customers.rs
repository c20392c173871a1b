//! Customer commands.

use msme_core::{CustomerGroup, Email};
use tracing::info;

use msme_dashboard::db::{RepositoryError, Store};
use msme_dashboard::models::NewCustomer;

/// List customers with their order aggregates.
///
/// # Errors
///
/// Returns an error if customers cannot be read.
pub async fn list(store: &Store) -> Result<(), RepositoryError> {
    let customers = store.customers().list().await?;
    info!("{} customers", customers.len());
    for customer in &customers {
        info!(
            "  {} | {} <{}> | {} | {} orders, {} spent",
            customer.id,
            customer.name,
            customer.email,
            customer.group,
            customer.total_orders,
            customer.total_spent
        );
    }
    Ok(())
}

/// Create a customer.
///
/// # Errors
///
/// Returns `RepositoryError::Invalid` if the customer fails validation.
pub async fn create(
    store: &Store,
    name: String,
    email: Email,
    phone: String,
    group: CustomerGroup,
) -> Result<(), RepositoryError> {
    let customer = store
        .customers()
        .create(NewCustomer {
            name,
            email,
            phone,
            group,
        })
        .await?;
    info!(
        "Customer created! ID: {}, Name: {}",
        customer.id, customer.name
    );
    Ok(())
}
