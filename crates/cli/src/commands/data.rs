//! Whole-dataset commands: seed, reset and stats.

use chrono::Utc;
use tracing::info;

use msme_dashboard::db::{RepositoryError, Store};
use msme_dashboard::services::insights;

/// Write the starter dataset.
///
/// # Errors
///
/// Returns an error if the data directory cannot be written.
pub async fn seed(store: &Store, force: bool) -> Result<(), RepositoryError> {
    let report = store.seed(force).await?;

    info!("Seeding complete!");
    info!("  Seeded: {}", report.seeded.join(", "));
    if !report.skipped.is_empty() {
        info!("  Skipped (already present): {}", report.skipped.join(", "));
    }
    Ok(())
}

/// Remove every collection and the session.
///
/// # Errors
///
/// Returns an error if a key cannot be removed.
pub async fn reset(store: &Store) -> Result<(), RepositoryError> {
    store.reset().await?;
    info!("All dashboard data removed; seed data loads again on next read");
    Ok(())
}

/// Print the dashboard headline numbers.
///
/// # Errors
///
/// Returns an error if a collection cannot be read.
pub async fn stats(store: &Store) -> Result<(), RepositoryError> {
    let products = store.products().list().await?;
    let orders = store.orders().list().await?;
    let customers = store.customers().list().await?;
    let stats = insights::dashboard_stats(&products, &orders, &customers, Utc::now());

    info!("Dashboard Statistics");
    info!("====================");
    info!(
        "Revenue: {} {} ({}% vs last month)",
        insights::CURRENCY,
        stats.total_revenue,
        stats.revenue_change
    );
    info!("Orders: {} ({}%)", stats.total_orders, stats.orders_change);
    info!(
        "Customers: {} ({}%)",
        stats.total_customers, stats.customers_change
    );
    info!(
        "Products: {} ({} low stock, {} out of stock)",
        stats.total_products, stats.low_stock_items, stats.out_of_stock_items
    );
    info!(
        "Inventory: {} units worth {} {}",
        stats.inventory_units,
        insights::CURRENCY,
        stats.inventory_value
    );
    Ok(())
}
