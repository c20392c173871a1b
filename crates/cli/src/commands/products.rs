//! Product commands.

use msme_core::{Price, ProductId};
use rust_decimal::Decimal;
use tracing::info;

use msme_dashboard::db::{RepositoryError, Store};
use msme_dashboard::models::NewProduct;

/// Product fields collected from the command line.
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    pub unit: Option<String>,
    pub description: String,
}

/// List products with their stock levels.
///
/// # Errors
///
/// Returns an error if products cannot be read.
pub async fn list(store: &Store) -> Result<(), RepositoryError> {
    let products = store.products().list().await?;
    info!("{} products", products.len());
    for product in &products {
        info!(
            level = ?product.stock_level(),
            "  {} | {} | {} | stock {}",
            product.id,
            product.name,
            product.price,
            product.stock
        );
    }
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns `RepositoryError::Invalid` if the product fails validation.
pub async fn create(store: &Store, input: ProductInput) -> Result<(), RepositoryError> {
    let product = store
        .products()
        .create(NewProduct {
            name: input.name,
            description: input.description,
            price: Price::new(input.price),
            unit: input.unit,
            stock: input.stock,
            category: input.category,
            image: String::new(),
            variants: Vec::new(),
        })
        .await?;
    info!("Product created! ID: {}, Name: {}", product.id, product.name);
    Ok(())
}

/// Set the stock count of a product.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no product has this ID.
pub async fn set_stock(store: &Store, id: &ProductId, stock: u32) -> Result<(), RepositoryError> {
    let product = store.products().set_stock(id, stock).await?;
    info!(
        level = ?product.stock_level(),
        "Stock of {} set to {}",
        product.name,
        product.stock
    );
    Ok(())
}

/// Delete a product. Deleting an unknown id is not an error.
///
/// # Errors
///
/// Returns an error if products cannot be written.
pub async fn delete(store: &Store, id: &ProductId) -> Result<(), RepositoryError> {
    store.products().delete(id).await?;
    info!("Product {id} deleted");
    Ok(())
}
