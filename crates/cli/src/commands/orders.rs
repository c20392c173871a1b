//! Order commands.

use msme_core::{CustomerId, OrderId, OrderStatus, ProductId};
use tracing::info;

use msme_dashboard::db::{RepositoryError, Store};
use msme_dashboard::models::{NewOrder, OrderItem};

/// Parse a `<product-id>:<quantity>` line item.
///
/// # Errors
///
/// Returns a message if the separator is missing or the quantity is not a
/// positive integer.
pub fn parse_item(s: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected <product-id>:<quantity>, got `{s}`"))?;
    let quantity: u32 = quantity
        .parse()
        .map_err(|e| format!("invalid quantity `{quantity}`: {e}"))?;
    if id.is_empty() || quantity == 0 {
        return Err(format!("expected <product-id>:<quantity>, got `{s}`"));
    }
    Ok((ProductId::new(id), quantity))
}

/// List orders.
///
/// # Errors
///
/// Returns an error if orders cannot be read.
pub async fn list(store: &Store) -> Result<(), RepositoryError> {
    let orders = store.orders().list().await?;
    info!("{} orders", orders.len());
    for order in &orders {
        info!(
            "  {} | {} | {} | {} item(s) | {}",
            order.id,
            order.customer_name,
            order.status,
            order.items.len(),
            order.total
        );
    }
    Ok(())
}

/// Place an order for `customer_id`, pricing lines from the catalog.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the customer or a product does not
/// exist.
pub async fn create(
    store: &Store,
    customer_id: &CustomerId,
    items: Vec<(ProductId, u32)>,
) -> Result<(), RepositoryError> {
    let customer = store.customers().get(customer_id).await?;

    let mut lines = Vec::with_capacity(items.len());
    for (product_id, quantity) in items {
        let product = store.products().get(&product_id).await?;
        lines.push(OrderItem::from_product(&product, quantity));
    }

    let order = store
        .orders()
        .create(NewOrder::for_customer(&customer, lines))
        .await?;
    info!(
        "Order created! ID: {}, Customer: {}, Total: {}",
        order.id, order.customer_name, order.total
    );
    Ok(())
}

/// Change the status of an order.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if no order has this ID.
pub async fn set_status(
    store: &Store,
    id: &OrderId,
    status: OrderStatus,
) -> Result<(), RepositoryError> {
    let order = store.orders().update_status(id, status).await?;
    info!("Order {} is now {}", order.id, order.status);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let (id, quantity) = parse_item("a1b2:3").unwrap();
        assert_eq!(id.as_str(), "a1b2");
        assert_eq!(quantity, 3);

        assert!(parse_item("a1b2").is_err());
        assert!(parse_item("a1b2:0").is_err());
        assert!(parse_item(":2").is_err());
        assert!(parse_item("a1b2:x").is_err());
    }
}
