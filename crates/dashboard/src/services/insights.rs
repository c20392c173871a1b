//! Dashboard statistics and mock AI insights.
//!
//! Everything here is computed from the collections at request time and is
//! illustrative only. Functions take `now` and, where randomness is involved,
//! an `Rng` so callers (and tests) control both.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use msme_core::{CustomerGroup, Price, ProductId, StockLevel};

use crate::models::{Customer, Order, Product};

/// Currency label used in generated text.
pub const CURRENCY: &str = "KSH";

/// Days in the sales series and the demand projection window.
pub const SERIES_DAYS: u32 = 30;

/// Products at or below this stock count show up in growth tips.
pub const RESTOCK_TIP_THRESHOLD: u32 = 5;

/// Products above this stock count get a discount suggestion.
pub const OVERSTOCK_THRESHOLD: u32 = 50;

const ACQUISITION_COST_TARGET: i64 = 500;
const LIFETIME_VALUE_TARGET: i64 = 2000;
const TURNOVER_TARGET: i64 = 6;

// =============================================================================
// Dashboard
// =============================================================================

/// Headline numbers for the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of non-cancelled order totals.
    pub total_revenue: Price,
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_products: usize,
    /// Products below the low-stock threshold but not out of stock.
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub inventory_units: u64,
    pub inventory_value: Price,
    /// 70 % of revenue.
    pub estimated_cost: Price,
    /// 30 % of revenue.
    pub estimated_profit: Price,
    /// Month-over-month change, in percent.
    pub revenue_change: Decimal,
    pub orders_change: Decimal,
    pub customers_change: Decimal,
}

/// Compute the dashboard headline numbers.
#[must_use]
pub fn dashboard_stats(
    products: &[Product],
    orders: &[Order],
    customers: &[Customer],
    now: DateTime<Utc>,
) -> DashboardStats {
    let total_revenue = revenue(orders.iter());
    let this_month = month_of(now);
    let last_month = previous_month(this_month);

    let in_month = |month: (i32, u32)| {
        orders
            .iter()
            .filter(move |o| month_of(o.created_at) == month)
    };
    let customers_in = |month: (i32, u32)| {
        customers
            .iter()
            .filter(|c| month_of(c.created_at) == month)
            .count()
    };

    DashboardStats {
        total_revenue,
        total_orders: orders.len(),
        total_customers: customers.len(),
        total_products: products.len(),
        low_stock_items: products
            .iter()
            .filter(|p| p.stock_level() == StockLevel::Low)
            .count(),
        out_of_stock_items: products
            .iter()
            .filter(|p| p.stock_level() == StockLevel::OutOfStock)
            .count(),
        inventory_units: products.iter().map(|p| u64::from(p.stock)).sum(),
        inventory_value: products.iter().map(Product::stock_value).sum(),
        estimated_cost: total_revenue.scaled(Decimal::new(7, 1)),
        estimated_profit: total_revenue.scaled(Decimal::new(3, 1)),
        revenue_change: percent_change(
            revenue(in_month(last_month)).amount(),
            revenue(in_month(this_month)).amount(),
        ),
        orders_change: percent_change(
            Decimal::from(in_month(last_month).count()),
            Decimal::from(in_month(this_month).count()),
        ),
        customers_change: percent_change(
            Decimal::from(customers_in(last_month)),
            Decimal::from(customers_in(this_month)),
        ),
    }
}

/// One day of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub revenue: Price,
    pub orders: u32,
}

/// Random daily sales for the [`SERIES_DAYS`] days ending `today`, oldest first.
pub fn sales_series(today: NaiveDate, rng: &mut impl Rng) -> Vec<SalesPoint> {
    (0..SERIES_DAYS)
        .rev()
        .map(|days_ago| SalesPoint {
            date: today - Duration::days(i64::from(days_ago)),
            revenue: Price::new(Decimal::from(rng.random_range(1000..6000_i64))),
            orders: rng.random_range(10..60),
        })
        .collect()
}

// =============================================================================
// Insights
// =============================================================================

/// Everything shown on the insights page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub revenue_predictions: Vec<RevenuePrediction>,
    pub growth_tips: Vec<GrowthTip>,
    pub performance: Vec<PerformanceMetric>,
}

/// Predicted revenue for one upcoming month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenuePrediction {
    /// e.g. `Nov 2024`.
    pub month: String,
    pub predicted: Price,
    /// Percent.
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

/// An actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthTip {
    pub title: String,
    pub description: String,
    pub impact: Level,
    pub effort: Level,
    pub roi: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Good,
    Warning,
}

/// A business KPI compared against a fixed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceMetric {
    pub metric: String,
    pub value: Decimal,
    pub current: String,
    pub target: String,
    pub status: MetricStatus,
    /// Percent.
    pub trend: i32,
    pub insight: String,
}

/// Build the insights page.
#[must_use]
pub fn insights(
    products: &[Product],
    orders: &[Order],
    customers: &[Customer],
    now: DateTime<Utc>,
) -> Insights {
    Insights {
        revenue_predictions: revenue_predictions(orders, now),
        growth_tips: growth_tips(products, orders),
        performance: performance_metrics(products, orders, customers),
    }
}

/// Revenue forecast for the four months after `now`.
///
/// The base is the average monthly revenue over the last three months. The
/// first month applies a fixed uplift; later months add the current
/// month-over-month growth rate (10 % when last month had no revenue).
#[must_use]
pub fn revenue_predictions(orders: &[Order], now: DateTime<Utc>) -> Vec<RevenuePrediction> {
    // (multiplier in hundredths, add growth, confidence)
    const PLAN: [(i64, bool, u8); 4] = [
        (110, false, 75),
        (115, true, 70),
        (125, true, 65),
        (120, true, 60),
    ];

    let labels = (1..=4).map(|ahead| {
        now.checked_add_months(Months::new(ahead))
            .map_or_else(String::new, |d| d.format("%b %Y").to_string())
    });

    if orders.is_empty() {
        return labels
            .map(|month| RevenuePrediction {
                month,
                predicted: Price::ZERO,
                confidence: 50,
            })
            .collect();
    }

    let since = now
        .checked_sub_months(Months::new(3))
        .unwrap_or_else(|| now - Duration::days(90));
    let base =
        revenue(orders.iter().filter(|o| o.created_at >= since)).amount() / Decimal::from(3);

    let this_month = month_of(now);
    let revenue_in = |month: (i32, u32)| {
        revenue(orders.iter().filter(|o| month_of(o.created_at) == month)).amount()
    };
    let last = revenue_in(previous_month(this_month));
    let current = revenue_in(this_month);
    let growth = if last > Decimal::ZERO {
        (current - last) / last
    } else {
        Decimal::new(1, 1)
    };

    labels
        .zip(PLAN)
        .map(|(month, (multiplier, with_growth, confidence))| {
            let mut predicted = base * Decimal::new(multiplier, 2);
            if with_growth {
                predicted += base * growth;
            }
            RevenuePrediction {
                month,
                predicted: Price::new(predicted.round_dp(0).max(Decimal::ZERO)),
                confidence,
            }
        })
        .collect()
}

/// Suggestions derived from category revenue, order value and stock.
///
/// Empty when there are no products or no orders.
#[must_use]
pub fn growth_tips(products: &[Product], orders: &[Order]) -> Vec<GrowthTip> {
    if products.is_empty() || orders.is_empty() {
        return Vec::new();
    }

    // Category revenue: totals of orders containing any of the category's products.
    let mut categories: Vec<(&str, Price)> = Vec::new();
    for product in products {
        let product_revenue: Price = orders
            .iter()
            .filter(|o| o.contains_product(&product.id))
            .map(|o| o.total)
            .sum();
        match categories.iter_mut().find(|(name, _)| *name == product.category) {
            Some((_, total)) => *total += product_revenue,
            None => categories.push((&product.category, product_revenue)),
        }
    }
    let top_category = categories
        .iter()
        .fold(None::<&(&str, Price)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map_or("Top", |entry| entry.0);

    let restock: Vec<&Product> = products
        .iter()
        .filter(|p| p.stock <= RESTOCK_TIP_THRESHOLD)
        .collect();

    let order_total: Price = orders.iter().map(|o| o.total).sum();
    let average_order = (order_total.amount() / Decimal::from(orders.len())).round_dp(0);

    let mut tips = vec![
        GrowthTip {
            title: format!("Expand {top_category} Category"),
            description: format!(
                "Your {top_category} category generates the most revenue. Consider adding {}new products in this category.",
                if restock.is_empty() { "" } else { "more inventory and " }
            ),
            impact: Level::High,
            effort: Level::Medium,
            roi: "185%".to_string(),
        },
        GrowthTip {
            title: "Optimize Pricing Strategy".to_string(),
            description: format!(
                "Your average order value is {CURRENCY} {average_order}. Consider dynamic pricing to increase margins."
            ),
            impact: Level::Medium,
            effort: Level::Low,
            roi: "145%".to_string(),
        },
    ];

    if !restock.is_empty() {
        let names: Vec<&str> = restock.iter().map(|p| p.name.as_str()).collect();
        tips.push(GrowthTip {
            title: "Restock Low Inventory".to_string(),
            description: format!(
                "{} product(s) are at or below {RESTOCK_TIP_THRESHOLD} units: {}.",
                restock.len(),
                names.join(", ")
            ),
            impact: Level::High,
            effort: Level::Low,
            roi: "120%".to_string(),
        });
    }

    tips
}

/// Acquisition cost, lifetime value and inventory turnover against targets.
///
/// Empty when there are no customers or no orders.
#[must_use]
pub fn performance_metrics(
    products: &[Product],
    orders: &[Order],
    customers: &[Customer],
) -> Vec<PerformanceMetric> {
    if customers.is_empty() || orders.is_empty() {
        return Vec::new();
    }

    let total_revenue = revenue(orders.iter()).amount();

    let acquisition_cost =
        (total_revenue / Decimal::from(customers.len()) * Decimal::new(1, 1)).round_dp(0);

    let vip: Vec<&Customer> = customers
        .iter()
        .filter(|c| c.group == CustomerGroup::Vip)
        .collect();
    let lifetime_value = if vip.is_empty() {
        Decimal::ZERO
    } else {
        let spent: Price = vip.iter().map(|c| c.total_spent).sum();
        (spent.amount() / Decimal::from(vip.len())).round_dp(0)
    };

    let stock_value: Price = products.iter().map(Product::stock_value).sum();
    let turnover = if stock_value.amount() > Decimal::ZERO {
        (total_revenue / stock_value.amount() * Decimal::from(12)).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let cac_good = acquisition_cost < Decimal::from(ACQUISITION_COST_TARGET);
    let clv_good = lifetime_value > Decimal::from(LIFETIME_VALUE_TARGET);
    let turnover_good = turnover > Decimal::from(TURNOVER_TARGET);

    vec![
        PerformanceMetric {
            metric: "Customer Acquisition Cost".to_string(),
            value: acquisition_cost,
            current: format!("{CURRENCY} {acquisition_cost}"),
            target: format!("{CURRENCY} {ACQUISITION_COST_TARGET}"),
            status: status(cac_good),
            trend: -5,
            insight: if cac_good {
                "CAC is below target, indicating efficient customer acquisition".to_string()
            } else {
                "CAC is above target, indicating expensive customer acquisition".to_string()
            },
        },
        PerformanceMetric {
            metric: "Customer Lifetime Value".to_string(),
            value: lifetime_value,
            current: format!("{CURRENCY} {lifetime_value}"),
            target: format!("{CURRENCY} {LIFETIME_VALUE_TARGET}"),
            status: status(clv_good),
            trend: 8,
            insight: if clv_good {
                "LTV is above target, showing strong customer retention".to_string()
            } else {
                "LTV is below target, showing room for improvement in customer retention"
                    .to_string()
            },
        },
        PerformanceMetric {
            metric: "Inventory Turnover".to_string(),
            value: turnover,
            current: format!("{turnover:.1}x"),
            target: format!("{TURNOVER_TARGET}.0x"),
            status: status(turnover_good),
            trend: 3,
            insight: if turnover_good {
                "Turnover rate is healthy, indicating good inventory movement".to_string()
            } else {
                "Turnover rate is low, indicating slow inventory movement".to_string()
            },
        },
    ]
}

// =============================================================================
// Inventory Predictions
// =============================================================================

/// Projected demand and restock advice for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandPrediction {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: u32,
    pub daily_demand: u32,
    /// `daily_demand` over [`SERIES_DAYS`] days.
    pub projected_demand: u32,
    /// Units needed to cover the projection; never negative.
    pub suggested_restock: u32,
    /// Percent.
    pub confidence: u8,
}

/// Random demand projection for every product.
pub fn demand_predictions(products: &[Product], rng: &mut impl Rng) -> Vec<DemandPrediction> {
    products
        .iter()
        .map(|product| {
            let daily_demand = rng.random_range(1..6);
            let projected_demand = daily_demand * SERIES_DAYS;
            DemandPrediction {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                current_stock: product.stock,
                daily_demand,
                projected_demand,
                suggested_restock: projected_demand.saturating_sub(product.stock),
                confidence: rng.random_range(60..95),
            }
        })
        .collect()
}

/// A suggested price change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestion {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_price: Price,
    pub suggested_price: Price,
    /// Percent; positive is an increase.
    pub change_percent: i32,
    pub reason: String,
}

/// Raise prices on scarce stock, discount overstock. Other products get no suggestion.
#[must_use]
pub fn pricing_suggestions(products: &[Product]) -> Vec<PricingSuggestion> {
    products
        .iter()
        .filter_map(|product| {
            let (change_percent, reason) = if product.stock_level() == StockLevel::Low {
                (8, "Low stock with steady demand supports a higher price")
            } else if product.stock > OVERSTOCK_THRESHOLD {
                (-5, "High stock levels; a small discount can speed up sales")
            } else {
                return None;
            };
            let factor = Decimal::ONE_HUNDRED + Decimal::from(change_percent);
            Some(PricingSuggestion {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                current_price: product.price,
                suggested_price: product.price.scaled(factor / Decimal::ONE_HUNDRED),
                change_percent,
                reason: reason.to_string(),
            })
        })
        .collect()
}

// =============================================================================
// Helpers
// =============================================================================

fn revenue<'a>(orders: impl Iterator<Item = &'a Order>) -> Price {
    orders
        .filter(|o| o.status.counts_as_revenue())
        .map(|o| o.total)
        .sum()
}

fn month_of(at: DateTime<Utc>) -> (i32, u32) {
    (at.year(), at.month())
}

const fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Percent change from `previous` to `current`, one decimal place.
/// From zero, any growth counts as 100 %.
fn percent_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous.is_zero() {
        if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(1)
    }
}

const fn status(good: bool) -> MetricStatus {
    if good {
        MetricStatus::Good
    } else {
        MetricStatus::Warning
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use msme_core::{CustomerId, Email, OrderId, OrderStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::OrderItem;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn product(id: &str, category: &str, minor: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_minor(minor),
            unit: None,
            stock,
            category: category.to_string(),
            image: String::new(),
            variants: vec![],
            created_at: at(2024, 1, 1),
            version: 1,
        }
    }

    fn order(id: &str, product_id: &str, total: i64, status: OrderStatus, when: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::new(id),
            customer_id: CustomerId::new("CUST-001"),
            customer_name: "Alice".to_string(),
            customer_email: Email::parse("alice@example.com").unwrap(),
            items: vec![OrderItem {
                product_id: ProductId::new(product_id),
                product_name: String::new(),
                quantity: 1,
                price: Price::new(Decimal::from(total)),
            }],
            total: Price::new(Decimal::from(total)),
            status,
            created_at: when,
            updated_at: when,
            version: 1,
        }
    }

    fn customer(id: &str, group: CustomerGroup, spent: i64, when: DateTime<Utc>) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: id.to_string(),
            email: Email::parse("c@example.com").unwrap(),
            phone: String::new(),
            total_orders: 1,
            total_spent: Price::new(Decimal::from(spent)),
            group,
            created_at: when,
            version: 1,
        }
    }

    #[test]
    fn test_dashboard_stats() {
        let now = at(2024, 10, 15);
        let products = [
            product("a", "Feeds", 1000, 0),
            product("b", "Feeds", 1000, 4),
            product("c", "Tools", 500, 20),
        ];
        let orders = [
            order("ORD-001", "a", 1000, OrderStatus::Delivered, at(2024, 9, 10)),
            order("ORD-002", "b", 1500, OrderStatus::Pending, at(2024, 10, 2)),
            order("ORD-003", "c", 999, OrderStatus::Cancelled, at(2024, 10, 3)),
        ];
        let customers = [customer("CUST-001", CustomerGroup::Vip, 2500, at(2024, 10, 1))];

        let stats = dashboard_stats(&products, &orders, &customers, now);

        assert_eq!(stats.total_revenue, Price::new(Decimal::from(2500)));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.out_of_stock_items, 1);
        assert_eq!(stats.inventory_units, 24);
        assert_eq!(stats.inventory_value, Price::from_minor(4000 + 10000));
        assert_eq!(stats.estimated_cost, Price::new(Decimal::from(1750)));
        assert_eq!(stats.estimated_profit, Price::new(Decimal::from(750)));
        assert_eq!(stats.revenue_change, Decimal::from(50));
        assert_eq!(stats.orders_change, Decimal::from(100));
        assert_eq!(stats.customers_change, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_sales_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        let series = sales_series(today, &mut rng);

        assert_eq!(series.len(), 30);
        assert_eq!(series[29].date, today);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 9, 16).unwrap());
        for point in &series {
            assert!((10..60).contains(&point.orders));
            assert!(point.revenue >= Price::new(Decimal::from(1000)));
            assert!(point.revenue < Price::new(Decimal::from(6000)));
        }
    }

    #[test]
    fn test_predictions_without_orders() {
        let predictions = revenue_predictions(&[], at(2024, 9, 30));
        assert_eq!(predictions.len(), 4);
        assert_eq!(predictions[0].month, "Oct 2024");
        assert!(predictions.iter().all(|p| p.predicted == Price::ZERO && p.confidence == 50));
    }

    #[test]
    fn test_predictions_use_growth_rate() {
        let now = at(2024, 10, 20);
        let orders = [
            order("ORD-001", "a", 1000, OrderStatus::Delivered, at(2024, 9, 10)),
            order("ORD-002", "a", 2000, OrderStatus::Delivered, at(2024, 10, 5)),
        ];
        let predictions = revenue_predictions(&orders, now);

        // base = 3000 / 3 = 1000, growth = 100 %
        assert_eq!(predictions[0].predicted, Price::new(Decimal::from(1100)));
        assert_eq!(predictions[1].predicted, Price::new(Decimal::from(2150)));
        assert_eq!(predictions[2].predicted, Price::new(Decimal::from(2250)));
        assert_eq!(predictions[3].predicted, Price::new(Decimal::from(2200)));
        assert_eq!(predictions[3].confidence, 60);
    }

    #[test]
    fn test_growth_tips_pick_top_category() {
        let products = [product("a", "Feeds", 1000, 3), product("b", "Tools", 1000, 30)];
        let orders = [
            order("ORD-001", "a", 300, OrderStatus::Delivered, at(2024, 9, 1)),
            order("ORD-002", "b", 100, OrderStatus::Delivered, at(2024, 9, 2)),
        ];
        let tips = growth_tips(&products, &orders);

        assert_eq!(tips[0].title, "Expand Feeds Category");
        assert!(tips[0].description.contains("more inventory and"));
        assert!(tips[1].description.contains("KSH 200"));
        assert_eq!(tips.len(), 3);
        assert!(growth_tips(&products, &[]).is_empty());
    }

    #[test]
    fn test_performance_metrics() {
        let products = [product("a", "Feeds", 10000, 10)];
        let orders = [order("ORD-001", "a", 6000, OrderStatus::Delivered, at(2024, 9, 1))];
        let customers = [
            customer("CUST-001", CustomerGroup::Vip, 3000, at(2024, 1, 1)),
            customer("CUST-002", CustomerGroup::Regular, 100, at(2024, 1, 1)),
        ];
        let metrics = performance_metrics(&products, &orders, &customers);

        assert_eq!(metrics[0].value, Decimal::from(300));
        assert_eq!(metrics[0].status, MetricStatus::Good);
        assert_eq!(metrics[1].value, Decimal::from(3000));
        assert_eq!(metrics[1].status, MetricStatus::Good);
        assert_eq!(metrics[2].value, Decimal::from(72));
        assert_eq!(metrics[2].current, "72.0x");
    }

    #[test]
    fn test_demand_restock_never_negative() {
        let mut rng = StdRng::seed_from_u64(1);
        let products = [product("a", "Feeds", 100, 1000), product("b", "Feeds", 100, 0)];
        let predictions = demand_predictions(&products, &mut rng);

        assert_eq!(predictions[0].suggested_restock, 0);
        assert_eq!(predictions[1].suggested_restock, predictions[1].projected_demand);
        for p in &predictions {
            assert_eq!(p.projected_demand, p.daily_demand * 30);
            assert!((60..95).contains(&p.confidence));
        }
    }

    #[test]
    fn test_pricing_suggestions() {
        let products = [
            product("low", "Feeds", 10000, 4),
            product("out", "Feeds", 10000, 0),
            product("mid", "Feeds", 10000, 30),
            product("high", "Feeds", 10000, 51),
        ];
        let suggestions = pricing_suggestions(&products);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].suggested_price, Price::from_minor(10800));
        assert_eq!(suggestions[1].change_percent, -5);
        assert_eq!(suggestions[1].suggested_price, Price::from_minor(9500));
    }
}
