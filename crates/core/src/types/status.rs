//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Stock below this many units is shown as "low".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The lowercase wire name of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the order counts toward revenue.
    #[must_use]
    pub const fn counts_as_revenue(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Customer segment. Assigned by hand; never derived from spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerGroup {
    Vip,
    Regular,
    #[default]
    New,
}

impl std::fmt::Display for CustomerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vip => write!(f, "vip"),
            Self::Regular => write!(f, "regular"),
            Self::New => write!(f, "new"),
        }
    }
}

impl std::str::FromStr for CustomerGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vip" => Ok(Self::Vip),
            "regular" => Ok(Self::Regular),
            "new" => Ok(Self::New),
            _ => Err(format!("invalid customer group: {s}")),
        }
    }
}

/// Dashboard user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including settings.
    Admin,
    /// Day-to-day shop operations.
    #[default]
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Presentation classification of a stock count. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    Low,
    OutOfStock,
}

impl StockLevel {
    /// Classify a stock count.
    ///
    /// ```rust
    /// use msme_core::StockLevel;
    ///
    /// assert_eq!(StockLevel::from_stock(0), StockLevel::OutOfStock);
    /// assert_eq!(StockLevel::from_stock(9), StockLevel::Low);
    /// assert_eq!(StockLevel::from_stock(10), StockLevel::InStock);
    /// ```
    #[must_use]
    pub const fn from_stock(stock: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock < LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }

    /// Whether this level should raise a low-stock alert (includes out of stock).
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        !matches!(self, Self::InStock)
    }
}

/// Mobile money provider of a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Mpesa,
    AirtelMoney,
}

impl std::str::FromStr for PaymentMethodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mpesa" => Ok(Self::Mpesa),
            "airtel_money" => Ok(Self::AirtelMoney),
            _ => Err(format!("invalid payment method type: {s}")),
        }
    }
}

/// Connection state of a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodStatus {
    Active,
    Inactive,
    Pending,
}

/// Outcome of a microloan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip_names() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }

    #[test]
    fn test_cancelled_excluded_from_revenue() {
        assert!(!OrderStatus::Cancelled.counts_as_revenue());
        assert!(OrderStatus::Delivered.counts_as_revenue());
    }

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::from_stock(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::from_stock(1), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(LOW_STOCK_THRESHOLD), StockLevel::InStock);
        assert!(StockLevel::OutOfStock.needs_attention());
        assert!(!StockLevel::InStock.needs_attention());
    }

    #[test]
    fn test_payment_method_type_serde() {
        let json = serde_json::to_string(&PaymentMethodType::AirtelMoney).unwrap();
        assert_eq!(json, "\"airtel_money\"");
        assert_eq!(
            "mpesa".parse::<PaymentMethodType>().unwrap(),
            PaymentMethodType::Mpesa
        );
    }

    #[test]
    fn test_customer_group_parse() {
        assert_eq!("vip".parse::<CustomerGroup>().unwrap(), CustomerGroup::Vip);
        assert!("gold".parse::<CustomerGroup>().is_err());
    }
}
