//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use msme_core::{CustomerGroup, CustomerId, Email, Price};

/// A customer with running order aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    /// Incremented once per order created for this customer.
    pub total_orders: u32,
    /// Accumulated order totals.
    pub total_spent: Price,
    /// Assigned manually; never recomputed from the totals.
    pub group: CustomerGroup,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Customer {
    /// Record an order against this customer's running aggregates.
    pub fn record_order(&mut self, total: Price) {
        self.total_orders = self.total_orders.saturating_add(1);
        self.total_spent += total;
    }
}

/// Fields for creating a customer. Aggregates start at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub group: CustomerGroup,
}

impl NewCustomer {
    /// Form-level checks.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("customer name cannot be empty".to_string());
        }
        Ok(())
    }

    pub(crate) fn into_customer(self, id: CustomerId, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            total_orders: 0,
            total_spent: Price::ZERO,
            group: self.group,
            created_at,
            version: 1,
        }
    }
}

/// Partial customer update. Aggregates are owned by order creation and
/// cannot be patched directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub group: Option<CustomerGroup>,
}

impl CustomerPatch {
    /// Shallow-merge the set fields into `customer`.
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(group) = self.group {
            customer.group = group;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_order_accumulates() {
        let mut customer = NewCustomer {
            name: "Dana".to_string(),
            email: Email::parse("dana@example.com").unwrap(),
            phone: String::new(),
            group: CustomerGroup::New,
        }
        .into_customer(CustomerId::new("CUST-004"), Utc::now());

        customer.record_order(Price::from_minor(50000));
        customer.record_order(Price::from_minor(30000));

        assert_eq!(customer.total_orders, 2);
        assert_eq!(customer.total_spent, Price::from_minor(80000));
        assert_eq!(customer.group, CustomerGroup::New);
    }

    #[test]
    fn test_patch_does_not_touch_group_unless_set() {
        let mut customer = NewCustomer {
            name: "Eve".to_string(),
            email: Email::parse("eve@example.com").unwrap(),
            phone: "+1-555-0199".to_string(),
            group: CustomerGroup::Vip,
        }
        .into_customer(CustomerId::new("CUST-005"), Utc::now());

        CustomerPatch {
            phone: Some("+1-555-0100".to_string()),
            ..Default::default()
        }
        .apply(&mut customer);

        assert_eq!(customer.phone, "+1-555-0100");
        assert_eq!(customer.group, CustomerGroup::Vip);
    }
}
