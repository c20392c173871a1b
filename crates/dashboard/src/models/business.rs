//! Business-type catalog offered after sign-up.

use serde::Serialize;

/// A kind of business the dashboard can be tailored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub categories: &'static [&'static str],
}

/// Every supported business type.
pub const BUSINESS_TYPES: [BusinessType; 6] = [
    BusinessType {
        id: "animal-feeds",
        name: "Animal Feeds",
        description: "Livestock and pet nutrition products",
        icon: "🐄",
        categories: &[
            "Cattle Feed",
            "Poultry Feed",
            "Pet Food",
            "Fish Feed",
            "Supplements",
            "Minerals",
        ],
    },
    BusinessType {
        id: "retail",
        name: "Retail Store",
        description: "General merchandise and consumer goods",
        icon: "🏪",
        categories: &[
            "Electronics",
            "Clothing",
            "Home & Garden",
            "Sports",
            "Toys",
            "Books",
        ],
    },
    BusinessType {
        id: "restaurant",
        name: "Restaurant",
        description: "Food service and catering",
        icon: "🍽️",
        categories: &[
            "Appetizers",
            "Main Course",
            "Desserts",
            "Beverages",
            "Specials",
        ],
    },
    BusinessType {
        id: "pharmacy",
        name: "Pharmacy",
        description: "Medical supplies and pharmaceuticals",
        icon: "💊",
        categories: &[
            "Prescription",
            "OTC Medicine",
            "Vitamins",
            "First Aid",
            "Personal Care",
        ],
    },
    BusinessType {
        id: "hardware",
        name: "Hardware Store",
        description: "Construction and home improvement",
        icon: "🔨",
        categories: &[
            "Tools",
            "Building Materials",
            "Plumbing",
            "Electrical",
            "Paint",
            "Hardware",
        ],
    },
    BusinessType {
        id: "grocery",
        name: "Grocery Store",
        description: "Food and household essentials",
        icon: "🛒",
        categories: &[
            "Fresh Produce",
            "Dairy",
            "Meat",
            "Bakery",
            "Beverages",
            "Household",
        ],
    },
];

impl BusinessType {
    /// Look up a business type by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        BUSINESS_TYPES.iter().find(|bt| bt.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(BusinessType::find("pharmacy").map(|bt| bt.name), Some("Pharmacy"));
        assert!(BusinessType::find("bakery").is_none());
    }

    #[test]
    fn test_ids_unique() {
        for (i, a) in BUSINESS_TYPES.iter().enumerate() {
            for b in BUSINESS_TYPES.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
