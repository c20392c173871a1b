//! Product catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use msme_core::{Price, ProductId, StockLevel, VariantId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Selling unit label, e.g. "50kg bag".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub stock: u32,
    pub category: String,
    /// Image path or emoji code.
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Product {
    /// Presentation stock classification.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Stock value at list price.
    #[must_use]
    pub fn stock_value(&self) -> Price {
        self.price.times(self.stock)
    }
}

/// A priced variant owned by a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    #[serde(default = "VariantId::generate")]
    pub id: VariantId,
    pub name: String,
    pub price: Price,
    pub stock: u32,
}

/// Fields for creating a product. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub unit: Option<String>,
    pub stock: u32,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl NewProduct {
    /// Form-level checks.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product name cannot be empty".to_string());
        }
        if self.price.is_negative() || self.variants.iter().any(|v| v.price.is_negative()) {
            return Err("price cannot be negative".to_string());
        }
        Ok(())
    }

    pub(crate) fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            unit: self.unit,
            stock: self.stock,
            category: self.category,
            image: self.image,
            variants: self.variants,
            created_at,
            version: 1,
        }
    }
}

/// Partial product update. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    /// `Some(Some(unit))` sets, `Some(None)` (JSON `null`) clears, `None` keeps.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[allow(clippy::option_option)]
    pub unit: Option<Option<String>>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub image: Option<String>,
    /// Replaces the whole variant list when set.
    pub variants: Option<Vec<ProductVariant>>,
}

impl ProductPatch {
    /// Form-level checks.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("product name cannot be empty".to_string());
        }
        let negative_variant = self
            .variants
            .iter()
            .flatten()
            .any(|v| v.price.is_negative());
        if self.price.is_some_and(|p| p.is_negative()) || negative_variant {
            return Err("price cannot be negative".to_string());
        }
        Ok(())
    }

    /// Shallow-merge the set fields into `product`.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(variants) = self.variants {
            product.variants = variants;
        }
    }
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn widget() -> Product {
        NewProduct {
            name: "Widget".to_string(),
            description: String::new(),
            price: Price::from_minor(500),
            unit: None,
            stock: 20,
            category: "Tools".to_string(),
            image: String::new(),
            variants: vec![],
        }
        .into_product(ProductId::new("p-1"), Utc::now())
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut product = widget();
        ProductPatch {
            price: Some(Price::from_minor(1000)),
            ..Default::default()
        }
        .apply(&mut product);

        assert_eq!(product.price, Price::from_minor(1000));
        assert_eq!(product.stock, 20);
        assert_eq!(product.name, "Widget");
    }

    #[test]
    fn test_patch_unit_null_clears_and_absent_keeps() {
        let mut product = widget();
        product.unit = Some("50kg bag".to_string());

        let keep: ProductPatch = serde_json::from_str(r#"{"stock": 3}"#).unwrap();
        keep.apply(&mut product);
        assert_eq!(product.unit.as_deref(), Some("50kg bag"));

        let clear: ProductPatch = serde_json::from_str(r#"{"unit": null}"#).unwrap();
        clear.apply(&mut product);
        assert_eq!(product.unit, None);

        let set: ProductPatch = serde_json::from_str(r#"{"unit": "crate"}"#).unwrap();
        set.apply(&mut product);
        assert_eq!(product.unit.as_deref(), Some("crate"));
    }

    #[test]
    fn test_patch_rejects_negative_variant_price() {
        let patch = ProductPatch {
            variants: Some(vec![ProductVariant {
                id: VariantId::generate(),
                name: "1kg".to_string(),
                price: Price::ZERO - Price::from_minor(100),
                stock: 1,
            }]),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_camel_case_layout() {
        let json = serde_json::to_value(widget()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("variants").is_none());
        assert!(json.get("unit").is_none());
    }

    #[test]
    fn test_loads_record_without_version() {
        let json = r#"{
            "id": "1", "name": "Laptop Stand", "description": "Ergonomic aluminum laptop stand",
            "price": 49.99, "stock": 8, "category": "Accessories", "image": "/laptop-stand.png",
            "createdAt": "2024-01-10T00:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.version, 0);
        assert_eq!(product.stock_level(), StockLevel::Low);
    }

    #[test]
    fn test_variant_id_generated_when_missing() {
        let variant: ProductVariant =
            serde_json::from_str(r#"{"name": "1kg", "price": "5.00", "stock": 3}"#).unwrap();
        assert!(!variant.id.as_str().is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut new = NewProduct {
            name: "  ".to_string(),
            description: String::new(),
            price: Price::ZERO,
            unit: None,
            stock: 0,
            category: String::new(),
            image: String::new(),
            variants: vec![],
        };
        assert!(new.validate().is_err());
        new.name = "Feed".to_string();
        assert!(new.validate().is_ok());
    }
}
