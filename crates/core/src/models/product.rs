//! Product records.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// The upstream catalog's fixed category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "electronics")]
    Electronics,
    #[serde(rename = "jewelery")]
    Jewelery,
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
}

impl Category {
    /// All categories, in the order the UI offers them.
    pub const ALL: [Self; 4] = [
        Self::Electronics,
        Self::Jewelery,
        Self::MensClothing,
        Self::WomensClothing,
    ];

    /// The wire value, which doubles as the form option value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Jewelery => "jewelery",
            Self::MensClothing => "men's clothing",
            Self::WomensClothing => "women's clothing",
        }
    }

    /// Human-readable label for select options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Jewelery => "Jewelery",
            Self::MensClothing => "Men's Clothing",
            Self::WomensClothing => "Women's Clothing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category from its wire value.
#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A product record as returned by the upstream catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: Category,
}

/// A product draft for create calls (no identifier yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewProduct {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: Category,
}

impl NewProduct {
    /// Attach an identifier, turning the draft into a full record for a
    /// replace call.
    #[must_use]
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            image: self.image,
            category: self.category,
        }
    }
}

impl From<Product> for NewProduct {
    fn from(product: Product) -> Self {
        Self {
            title: product.title,
            price: product.price,
            description: product.description,
            image: product.image,
            category: product.category,
        }
    }
}
