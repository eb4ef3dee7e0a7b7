use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hard cap on the product image gallery.
pub const MAX_PRODUCT_IMAGES: usize = 4;

/// The catalog's category vocabulary, in storefront display order.
pub const CATEGORIES: [&str; 4] = [
    "Pantry Essentials",
    "Dietetic & Bio",
    "Gluten-Free",
    "Vegan Options",
];

/// A sellable product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    /// Strike-through price shown next to `price` during promotions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Free-text presentation line ("750ml • Acidez <0.5%").
    pub weight: String,
    pub description: String,
    /// Ordered gallery, first entry is the cover. At most
    /// [`MAX_PRODUCT_IMAGES`] entries.
    pub images: Vec<String>,
    /// Optional promotional label ("NUEVO").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub stock: u32,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Availability derived from the current stock level, never stored.
    pub fn status(&self, low_stock_threshold: u32) -> ProductStatus {
        if self.stock > low_stock_threshold {
            ProductStatus::InStock
        } else {
            ProductStatus::LowStock
        }
    }

    /// The cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Availability bucket shown in the admin inventory table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum ProductStatus {
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
}
