use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// A line in the visitor's cart: a snapshot of the product at add time plus
/// a quantity. The cart holds at most one entry per product id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub category: String,
    pub weight: String,
    pub unit_price: Decimal,
    /// Cover image carried along for display.
    pub image: Option<String>,
    /// Always at least 1; removing a line is an explicit operation.
    pub quantity: u32,
}

impl CartItem {
    /// Snapshots a product into a fresh line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            weight: product.weight.clone(),
            unit_price: product.price,
            image: product.cover_image().map(str::to_string),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem {
            product_id: Uuid::new_v4(),
            name: "Granola Artesanal".to_string(),
            category: "Pantry Essentials".to_string(),
            weight: "400g".to_string(),
            unit_price: dec!(12500),
            image: None,
            quantity: 3,
        };
        assert_eq!(item.line_total(), dec!(37500));
    }
}
