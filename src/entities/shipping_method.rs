use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-configured shipping option. Names are not deduplicated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethodConfig {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Free-text delivery window ("3-5 días hábiles").
    pub estimated_days: String,
    pub enabled: bool,
}

impl ShippingMethodConfig {
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}
