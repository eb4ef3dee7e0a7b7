use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fulfillment state of a recorded sale. Wire labels stay in Spanish, as the
/// storefront displays them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum SaleStatus {
    #[serde(rename = "Pendiente")]
    #[strum(serialize = "Pendiente")]
    Pending,
    #[serde(rename = "Enviado")]
    #[strum(serialize = "Enviado")]
    Shipped,
    #[serde(rename = "Entregado")]
    #[strum(serialize = "Entregado")]
    Delivered,
    #[serde(rename = "Cancelado")]
    #[strum(serialize = "Cancelado")]
    Cancelled,
}

/// How the customer receives the order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum DeliveryOption {
    /// Home delivery, charged the configured flat fee.
    #[serde(rename = "Envío")]
    #[strum(serialize = "Envío")]
    Delivery,
    /// Pickup at the store, free.
    #[serde(rename = "Retiro")]
    #[strum(serialize = "Retiro")]
    Pickup,
}

/// How the customer pays.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum PaymentOption {
    #[serde(rename = "Mercado Pago")]
    #[strum(serialize = "Mercado Pago")]
    MercadoPago,
    /// Bank transfer, rewarded with the configured subtotal discount.
    #[serde(rename = "Transferencia")]
    #[strum(serialize = "Transferencia")]
    BankTransfer,
    #[serde(rename = "Efectivo")]
    #[strum(serialize = "Efectivo")]
    Cash,
}

/// One line of a recorded sale. Carries the product name as a label only;
/// deleting the product later leaves this untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// A recorded order in the sales ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    /// Human-readable order reference ("ORD-…").
    pub reference: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub placed_at: DateTime<Utc>,
    /// Stored as-is; not recomputed from `items`. Keeping the two consistent
    /// is the writer's responsibility.
    pub total: Decimal,
    pub items: Vec<SaleItem>,
    pub payment: PaymentOption,
    pub delivery: DeliveryOption,
    pub status: SaleStatus,
}

impl Sale {
    /// Derives the human-readable reference from an order id.
    pub fn reference_for(id: &Uuid) -> String {
        format!("ORD-{}", id.to_string()[..8].to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_to_spanish_labels() {
        assert_eq!(
            serde_json::to_string(&SaleStatus::Pending).expect("serialize"),
            "\"Pendiente\""
        );
        assert_eq!(SaleStatus::Cancelled.to_string(), "Cancelado");
        assert_eq!(DeliveryOption::Delivery.to_string(), "Envío");
        assert_eq!(PaymentOption::BankTransfer.to_string(), "Transferencia");
    }

    #[test]
    fn status_parses_back_from_its_label() {
        let parsed: SaleStatus = "Enviado".parse().expect("parse");
        assert_eq!(parsed, SaleStatus::Shipped);
    }

    #[test]
    fn reference_uses_the_first_id_segment_uppercased() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().expect("uuid");
        assert_eq!(Sale::reference_for(&id), "ORD-550E8400");
    }
}
