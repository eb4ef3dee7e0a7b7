use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-configured payment option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodConfig {
    pub id: Uuid,
    pub name: String,
    /// Icon tag rendered by the UI ("credit_card", "account_balance", …).
    pub icon: String,
    pub enabled: bool,
    /// Customer-facing notes ("CBU: …", "Pago al momento de la entrega").
    pub instructions: String,
}
