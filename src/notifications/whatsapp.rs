//! WhatsApp order hand-off.
//!
//! Checkout does not talk to any payment or order API; it composes a plain
//! Spanish order summary and a `wa.me` deep link pre-filled with it. The
//! embedder opens the link; nothing is awaited or parsed afterwards.

use rust_decimal::{Decimal, RoundingStrategy};
use url::Url;

use crate::{entities::Sale, errors::ServiceError};

/// Builds the pre-filled order summary sent to the store's WhatsApp.
pub fn order_message(store_name: &str, sale: &Sale, address: Option<&str>) -> String {
    let delivery_line = match address {
        Some(address) => format!("{} (Dirección: {})", sale.delivery, address),
        None => sale.delivery.to_string(),
    };

    let detail = sale
        .items
        .iter()
        .map(|item| {
            let line_total = item.unit_price * Decimal::from(item.quantity);
            format!(
                "- {} ({}x) : {}",
                item.product_name,
                item.quantity,
                format_ars(line_total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "¡Hola {}! Quisiera realizar un pedido:\n\n\
         *Cliente:* {}\n\
         *Teléfono:* {}\n\
         *Entrega:* {}\n\
         *Pago:* {}\n\n\
         *Detalle:*\n{}\n\n\
         *Total:* {}",
        store_name,
        sale.customer_name,
        sale.customer_phone,
        delivery_line,
        sale.payment,
        detail,
        format_ars(sale.total)
    )
}

/// Builds the `https://wa.me/<number>?text=…` deep link with the message
/// percent-encoded into the query.
pub fn deep_link(number: &str, message: &str) -> Result<String, ServiceError> {
    let base = format!("https://wa.me/{}", number);
    let url = Url::parse_with_params(&base, &[("text", message)])
        .map_err(|e| ServiceError::InvalidInput(format!("invalid WhatsApp link: {}", e)))?;
    Ok(url.to_string())
}

/// Formats an amount the way the storefront shows ARS prices: whole pesos,
/// dot as thousands separator ("$ 12.500").
pub fn format_ars(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{}$ {}", sign, grouped)
}
