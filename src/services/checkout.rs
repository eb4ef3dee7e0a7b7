use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    entities::{
        CartItem, DeliveryOption, PaymentOption, Sale, SaleItem, SaleStatus, ShippingMethodConfig,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    notifications::whatsapp,
};

/// Checkout: derives totals from the current cart and turns a confirmed
/// order into a ledger entry plus a WhatsApp hand-off message.
#[derive(Clone)]
pub struct CheckoutService {
    cart: Arc<RwLock<Vec<CartItem>>>,
    sales: Arc<RwLock<Vec<Sale>>>,
    shipping_methods: Arc<RwLock<Vec<ShippingMethodConfig>>>,
    event_sender: Arc<EventSender>,
    config: Arc<AppConfig>,
}

impl CheckoutService {
    pub fn new(
        cart: Arc<RwLock<Vec<CartItem>>>,
        sales: Arc<RwLock<Vec<Sale>>>,
        shipping_methods: Arc<RwLock<Vec<ShippingMethodConfig>>>,
        event_sender: Arc<EventSender>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            cart,
            sales,
            shipping_methods,
            event_sender,
            config,
        }
    }

    /// Quotes the current cart for the storefront's fixed delivery choices:
    /// home delivery costs the configured flat fee, pickup is free.
    pub async fn quote(&self, delivery: DeliveryOption, payment: PaymentOption) -> CheckoutQuote {
        let items = self.cart.read().await;
        self.compute_quote(&items, self.delivery_fee(delivery), payment)
    }

    /// Quotes the current cart against an admin-configured shipping method
    /// instead of the flat storefront fee. Disabled or unknown methods are
    /// rejected.
    pub async fn quote_for_method(
        &self,
        shipping_method_id: Uuid,
        payment: PaymentOption,
    ) -> Result<CheckoutQuote, ServiceError> {
        let method = self
            .shipping_methods
            .read()
            .await
            .iter()
            .find(|m| m.id == shipping_method_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Shipping method", shipping_method_id))?;
        if !method.enabled {
            return Err(ServiceError::InvalidOperation(format!(
                "Shipping method {} is disabled",
                method.name
            )));
        }

        let items = self.cart.read().await;
        Ok(self.compute_quote(&items, method.price, payment))
    }

    /// Confirms the order: validates the customer data, records a pending
    /// sale in the ledger, clears the cart and returns the WhatsApp hand-off.
    ///
    /// Stock is NOT decremented; the shop reconciles inventory when the
    /// conversation actually closes the sale.
    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn confirm_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<ConfirmedOrder, ServiceError> {
        let items = self.cart.read().await.clone();
        if items.is_empty() {
            return Err(ServiceError::InvalidOperation("Cart is empty".to_string()));
        }
        if request.customer_name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "customer name is required".to_string(),
            ));
        }
        let address = request.address.as_deref().map(str::trim).unwrap_or("");
        if request.delivery == DeliveryOption::Delivery && address.is_empty() {
            return Err(ServiceError::ValidationError(
                "delivery address is required".to_string(),
            ));
        }

        let quote = self.compute_quote(&items, self.delivery_fee(request.delivery), request.payment);

        let sale_id = Uuid::new_v4();
        let sale = Sale {
            id: sale_id,
            reference: Sale::reference_for(&sale_id),
            customer_name: request.customer_name.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            placed_at: Utc::now(),
            total: quote.total,
            items: items
                .iter()
                .map(|item| SaleItem {
                    product_name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            payment: request.payment,
            delivery: request.delivery,
            status: SaleStatus::Pending,
        };

        let message = whatsapp::order_message(
            &self.config.store_name,
            &sale,
            if address.is_empty() { None } else { Some(address) },
        );
        let whatsapp_url = whatsapp::deep_link(&self.config.whatsapp_number, &message)?;

        self.sales.write().await.push(sale.clone());
        self.cart.write().await.clear();

        self.event_sender.send_or_log(Event::OrderPlaced(sale_id)).await;
        self.event_sender.send_or_log(Event::CartCleared).await;

        info!("Order {} confirmed for {}", sale.reference, sale.customer_name);
        Ok(ConfirmedOrder {
            sale,
            message,
            whatsapp_url,
        })
    }

    fn delivery_fee(&self, delivery: DeliveryOption) -> Decimal {
        match delivery {
            DeliveryOption::Delivery => self.config.delivery_fee,
            DeliveryOption::Pickup => Decimal::ZERO,
        }
    }

    fn compute_quote(
        &self,
        items: &[CartItem],
        shipping_cost: Decimal,
        payment: PaymentOption,
    ) -> CheckoutQuote {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let discount = if payment == PaymentOption::BankTransfer {
            subtotal * self.config.transfer_discount_rate
        } else {
            Decimal::ZERO
        };
        let total = subtotal + shipping_cost - discount;

        CheckoutQuote {
            subtotal,
            shipping_cost,
            discount,
            total,
        }
    }
}

/// Derived checkout totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutQuote {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Customer data collected by the checkout form.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub delivery: DeliveryOption,
    /// Required when `delivery` is [`DeliveryOption::Delivery`].
    #[serde(default)]
    pub address: Option<String>,
    pub payment: PaymentOption,
}

/// Result of a confirmed checkout: the recorded sale plus the hand-off
/// message and deep link. Opening the link is the embedder's job; nothing is
/// awaited or parsed.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedOrder {
    pub sale: Sale,
    pub message: String,
    pub whatsapp_url: String,
}
