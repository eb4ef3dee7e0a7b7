use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{PaymentMethodConfig, ShippingMethodConfig},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Store configuration: the shipping and payment methods offered at
/// checkout. Methods toggle independently; nothing stops the admin from
/// disabling every last one.
#[derive(Clone)]
pub struct SettingsService {
    shipping_methods: Arc<RwLock<Vec<ShippingMethodConfig>>>,
    payment_methods: Arc<RwLock<Vec<PaymentMethodConfig>>>,
    event_sender: Arc<EventSender>,
}

impl SettingsService {
    pub fn new(
        shipping_methods: Arc<RwLock<Vec<ShippingMethodConfig>>>,
        payment_methods: Arc<RwLock<Vec<PaymentMethodConfig>>>,
        event_sender: Arc<EventSender>,
    ) -> Self {
        Self {
            shipping_methods,
            payment_methods,
            event_sender,
        }
    }

    // ---- Shipping methods ----

    pub async fn list_shipping_methods(&self) -> Vec<ShippingMethodConfig> {
        self.shipping_methods.read().await.clone()
    }

    pub async fn enabled_shipping_methods(&self) -> Vec<ShippingMethodConfig> {
        self.shipping_methods
            .read()
            .await
            .iter()
            .filter(|m| m.enabled)
            .cloned()
            .collect()
    }

    /// Adds a shipping method, enabled by default.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_shipping_method(
        &self,
        input: NewShippingMethod,
    ) -> Result<ShippingMethodConfig, ServiceError> {
        input.validate()?;
        if input.price.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "shipping price must not be negative".to_string(),
            ));
        }

        let method = ShippingMethodConfig {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            estimated_days: input.estimated_days,
            enabled: true,
        };
        self.shipping_methods.write().await.push(method.clone());

        self.event_sender
            .send_or_log(Event::ShippingMethodAdded(method.id))
            .await;

        info!("Added shipping method: {}", method.name);
        Ok(method)
    }

    /// Flips a shipping method's enabled flag; returns the new state.
    #[instrument(skip(self))]
    pub async fn toggle_shipping_method(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut methods = self.shipping_methods.write().await;
        let method = methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ServiceError::not_found("Shipping method", id))?;
        method.enabled = !method.enabled;
        let enabled = method.enabled;
        drop(methods);

        self.event_sender
            .send_or_log(Event::ShippingMethodToggled { id, enabled })
            .await;
        Ok(enabled)
    }

    #[instrument(skip(self))]
    pub async fn remove_shipping_method(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut methods = self.shipping_methods.write().await;
        let before = methods.len();
        methods.retain(|m| m.id != id);
        if methods.len() == before {
            return Err(ServiceError::not_found("Shipping method", id));
        }
        drop(methods);

        self.event_sender
            .send_or_log(Event::ShippingMethodRemoved(id))
            .await;
        Ok(())
    }

    // ---- Payment methods ----

    pub async fn list_payment_methods(&self) -> Vec<PaymentMethodConfig> {
        self.payment_methods.read().await.clone()
    }

    pub async fn enabled_payment_methods(&self) -> Vec<PaymentMethodConfig> {
        self.payment_methods
            .read()
            .await
            .iter()
            .filter(|m| m.enabled)
            .cloned()
            .collect()
    }

    /// Adds a payment method, enabled by default.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_payment_method(
        &self,
        input: NewPaymentMethod,
    ) -> Result<PaymentMethodConfig, ServiceError> {
        input.validate()?;

        let method = PaymentMethodConfig {
            id: Uuid::new_v4(),
            name: input.name,
            icon: if input.icon.is_empty() {
                "credit_card".to_string()
            } else {
                input.icon
            },
            enabled: true,
            instructions: input.instructions,
        };
        self.payment_methods.write().await.push(method.clone());

        self.event_sender
            .send_or_log(Event::PaymentMethodAdded(method.id))
            .await;

        info!("Added payment method: {}", method.name);
        Ok(method)
    }

    /// Flips a payment method's enabled flag; returns the new state.
    #[instrument(skip(self))]
    pub async fn toggle_payment_method(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut methods = self.payment_methods.write().await;
        let method = methods
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ServiceError::not_found("Payment method", id))?;
        method.enabled = !method.enabled;
        let enabled = method.enabled;
        drop(methods);

        self.event_sender
            .send_or_log(Event::PaymentMethodToggled { id, enabled })
            .await;
        Ok(enabled)
    }

    #[instrument(skip(self))]
    pub async fn remove_payment_method(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut methods = self.payment_methods.write().await;
        let before = methods.len();
        methods.retain(|m| m.id != id);
        if methods.len() == before {
            return Err(ServiceError::not_found("Payment method", id));
        }
        drop(methods);

        self.event_sender
            .send_or_log(Event::PaymentMethodRemoved(id))
            .await;
        Ok(())
    }
}

/// Input for adding a shipping method.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewShippingMethod {
    #[validate(length(min = 1))]
    pub name: String,
    /// Defaults to free when the form leaves it blank.
    #[serde(default)]
    pub price: Decimal,
    #[validate(length(min = 1))]
    pub estimated_days: String,
}

/// Input for adding a payment method.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPaymentMethod {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub instructions: String,
}
