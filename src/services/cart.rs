use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{CartItem, Product},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// The visitor's cart: one entry per product, insertion order preserved.
#[derive(Clone)]
pub struct CartService {
    catalog: Arc<RwLock<Vec<Product>>>,
    cart: Arc<RwLock<Vec<CartItem>>>,
    event_sender: Arc<EventSender>,
}

impl CartService {
    pub fn new(
        catalog: Arc<RwLock<Vec<Product>>>,
        cart: Arc<RwLock<Vec<CartItem>>>,
        event_sender: Arc<EventSender>,
    ) -> Self {
        Self {
            catalog,
            cart,
            event_sender,
        }
    }

    /// Adds one unit of a product. A repeat add bumps the existing line's
    /// quantity instead of inserting a second entry.
    #[instrument(skip(self))]
    pub async fn add_item(&self, product_id: Uuid) -> Result<CartItem, ServiceError> {
        let product = self
            .catalog
            .read()
            .await
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Product", product_id))?;

        let mut cart = self.cart.write().await;
        let item = match cart.iter_mut().find(|i| i.product_id == product_id) {
            Some(existing) => {
                existing.quantity += 1;
                existing.clone()
            }
            None => {
                cart.push(CartItem::from_product(&product));
                // Just pushed, the cart cannot be empty here.
                cart.last().cloned().ok_or_else(|| {
                    ServiceError::InvalidOperation("cart insert failed".to_string())
                })?
            }
        };
        drop(cart);

        self.event_sender
            .send_or_log(Event::CartItemAdded {
                product_id,
                quantity: item.quantity,
            })
            .await;

        info!("Added to cart: {} x{}", product_id, item.quantity);
        Ok(item)
    }

    /// Removes a line entirely. No-op if the product is not in the cart.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let mut cart = self.cart.write().await;
        let before = cart.len();
        cart.retain(|i| i.product_id != product_id);
        let removed = cart.len() < before;
        drop(cart);

        if removed {
            self.event_sender
                .send_or_log(Event::CartItemRemoved(product_id))
                .await;
        }
        Ok(())
    }

    /// Adjusts a line's quantity by `delta`, clamping at 1; lines leave the
    /// cart only via [`remove_item`](Self::remove_item). No-op if the product
    /// is not in the cart.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, product_id: Uuid, delta: i64) -> Result<(), ServiceError> {
        let mut cart = self.cart.write().await;
        let updated = cart.iter_mut().find(|i| i.product_id == product_id).map(|item| {
            item.quantity = (i64::from(item.quantity) + delta).max(1) as u32;
            item.quantity
        });
        drop(cart);

        if let Some(quantity) = updated {
            self.event_sender
                .send_or_log(Event::CartQuantityChanged {
                    product_id,
                    quantity,
                })
                .await;
        }
        Ok(())
    }

    /// Current cart lines, in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        self.cart.read().await.clone()
    }

    /// Total units across all lines; 0 for an empty cart.
    pub async fn count(&self) -> u32 {
        self.cart.read().await.iter().map(|i| i.quantity).sum()
    }

    /// Empties the cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        let mut cart = self.cart.write().await;
        let was_empty = cart.is_empty();
        cart.clear();
        drop(cart);

        if !was_empty {
            self.event_sender.send_or_log(Event::CartCleared).await;
        }
    }
}
