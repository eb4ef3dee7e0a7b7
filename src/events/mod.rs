use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Handle used by services to publish domain events.
///
/// Wraps an `mpsc` channel; the receiving end is owned by whoever embeds the
/// engine (a UI shell, a test harness, a log sink). Dropping the receiver is
/// tolerated: `send_or_log` downgrades delivery failures to a warning so
/// state mutations never fail because nobody is listening.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender over an existing channel handle.
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Creates a sender together with its receiving end.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }

    /// Sends an event, failing if the channel is closed or full.
    pub async fn send(&self, event: Event) -> Result<(), ServiceError> {
        self.sender
            .send(event)
            .await
            .map_err(|e| ServiceError::EventError(format!("Failed to send event: {}", e)))
    }

    /// Sends an event, logging instead of failing when delivery is impossible.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping event: {}", e);
        }
    }
}

/// The events emitted by the engine's state mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Catalog events
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),

    // Cart events
    CartItemAdded {
        product_id: Uuid,
        quantity: u32,
    },
    CartItemRemoved(Uuid),
    CartQuantityChanged {
        product_id: Uuid,
        quantity: u32,
    },
    CartCleared,

    // Checkout / ledger events
    OrderPlaced(Uuid),
    SaleStatusChanged {
        sale_id: Uuid,
        old_status: String,
        new_status: String,
    },

    // Store configuration events
    ShippingMethodAdded(Uuid),
    ShippingMethodRemoved(Uuid),
    ShippingMethodToggled {
        id: Uuid,
        enabled: bool,
    },
    PaymentMethodAdded(Uuid),
    PaymentMethodRemoved(Uuid),
    PaymentMethodToggled {
        id: Uuid,
        enabled: bool,
    },
}
