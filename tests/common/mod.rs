#![allow(dead_code)]

use despensa::{
    config::AppConfig,
    events::{Event, EventSender},
    AppState,
};
use tokio::sync::mpsc::Receiver;

/// Test harness: an isolated session plus the receiving end of its event
/// channel, so tests can assert on published events without a listener task.
pub struct TestApp {
    pub state: AppState,
    pub events: Receiver<Event>,
}

impl TestApp {
    /// An empty session with the default configuration.
    pub fn new() -> Self {
        let (sender, events) = EventSender::channel(256);
        Self {
            state: AppState::new(AppConfig::default(), sender),
            events,
        }
    }

    /// A session pre-loaded with the demo catalog, sales and methods.
    pub fn seeded() -> Self {
        let (sender, events) = EventSender::channel(256);
        Self {
            state: AppState::seeded(AppConfig::default(), sender),
            events,
        }
    }
}
