//! Despensa storefront engine
//!
//! In-memory storefront and back-office core for a small dietetics shop:
//! catalog browsing, a visitor cart, checkout with a WhatsApp hand-off, a
//! sales ledger and the shipping/payment configuration behind it.
//!
//! All state lives inside an [`AppState`] session: five explicit containers
//! (catalog, cart, sales, shipping methods, payment methods) shared by
//! handle with the services that operate on them. Nothing is persisted and
//! there is no network surface; the only outward boundary is the composed
//! WhatsApp deep link, which the embedder opens.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod entities;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod seed;
pub mod services;

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use entities::{CartItem, PaymentMethodConfig, Product, Sale, ShippingMethodConfig};
use services::{
    CartService, CatalogService, CheckoutService, ReportService, SalesService, SettingsService,
};

/// The session's state containers plus the handles services need.
///
/// Owns every store; services receive `Arc` handles, so two services built
/// from the same state observe each other's writes. Tests construct isolated
/// instances freely — there is no ambient global.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::AppConfig>,
    pub event_sender: events::EventSender,
    pub catalog: Arc<RwLock<Vec<Product>>>,
    pub cart: Arc<RwLock<Vec<CartItem>>>,
    pub sales: Arc<RwLock<Vec<Sale>>>,
    pub shipping_methods: Arc<RwLock<Vec<ShippingMethodConfig>>>,
    pub payment_methods: Arc<RwLock<Vec<PaymentMethodConfig>>>,
}

impl AppState {
    /// An empty session.
    pub fn new(config: config::AppConfig, event_sender: events::EventSender) -> Self {
        Self {
            config: Arc::new(config),
            event_sender,
            catalog: Arc::new(RwLock::new(Vec::new())),
            cart: Arc::new(RwLock::new(Vec::new())),
            sales: Arc::new(RwLock::new(Vec::new())),
            shipping_methods: Arc::new(RwLock::new(Vec::new())),
            payment_methods: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A session pre-loaded with the demo catalog, sales history and default
    /// shipping/payment methods.
    pub fn seeded(config: config::AppConfig, event_sender: events::EventSender) -> Self {
        Self {
            config: Arc::new(config),
            event_sender,
            catalog: Arc::new(RwLock::new(seed::demo_products())),
            cart: Arc::new(RwLock::new(Vec::new())),
            sales: Arc::new(RwLock::new(seed::demo_sales())),
            shipping_methods: Arc::new(RwLock::new(seed::demo_shipping_methods())),
            payment_methods: Arc::new(RwLock::new(seed::demo_payment_methods())),
        }
    }

    pub fn catalog_service(&self) -> CatalogService {
        CatalogService::new(
            self.catalog.clone(),
            Arc::new(self.event_sender.clone()),
            self.config.clone(),
        )
    }

    pub fn cart_service(&self) -> CartService {
        CartService::new(
            self.catalog.clone(),
            self.cart.clone(),
            Arc::new(self.event_sender.clone()),
        )
    }

    pub fn checkout_service(&self) -> CheckoutService {
        CheckoutService::new(
            self.cart.clone(),
            self.sales.clone(),
            self.shipping_methods.clone(),
            Arc::new(self.event_sender.clone()),
            self.config.clone(),
        )
    }

    pub fn sales_service(&self) -> SalesService {
        SalesService::new(
            self.sales.clone(),
            self.catalog.clone(),
            Arc::new(self.event_sender.clone()),
            self.config.clone(),
        )
    }

    pub fn settings_service(&self) -> SettingsService {
        SettingsService::new(
            self.shipping_methods.clone(),
            self.payment_methods.clone(),
            Arc::new(self.event_sender.clone()),
        )
    }

    pub fn report_service(&self) -> ReportService {
        ReportService::new(self.catalog.clone(), self.sales.clone(), self.config.clone())
    }
}

/// One page of an admin table view.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows matching the filter, across all pages.
    pub total: u64,
    /// The 1-indexed page actually served (out-of-range requests clamp).
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page.max(1))
        }
    }
}

/// Slices `rows` into a 1-indexed page. A page past the end clamps to the
/// last non-empty page, so a view does not go blank when rows disappear
/// under it.
pub(crate) fn paginate<T: Clone>(rows: &[T], page: u64, per_page: u64) -> Page<T> {
    let per_page = per_page.max(1);
    let total = rows.len() as u64;
    let total_pages = if total == 0 { 0 } else { total.div_ceil(per_page) };
    let page = if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages)
    };

    let start = ((page - 1) * per_page) as usize;
    let items = rows
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect();

    Page {
        items,
        total,
        page,
        per_page,
    }
}
