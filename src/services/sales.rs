use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    entities::{Product, Sale, SaleStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    paginate, Page,
};

/// Sales ledger: order history, fulfillment status tracking and the
/// dashboard aggregates.
#[derive(Clone)]
pub struct SalesService {
    sales: Arc<RwLock<Vec<Sale>>>,
    catalog: Arc<RwLock<Vec<Product>>>,
    event_sender: Arc<EventSender>,
    config: Arc<AppConfig>,
}

impl SalesService {
    pub fn new(
        sales: Arc<RwLock<Vec<Sale>>>,
        catalog: Arc<RwLock<Vec<Product>>>,
        event_sender: Arc<EventSender>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            sales,
            catalog,
            event_sender,
            config,
        }
    }

    pub async fn list(&self) -> Vec<Sale> {
        self.sales.read().await.clone()
    }

    pub async fn get(&self, sale_id: Uuid) -> Result<Sale, ServiceError> {
        self.sales
            .read()
            .await
            .iter()
            .find(|s| s.id == sale_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Sale", sale_id))
    }

    /// Sets a sale's status. Any status may be assigned over any other; the
    /// ledger keeps no transition rules.
    #[instrument(skip(self), fields(sale_id = %sale_id, new_status = %status))]
    pub async fn set_status(
        &self,
        sale_id: Uuid,
        status: SaleStatus,
    ) -> Result<Sale, ServiceError> {
        let mut sales = self.sales.write().await;
        let sale = sales
            .iter_mut()
            .find(|s| s.id == sale_id)
            .ok_or_else(|| ServiceError::not_found("Sale", sale_id))?;

        let old_status = sale.status;
        sale.status = status;
        let updated = sale.clone();
        drop(sales);

        self.event_sender
            .send_or_log(Event::SaleStatusChanged {
                sale_id,
                old_status: old_status.to_string(),
                new_status: status.to_string(),
            })
            .await;

        info!("Sale {}: {} -> {}", updated.reference, old_status, status);
        Ok(updated)
    }

    /// Appends a sale to the ledger as-is. The stored `total` is trusted,
    /// not recomputed from the items.
    pub async fn record_sale(&self, sale: Sale) {
        self.sales.write().await.push(sale);
    }

    /// Admin table view: case-insensitive search over customer name and
    /// order reference, plus pagination.
    pub async fn admin_page(&self, search: Option<&str>, page: u64) -> Page<Sale> {
        let sales = self.sales.read().await;
        let filtered: Vec<Sale> = sales
            .iter()
            .filter(|s| match search {
                Some(term) if !term.is_empty() => {
                    let term = term.to_lowercase();
                    s.customer_name.to_lowercase().contains(&term)
                        || s.reference.to_lowercase().contains(&term)
                }
                _ => true,
            })
            .cloned()
            .collect();
        paginate(&filtered, page, self.config.page_size)
    }

    /// The most recent sales, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<Sale> {
        let mut sales = self.sales.read().await.clone();
        sales.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        sales.truncate(limit);
        sales
    }

    /// Dashboard aggregates over the catalog and the ledger.
    ///
    /// Revenue excludes cancelled sales and sums the stored totals, which
    /// are not reconciled against the item snapshots.
    pub async fn stats(&self) -> DashboardStats {
        let catalog = self.catalog.read().await;
        let inventory_value: Decimal = catalog
            .iter()
            .map(|p| p.price * Decimal::from(p.stock))
            .sum();
        drop(catalog);

        let sales = self.sales.read().await;
        let total_revenue: Decimal = sales
            .iter()
            .filter(|s| s.status != SaleStatus::Cancelled)
            .map(|s| s.total)
            .sum();
        let pending_count = sales
            .iter()
            .filter(|s| s.status == SaleStatus::Pending)
            .count() as u64;

        DashboardStats {
            inventory_value,
            total_revenue,
            pending_count,
        }
    }
}

/// The three dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// `Σ price × stock` over the whole catalog.
    pub inventory_value: Decimal,
    /// `Σ total` over all sales except cancelled ones.
    pub total_revenue: Decimal,
    /// Number of sales still pending.
    pub pending_count: u64,
}
