use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    entities::{Product, Sale},
};

const CSV_DELIMITER: char = ',';
const EXPORT_PREFIX: &str = "despensa";

const CATALOG_HEADERS: [&str; 7] = ["ID", "Nombre", "SKU", "Categoria", "Precio", "Stock", "Estado"];
const SALES_HEADERS: [&str; 7] = [
    "Orden ID",
    "Cliente",
    "Fecha",
    "Total",
    "Metodo Pago",
    "Metodo Envio",
    "Estado",
];

/// CSV exports of the catalog and the sales ledger.
///
/// Payloads are plain strings; writing them to disk or streaming them to a
/// download is the embedder's concern. Fields carrying the delimiter, quotes
/// or newlines are quoted so free-text product names cannot corrupt a row.
#[derive(Clone)]
pub struct ReportService {
    catalog: Arc<RwLock<Vec<Product>>>,
    sales: Arc<RwLock<Vec<Sale>>>,
    config: Arc<AppConfig>,
}

/// Which data set an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Inventory,
    Sales,
}

impl ExportKind {
    fn label(self) -> &'static str {
        match self {
            ExportKind::Inventory => "inventario",
            ExportKind::Sales => "ventas",
        }
    }
}

impl ReportService {
    pub fn new(
        catalog: Arc<RwLock<Vec<Product>>>,
        sales: Arc<RwLock<Vec<Sale>>>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            catalog,
            sales,
            config,
        }
    }

    /// One header row plus one row per product, in catalog order.
    pub async fn catalog_csv(&self) -> String {
        let catalog = self.catalog.read().await;
        let mut lines = Vec::with_capacity(catalog.len() + 1);
        lines.push(join_row(&CATALOG_HEADERS.map(String::from)));
        for product in catalog.iter() {
            lines.push(join_row(&[
                product.id.to_string(),
                product.name.clone(),
                product.sku.clone(),
                product.category.clone(),
                product.price.to_string(),
                product.stock.to_string(),
                product.status(self.config.low_stock_threshold).to_string(),
            ]));
        }
        lines.join("\n")
    }

    /// One header row plus one row per sale, in ledger order.
    pub async fn sales_csv(&self) -> String {
        let sales = self.sales.read().await;
        let mut lines = Vec::with_capacity(sales.len() + 1);
        lines.push(join_row(&SALES_HEADERS.map(String::from)));
        for sale in sales.iter() {
            lines.push(join_row(&[
                sale.reference.clone(),
                sale.customer_name.clone(),
                sale.placed_at.to_rfc3339(),
                sale.total.to_string(),
                sale.payment.to_string(),
                sale.delivery.to_string(),
                sale.status.to_string(),
            ]));
        }
        lines.join("\n")
    }

    /// Download filename: `<domain>_despensa_<YYYY-MM-DD>.csv`.
    pub fn export_filename(kind: ExportKind, date: NaiveDate) -> String {
        format!(
            "{}_{}_{}.csv",
            kind.label(),
            EXPORT_PREFIX,
            date.format("%Y-%m-%d")
        )
    }
}

fn join_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f, CSV_DELIMITER))
        .collect::<Vec<_>>()
        .join(&CSV_DELIMITER.to_string())
}

fn escape_field(value: &str, delimiter: char) -> String {
    if value.contains(delimiter) || value.contains('"') || value.contains('\n') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape_field("Granola", ','), "Granola");
    }

    #[test]
    fn delimiter_triggers_quoting() {
        assert_eq!(
            escape_field("Mix de Frutos Secos, 500g", ','),
            "\"Mix de Frutos Secos, 500g\""
        );
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_field("Miel \"pura\"", ','), "\"Miel \"\"pura\"\"\"");
    }

    #[test]
    fn filename_embeds_domain_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 8).expect("valid date");
        assert_eq!(
            ReportService::export_filename(ExportKind::Sales, date),
            "ventas_despensa_2026-08-08.csv"
        );
        assert_eq!(
            ReportService::export_filename(ExportKind::Inventory, date),
            "inventario_despensa_2026-08-08.csv"
        );
    }
}
