use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AppConfig,
    entities::{Product, CATEGORIES, MAX_PRODUCT_IMAGES},
    errors::ServiceError,
    events::{Event, EventSender},
    paginate, Page,
};

/// Catalog service: admin CRUD over the product store plus the storefront's
/// filtered/sorted browse view.
///
/// Holds a shared handle to the session's catalog container; every read
/// derives a fresh view, nothing is cached.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<RwLock<Vec<Product>>>,
    event_sender: Arc<EventSender>,
    config: Arc<AppConfig>,
}

impl CatalogService {
    pub fn new(
        catalog: Arc<RwLock<Vec<Product>>>,
        event_sender: Arc<EventSender>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            catalog,
            event_sender,
            config,
        }
    }

    /// Creates a new product.
    ///
    /// Validates name/sku/category presence and price sign, enforces SKU
    /// uniqueness, caps the gallery at [`MAX_PRODUCT_IMAGES`] and substitutes
    /// the configured placeholder when no image is supplied.
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: CreateProductInput) -> Result<Product, ServiceError> {
        input.validate()?;
        validate_pricing(input.price, input.old_price)?;

        let mut catalog = self.catalog.write().await;
        ensure_unique_sku(&catalog, &input.sku, None)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            price: input.price,
            old_price: input.old_price,
            weight: input.weight.unwrap_or_else(|| "Unitario".to_string()),
            description: input
                .description
                .unwrap_or_else(|| "Producto agregado manualmente.".to_string()),
            images: self.normalize_images(input.images),
            tag: input.tag,
            stock: input.stock,
            sku: input.sku,
            created_at: now,
            updated_at: now,
        };
        catalog.push(product.clone());
        drop(catalog);

        self.event_sender
            .send_or_log(Event::ProductCreated(product.id))
            .await;

        info!("Created product: {}", product.id);
        Ok(product)
    }

    /// Updates an existing product. Fields left as `None` keep their value;
    /// the id is preserved and availability is re-derived from the new stock
    /// on the next read.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<Product, ServiceError> {
        input.validate()?;

        let mut catalog = self.catalog.write().await;
        if let Some(ref sku) = input.sku {
            ensure_unique_sku(&catalog, sku, Some(product_id))?;
        }

        let product = catalog
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ServiceError::not_found("Product", product_id))?;

        let new_price = input.price.unwrap_or(product.price);
        let new_old_price = input.old_price.or(product.old_price);
        validate_pricing(new_price, new_old_price)?;

        if let Some(name) = input.name {
            product.name = name;
        }
        if let Some(sku) = input.sku {
            product.sku = sku;
        }
        if let Some(category) = input.category {
            product.category = category;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(old_price) = input.old_price {
            product.old_price = Some(old_price);
        }
        if let Some(weight) = input.weight {
            product.weight = weight;
        }
        if let Some(description) = input.description {
            product.description = description;
        }
        if let Some(stock) = input.stock {
            product.stock = stock;
        }
        if let Some(tag) = input.tag {
            product.tag = Some(tag);
        }
        if let Some(images) = input.images {
            product.images = self.normalize_images(images);
        }
        product.updated_at = Utc::now();
        let updated = product.clone();
        drop(catalog);

        self.event_sender
            .send_or_log(Event::ProductUpdated(product_id))
            .await;

        Ok(updated)
    }

    /// Deletes a product by id.
    ///
    /// Historical sales keep their item labels; nothing is checked or
    /// rewritten on their side.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let mut catalog = self.catalog.write().await;
        let before = catalog.len();
        catalog.retain(|p| p.id != product_id);
        if catalog.len() == before {
            return Err(ServiceError::not_found("Product", product_id));
        }
        drop(catalog);

        self.event_sender
            .send_or_log(Event::ProductDeleted(product_id))
            .await;

        info!("Deleted product: {}", product_id);
        Ok(())
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<Product, ServiceError> {
        self.catalog
            .read()
            .await
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Product", product_id))
    }

    /// The whole catalog in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.catalog.read().await.clone()
    }

    /// Storefront view: category OR-filter, then case-insensitive search over
    /// name and category, then a stable sort. The catalog itself is never
    /// reordered.
    pub async fn browse(&self, query: &CatalogQuery) -> Vec<Product> {
        let catalog = self.catalog.read().await;
        let mut result: Vec<Product> = catalog
            .iter()
            .filter(|p| {
                query.categories.is_empty() || query.categories.iter().any(|c| *c == p.category)
            })
            .filter(|p| match query.search.as_deref() {
                Some(term) if !term.is_empty() => {
                    let term = term.to_lowercase();
                    p.name.to_lowercase().contains(&term)
                        || p.category.to_lowercase().contains(&term)
                }
                _ => true,
            })
            .cloned()
            .collect();

        match query.sort {
            SortOrder::Recommended => {}
            SortOrder::PriceLow => result.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => result.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => {
                result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        result
    }

    /// Product count per known category, for the storefront sidebar.
    pub async fn category_counts(&self) -> Vec<CategoryCount> {
        let catalog = self.catalog.read().await;
        CATEGORIES
            .iter()
            .map(|category| CategoryCount {
                category: (*category).to_string(),
                count: catalog.iter().filter(|p| p.category == *category).count(),
            })
            .collect()
    }

    /// Admin table view: case-insensitive name/SKU search plus pagination.
    /// An out-of-range page clamps to the last non-empty one.
    pub async fn admin_page(&self, search: Option<&str>, page: u64) -> Page<Product> {
        let catalog = self.catalog.read().await;
        let filtered: Vec<Product> = catalog
            .iter()
            .filter(|p| matches_admin_search(p, search))
            .cloned()
            .collect();
        paginate(&filtered, page, self.config.page_size)
    }

    /// Appends an image to a product's gallery.
    #[instrument(skip(self, url))]
    pub async fn add_image(&self, product_id: Uuid, url: &str) -> Result<Product, ServiceError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ServiceError::InvalidInput("image url is empty".to_string()));
        }
        self.mutate_images(product_id, |images| {
            if images.len() >= MAX_PRODUCT_IMAGES {
                return Err(ServiceError::ValidationError(format!(
                    "a product holds at most {} images",
                    MAX_PRODUCT_IMAGES
                )));
            }
            images.push(url.to_string());
            Ok(())
        })
        .await
    }

    /// Removes the image at `index`.
    #[instrument(skip(self))]
    pub async fn remove_image(
        &self,
        product_id: Uuid,
        index: usize,
    ) -> Result<Product, ServiceError> {
        self.mutate_images(product_id, |images| {
            if index >= images.len() {
                return Err(ServiceError::InvalidInput(format!(
                    "image index {} out of range",
                    index
                )));
            }
            images.remove(index);
            Ok(())
        })
        .await
    }

    /// Moves the image at `from` to position `to`, shifting the entries in
    /// between (drag reorder, not a swap).
    #[instrument(skip(self))]
    pub async fn move_image(
        &self,
        product_id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<Product, ServiceError> {
        self.mutate_images(product_id, |images| {
            if from >= images.len() || to >= images.len() {
                return Err(ServiceError::InvalidInput(format!(
                    "image index {} out of range",
                    from.max(to)
                )));
            }
            if from != to {
                let image = images.remove(from);
                images.insert(to, image);
            }
            Ok(())
        })
        .await
    }

    async fn mutate_images<F>(&self, product_id: Uuid, op: F) -> Result<Product, ServiceError>
    where
        F: FnOnce(&mut Vec<String>) -> Result<(), ServiceError>,
    {
        let mut catalog = self.catalog.write().await;
        let product = catalog
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ServiceError::not_found("Product", product_id))?;
        op(&mut product.images)?;
        product.updated_at = Utc::now();
        let updated = product.clone();
        drop(catalog);

        self.event_sender
            .send_or_log(Event::ProductUpdated(product_id))
            .await;
        Ok(updated)
    }

    fn normalize_images(&self, mut images: Vec<String>) -> Vec<String> {
        images.retain(|url| !url.trim().is_empty());
        images.truncate(MAX_PRODUCT_IMAGES);
        if images.is_empty() {
            images.push(self.config.placeholder_image.clone());
        }
        images
    }
}

fn ensure_unique_sku(
    catalog: &[Product],
    sku: &str,
    exclude: Option<Uuid>,
) -> Result<(), ServiceError> {
    let taken = catalog
        .iter()
        .any(|p| p.sku == sku && Some(p.id) != exclude);
    if taken {
        return Err(ServiceError::ValidationError(format!(
            "SKU {} is already in use",
            sku
        )));
    }
    Ok(())
}

fn validate_pricing(price: Decimal, old_price: Option<Decimal>) -> Result<(), ServiceError> {
    if price.is_sign_negative() {
        return Err(ServiceError::ValidationError(
            "price must not be negative".to_string(),
        ));
    }
    if let Some(old_price) = old_price {
        if old_price <= price {
            return Err(ServiceError::ValidationError(
                "old price must be greater than the current price".to_string(),
            ));
        }
    }
    Ok(())
}

fn matches_admin_search(product: &Product, search: Option<&str>) -> bool {
    match search {
        Some(term) if !term.is_empty() => {
            let term = term.to_lowercase();
            product.name.to_lowercase().contains(&term)
                || product.sku.to_lowercase().contains(&term)
        }
        _ => true,
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

/// Input for updating a product; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub sku: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub weight: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub tag: Option<String>,
    pub stock: Option<u32>,
}

/// Storefront browse parameters.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// OR-filter; empty means "everything".
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub sort: SortOrder,
}

/// Storefront sort orders. All sorts are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order, untouched.
    #[default]
    Recommended,
    PriceLow,
    PriceHigh,
    Name,
}

/// A category with its product count, for the storefront sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sort_order_uses_kebab_case_labels() {
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceLow).expect("serialize"),
            "\"price-low\""
        );
        let parsed: SortOrder = serde_json::from_str("\"recommended\"").expect("parse");
        assert_eq!(parsed, SortOrder::Recommended);
    }

    #[test]
    fn pricing_rejects_old_price_not_above_price() {
        assert!(validate_pricing(dec!(100), Some(dec!(100))).is_err());
        assert!(validate_pricing(dec!(100), Some(dec!(90))).is_err());
        assert!(validate_pricing(dec!(100), Some(dec!(150))).is_ok());
        assert!(validate_pricing(dec!(-1), None).is_err());
    }
}
