pub mod cart;
pub mod payment_method;
pub mod product;
pub mod sale;
pub mod shipping_method;

pub use cart::CartItem;
pub use payment_method::PaymentMethodConfig;
pub use product::{Product, ProductStatus, CATEGORIES, MAX_PRODUCT_IMAGES};
pub use sale::{DeliveryOption, PaymentOption, Sale, SaleItem, SaleStatus};
pub use shipping_method::ShippingMethodConfig;
