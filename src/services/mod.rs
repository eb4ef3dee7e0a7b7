pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod reports;
pub mod sales;
pub mod settings;

pub use cart::CartService;
pub use catalog::{
    CatalogQuery, CatalogService, CategoryCount, CreateProductInput, SortOrder, UpdateProductInput,
};
pub use checkout::{CheckoutQuote, CheckoutRequest, CheckoutService, ConfirmedOrder};
pub use reports::{ExportKind, ReportService};
pub use sales::{DashboardStats, SalesService};
pub use settings::{NewPaymentMethod, NewShippingMethod, SettingsService};
