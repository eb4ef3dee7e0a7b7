use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_STORE_NAME: &str = "Despensa & Dietética 1982";
const DEFAULT_WHATSAPP_NUMBER: &str = "5491122334455";
const DEFAULT_CURRENCY: &str = "ARS";
const DEFAULT_DELIVERY_FEE: &str = "500";
const DEFAULT_TRANSFER_DISCOUNT_RATE: &str = "0.05";
const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;
const DEFAULT_PAGE_SIZE: u64 = 10;
const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1542838132-92c53300491e?auto=format&fit=crop&q=80&w=400";
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";

/// Application configuration with validation.
///
/// Values come from built-in defaults, then `config/default.toml` when
/// present, then `DESPENSA__*` environment variables, last one wins.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the store, used in customer-facing messages.
    #[validate(length(min = 1))]
    pub store_name: String,

    /// WhatsApp contact in international format, digits only (no `+`).
    #[validate(custom = "validate_phone_digits")]
    pub whatsapp_number: String,

    /// ISO currency code for prices (informational; amounts are `Decimal`).
    #[validate(length(min = 3, max = 3))]
    pub currency: String,

    /// Flat fee charged when the customer picks home delivery at checkout.
    #[validate(custom = "validate_non_negative")]
    pub delivery_fee: Decimal,

    /// Fraction of the subtotal discounted when paying by bank transfer.
    #[validate(custom = "validate_rate")]
    pub transfer_discount_rate: Decimal,

    /// Stock at or below this threshold reports as low.
    pub low_stock_threshold: u32,

    /// Rows per page in the admin tables.
    #[validate(range(min = 1))]
    pub page_size: u64,

    /// Image substituted when a product is saved without any.
    #[validate(url)]
    pub placeholder_image: String,

    /// Log level used by `init_tracing` when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            delivery_fee: DEFAULT_DELIVERY_FEE.parse().unwrap_or(Decimal::ZERO),
            transfer_discount_rate: DEFAULT_TRANSFER_DISCOUNT_RATE
                .parse()
                .unwrap_or(Decimal::ZERO),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            page_size: DEFAULT_PAGE_SIZE,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Loads the configuration from defaults, the optional config file and the
/// environment, then validates it.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let cfg: AppConfig = Config::builder()
        .set_default("store_name", DEFAULT_STORE_NAME)?
        .set_default("whatsapp_number", DEFAULT_WHATSAPP_NUMBER)?
        .set_default("currency", DEFAULT_CURRENCY)?
        .set_default("delivery_fee", DEFAULT_DELIVERY_FEE)?
        .set_default("transfer_discount_rate", DEFAULT_TRANSFER_DISCOUNT_RATE)?
        .set_default("low_stock_threshold", DEFAULT_LOW_STOCK_THRESHOLD as i64)?
        .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
        .set_default("placeholder_image", DEFAULT_PLACEHOLDER_IMAGE)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(Environment::with_prefix("DESPENSA").separator("__"))
        .build()?
        .try_deserialize()?;

    cfg.validate()?;
    Ok(cfg)
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("despensa={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive))
        .with(fmt::layer())
        .init();
}

fn validate_phone_digits(number: &str) -> Result<(), ValidationError> {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("whatsapp_number_digits"));
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

fn validate_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if rate.is_sign_negative() || *rate >= Decimal::ONE {
        return Err(ValidationError::new("rate_out_of_range"));
    }
    Ok(())
}
