mod common;

use common::TestApp;
use despensa::{
    entities::{DeliveryOption, PaymentOption, SaleStatus},
    errors::ServiceError,
    services::{CheckoutRequest, CreateProductInput},
};
use rust_decimal_macros::dec;

async fn app_with_cart() -> TestApp {
    let app = TestApp::new();
    let product = app
        .state
        .catalog_service()
        .create_product(CreateProductInput {
            name: "Granola Artesanal Miel y Nueces".to_string(),
            sku: "GR-001".to_string(),
            category: "Pantry Essentials".to_string(),
            price: dec!(12500),
            old_price: None,
            weight: None,
            description: None,
            images: vec![],
            tag: None,
            stock: 12,
        })
        .await
        .expect("create product");

    let cart = app.state.cart_service();
    cart.add_item(product.id).await.expect("add");
    cart.add_item(product.id).await.expect("add again");
    app
}

#[tokio::test]
async fn quote_matches_the_worked_example() {
    let app = app_with_cart().await;
    let checkout = app.state.checkout_service();

    let quote = checkout
        .quote(DeliveryOption::Delivery, PaymentOption::BankTransfer)
        .await;

    assert_eq!(quote.subtotal, dec!(25000));
    assert_eq!(quote.shipping_cost, dec!(500));
    assert_eq!(quote.discount, dec!(1250));
    assert_eq!(quote.total, dec!(24250));
}

#[tokio::test]
async fn pickup_and_cash_add_nothing_and_discount_nothing() {
    let app = app_with_cart().await;
    let checkout = app.state.checkout_service();

    let quote = checkout
        .quote(DeliveryOption::Pickup, PaymentOption::Cash)
        .await;

    assert_eq!(quote.subtotal, dec!(25000));
    assert_eq!(quote.shipping_cost, dec!(0));
    assert_eq!(quote.discount, dec!(0));
    assert_eq!(quote.total, dec!(25000));
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let app = TestApp::new();
    let err = app
        .state
        .checkout_service()
        .confirm_order(CheckoutRequest {
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1122334455".to_string(),
            delivery: DeliveryOption::Pickup,
            address: None,
            payment: PaymentOption::Cash,
        })
        .await
        .expect_err("empty cart must be rejected");
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
}

#[tokio::test]
async fn customer_name_is_required() {
    let app = app_with_cart().await;
    let err = app
        .state
        .checkout_service()
        .confirm_order(CheckoutRequest {
            customer_name: "   ".to_string(),
            customer_phone: "1122334455".to_string(),
            delivery: DeliveryOption::Pickup,
            address: None,
            payment: PaymentOption::Cash,
        })
        .await
        .expect_err("blank name must be rejected");
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn delivery_requires_an_address() {
    let app = app_with_cart().await;
    let checkout = app.state.checkout_service();

    let err = checkout
        .confirm_order(CheckoutRequest {
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1122334455".to_string(),
            delivery: DeliveryOption::Delivery,
            address: None,
            payment: PaymentOption::Cash,
        })
        .await
        .expect_err("missing address must be rejected");
    assert!(matches!(err, ServiceError::ValidationError(_)));

    // Pickup has no such requirement.
    checkout
        .confirm_order(CheckoutRequest {
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1122334455".to_string(),
            delivery: DeliveryOption::Pickup,
            address: None,
            payment: PaymentOption::Cash,
        })
        .await
        .expect("pickup without address confirms");
}

#[tokio::test]
async fn confirmation_records_a_pending_sale_and_clears_the_cart() {
    let app = app_with_cart().await;
    let checkout = app.state.checkout_service();

    let confirmed = checkout
        .confirm_order(CheckoutRequest {
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1122334455".to_string(),
            delivery: DeliveryOption::Delivery,
            address: Some("Av. Principal 1234".to_string()),
            payment: PaymentOption::BankTransfer,
        })
        .await
        .expect("confirm");

    assert_eq!(confirmed.sale.status, SaleStatus::Pending);
    assert_eq!(confirmed.sale.total, dec!(24250));
    assert_eq!(confirmed.sale.items.len(), 1);
    assert_eq!(confirmed.sale.items[0].quantity, 2);
    assert!(confirmed.sale.reference.starts_with("ORD-"));

    // The ledger holds it and the cart is gone.
    let sales = app.state.sales_service().list().await;
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, confirmed.sale.id);
    assert_eq!(app.state.cart_service().count().await, 0);

    // Hand-off artifacts.
    assert!(confirmed.whatsapp_url.starts_with("https://wa.me/5491122334455?text="));
    assert!(confirmed
        .message
        .contains("- Granola Artesanal Miel y Nueces (2x) : $ 25.000"));
    assert!(confirmed.message.contains("*Total:* $ 24.250"));
    assert!(confirmed.message.contains("Dirección: Av. Principal 1234"));
}

#[tokio::test]
async fn stock_is_not_decremented_by_checkout() {
    let app = app_with_cart().await;
    let product_before = app.state.catalog_service().list().await[0].clone();

    app.state
        .checkout_service()
        .confirm_order(CheckoutRequest {
            customer_name: "Juan Pérez".to_string(),
            customer_phone: String::new(),
            delivery: DeliveryOption::Pickup,
            address: None,
            payment: PaymentOption::Cash,
        })
        .await
        .expect("confirm");

    let product_after = app.state.catalog_service().list().await[0].clone();
    assert_eq!(product_after.stock, product_before.stock);
}

#[tokio::test]
async fn quotes_can_price_an_admin_configured_method() {
    let app = TestApp::seeded();
    let product = app.state.catalog_service().list().await[0].clone();
    app.state
        .cart_service()
        .add_item(product.id)
        .await
        .expect("add");

    let methods = app.state.settings_service().list_shipping_methods().await;
    let express = methods
        .iter()
        .find(|m| m.name == "Envío Express")
        .expect("seeded method")
        .clone();

    let quote = app
        .state
        .checkout_service()
        .quote_for_method(express.id, PaymentOption::Cash)
        .await
        .expect("quote");
    assert_eq!(quote.shipping_cost, dec!(8500));
    assert_eq!(quote.total, product.price + dec!(8500));
}

#[tokio::test]
async fn disabled_shipping_methods_cannot_be_quoted() {
    let app = TestApp::seeded();
    let settings = app.state.settings_service();
    let method = settings.list_shipping_methods().await[0].clone();
    settings
        .toggle_shipping_method(method.id)
        .await
        .expect("toggle off");

    let err = app
        .state
        .checkout_service()
        .quote_for_method(method.id, PaymentOption::Cash)
        .await
        .expect_err("disabled method must be rejected");
    assert!(matches!(err, ServiceError::InvalidOperation(_)));
}
