mod common;

use common::TestApp;
use despensa::errors::ServiceError;
use uuid::Uuid;

#[tokio::test]
async fn adding_an_unknown_product_is_not_found() {
    let app = TestApp::new();
    let cart = app.state.cart_service();

    let err = cart
        .add_item(Uuid::new_v4())
        .await
        .expect_err("missing product must be rejected");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn repeat_add_merges_into_a_single_line() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let product = app.state.catalog_service().list().await[0].clone();

    cart.add_item(product.id).await.expect("first add");
    cart.add_item(product.id).await.expect("second add");

    let items = cart.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].unit_price, product.price);
}

#[tokio::test]
async fn count_sums_quantities_across_lines() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let products = app.state.catalog_service().list().await;

    assert_eq!(cart.count().await, 0);

    cart.add_item(products[0].id).await.expect("add");
    cart.add_item(products[0].id).await.expect("add");
    cart.add_item(products[1].id).await.expect("add");

    assert_eq!(cart.count().await, 3);
}

#[tokio::test]
async fn update_quantity_clamps_at_one() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let product = app.state.catalog_service().list().await[0].clone();
    cart.add_item(product.id).await.expect("add");

    cart.update_quantity(product.id, -5)
        .await
        .expect("clamped update");
    assert_eq!(cart.items().await[0].quantity, 1);

    cart.update_quantity(product.id, 4).await.expect("increase");
    assert_eq!(cart.items().await[0].quantity, 5);

    cart.update_quantity(product.id, -100)
        .await
        .expect("clamped again");
    assert_eq!(cart.items().await[0].quantity, 1);
}

#[tokio::test]
async fn update_quantity_ignores_absent_products() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();

    cart.update_quantity(Uuid::new_v4(), 3)
        .await
        .expect("no-op for unknown id");
    assert!(cart.items().await.is_empty());
}

#[tokio::test]
async fn remove_deletes_the_line_and_tolerates_absence() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let product = app.state.catalog_service().list().await[0].clone();
    cart.add_item(product.id).await.expect("add");

    cart.remove_item(product.id).await.expect("remove");
    assert!(cart.items().await.is_empty());

    cart.remove_item(product.id)
        .await
        .expect("removing again stays a no-op");
}

#[tokio::test]
async fn insertion_order_survives_quantity_bumps() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let products = app.state.catalog_service().list().await;

    cart.add_item(products[0].id).await.expect("add first");
    cart.add_item(products[1].id).await.expect("add second");
    cart.add_item(products[0].id).await.expect("bump first");

    let items = cart.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product_id, products[0].id);
    assert_eq!(items[1].product_id, products[1].id);
}

#[tokio::test]
async fn clear_empties_the_cart() {
    let app = TestApp::seeded();
    let cart = app.state.cart_service();
    let product = app.state.catalog_service().list().await[0].clone();
    cart.add_item(product.id).await.expect("add");

    cart.clear().await;
    assert_eq!(cart.count().await, 0);
}
