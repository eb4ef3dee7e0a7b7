mod common;

use common::TestApp;
use despensa::services::CreateProductInput;
use rust_decimal_macros::dec;

#[tokio::test]
async fn catalog_export_has_headers_and_one_row_per_product() {
    let app = TestApp::seeded();
    let csv = app.state.report_service().catalog_csv().await;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "ID,Nombre,SKU,Categoria,Precio,Stock,Estado");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("Aceite de Oliva Extra Virgen"));
    assert!(lines[1].contains("OL-105"));
    assert!(lines[1].contains("18900"));
    assert!(lines[1].contains("In Stock"));
}

#[tokio::test]
async fn sales_export_carries_references_methods_and_statuses() {
    let app = TestApp::seeded();
    let csv = app.state.report_service().sales_csv().await;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "Orden ID,Cliente,Fecha,Total,Metodo Pago,Metodo Envio,Estado"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("ORD-001,"));
    assert!(lines[1].contains("Mercado Pago"));
    assert!(lines[1].contains("Envío"));
    assert!(lines[1].contains("Entregado"));
    assert!(lines[2].contains("Pendiente"));
}

#[tokio::test]
async fn free_text_with_commas_cannot_corrupt_a_row() {
    let app = TestApp::new();
    app.state
        .catalog_service()
        .create_product(CreateProductInput {
            name: "Aceite, primera prensada \"premium\"".to_string(),
            sku: "AC-999".to_string(),
            category: "Pantry Essentials".to_string(),
            price: dec!(19900),
            old_price: None,
            weight: None,
            description: None,
            images: vec![],
            tag: None,
            stock: 7,
        })
        .await
        .expect("create");

    let csv = app.state.report_service().catalog_csv().await;
    let row = csv.lines().nth(1).expect("data row");

    assert!(row.contains("\"Aceite, primera prensada \"\"premium\"\"\""));
    // Quoting keeps the column count intact for a naive split outside quotes.
    assert_eq!(row.matches("AC-999").count(), 1);
}

#[tokio::test]
async fn low_stock_products_export_their_derived_status() {
    let app = TestApp::new();
    app.state
        .catalog_service()
        .create_product(CreateProductInput {
            name: "Semillas de Chía".to_string(),
            sku: "CH-001".to_string(),
            category: "Dietetic & Bio".to_string(),
            price: dec!(7900),
            old_price: None,
            weight: None,
            description: None,
            images: vec![],
            tag: None,
            stock: 3,
        })
        .await
        .expect("create");

    let csv = app.state.report_service().catalog_csv().await;
    assert!(csv.lines().nth(1).expect("data row").contains("Low Stock"));
}
