//! Demo data loaded into a seeded session: a small catalog, a few historical
//! sales and the default shipping/payment methods. Everything here is plain
//! in-memory state; a reload starts from scratch.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::entities::{
    DeliveryOption, PaymentMethodConfig, PaymentOption, Product, Sale, SaleItem, SaleStatus,
    ShippingMethodConfig,
};

/// The starter catalog.
pub fn demo_products() -> Vec<Product> {
    let now = Utc::now();
    vec![
        Product {
            id: Uuid::new_v4(),
            name: "Aceite de Oliva Extra Virgen".to_string(),
            category: "Pantry Essentials".to_string(),
            price: dec!(18900),
            old_price: None,
            weight: "750ml • Acidez <0.5%".to_string(),
            description: "Aceite de oliva virgen extra de primera prensada en frío. \
                          Notas frutadas y picor equilibrado."
                .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1474979266404-7eaacbcd87c5?w=800&auto=format&fit=crop&q=80"
                    .to_string(),
            ],
            tag: None,
            stock: 20,
            sku: "OL-105".to_string(),
            created_at: now,
            updated_at: now,
        },
        Product {
            id: Uuid::new_v4(),
            name: "Té Matcha Ceremonial".to_string(),
            category: "Dietetic & Bio".to_string(),
            price: dec!(24500),
            old_price: None,
            weight: "50g • Japón".to_string(),
            description: "Polvo de té verde grado ceremonial importado de Japón. \
                          Antioxidante natural y energizante."
                .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1582793988951-9aed5509eb97?w=800&auto=format&fit=crop&q=80"
                    .to_string(),
            ],
            tag: Some("NUEVO".to_string()),
            stock: 10,
            sku: "MA-013".to_string(),
            created_at: now,
            updated_at: now,
        },
        Product {
            id: Uuid::new_v4(),
            name: "Café de Especialidad".to_string(),
            category: "Pantry Essentials".to_string(),
            price: dec!(21000),
            old_price: None,
            weight: "250g • En Grano".to_string(),
            description: "Café tostado artesanalmente. Notas a chocolate y caramelo. \
                          100% Arábica de altura."
                .to_string(),
            images: vec![
                "https://images.unsplash.com/photo-1497935586351-b67a49e012bf?w=800&auto=format&fit=crop&q=80"
                    .to_string(),
            ],
            tag: None,
            stock: 15,
            sku: "CF-016".to_string(),
            created_at: now,
            updated_at: now,
        },
    ]
}

/// A few historical orders so the admin panel has something to show.
pub fn demo_sales() -> Vec<Sale> {
    let now = Utc::now();
    vec![
        Sale {
            id: Uuid::new_v4(),
            reference: "ORD-001".to_string(),
            customer_name: "Juan Pérez".to_string(),
            customer_phone: "1122334455".to_string(),
            placed_at: now,
            total: dec!(31400),
            items: vec![
                SaleItem {
                    product_name: "Granola Artesanal Miel y Nueces".to_string(),
                    quantity: 2,
                    unit_price: dec!(12500),
                },
                SaleItem {
                    product_name: "Harina de Avena Integral".to_string(),
                    quantity: 1,
                    unit_price: dec!(6400),
                },
            ],
            payment: PaymentOption::MercadoPago,
            delivery: DeliveryOption::Delivery,
            status: SaleStatus::Delivered,
        },
        Sale {
            id: Uuid::new_v4(),
            reference: "ORD-002".to_string(),
            customer_name: "María García".to_string(),
            customer_phone: "1199887766".to_string(),
            placed_at: now - Duration::days(1),
            total: dec!(18900),
            items: vec![SaleItem {
                product_name: "Aceite de Oliva Extra Virgen".to_string(),
                quantity: 1,
                unit_price: dec!(18900),
            }],
            payment: PaymentOption::BankTransfer,
            delivery: DeliveryOption::Pickup,
            status: SaleStatus::Pending,
        },
        Sale {
            id: Uuid::new_v4(),
            reference: "ORD-003".to_string(),
            customer_name: "Carlos Rodríguez".to_string(),
            customer_phone: "1155443322".to_string(),
            placed_at: now - Duration::days(2),
            total: dec!(45300),
            items: vec![
                SaleItem {
                    product_name: "Mix de Frutos Secos".to_string(),
                    quantity: 2,
                    unit_price: dec!(11500),
                },
                SaleItem {
                    product_name: "Miel Pura de Montaña".to_string(),
                    quantity: 1,
                    unit_price: dec!(14900),
                },
                SaleItem {
                    product_name: "Semillas de Chía".to_string(),
                    quantity: 1,
                    unit_price: dec!(7900),
                },
            ],
            payment: PaymentOption::MercadoPago,
            delivery: DeliveryOption::Delivery,
            status: SaleStatus::Shipped,
        },
    ]
}

/// Default shipping methods offered by the admin configuration.
pub fn demo_shipping_methods() -> Vec<ShippingMethodConfig> {
    vec![
        ShippingMethodConfig {
            id: Uuid::new_v4(),
            name: "Envío Estándar".to_string(),
            price: dec!(5000),
            estimated_days: "3-5 días hábiles".to_string(),
            enabled: true,
        },
        ShippingMethodConfig {
            id: Uuid::new_v4(),
            name: "Envío Express".to_string(),
            price: dec!(8500),
            estimated_days: "24-48 horas".to_string(),
            enabled: true,
        },
        ShippingMethodConfig {
            id: Uuid::new_v4(),
            name: "Retiro en Local".to_string(),
            price: dec!(0),
            estimated_days: "Inmediato".to_string(),
            enabled: true,
        },
    ]
}

/// Default payment methods offered by the admin configuration.
pub fn demo_payment_methods() -> Vec<PaymentMethodConfig> {
    vec![
        PaymentMethodConfig {
            id: Uuid::new_v4(),
            name: "Mercado Pago".to_string(),
            icon: "credit_card".to_string(),
            enabled: true,
            instructions: "Pago seguro con tarjeta o saldo MP".to_string(),
        },
        PaymentMethodConfig {
            id: Uuid::new_v4(),
            name: "Transferencia Bancaria".to_string(),
            icon: "account_balance".to_string(),
            enabled: true,
            instructions: "CBU: 0000000000000000000000".to_string(),
        },
        PaymentMethodConfig {
            id: Uuid::new_v4(),
            name: "Efectivo".to_string(),
            icon: "payments".to_string(),
            enabled: true,
            instructions: "Pago al momento de la entrega o retiro".to_string(),
        },
    ]
}
