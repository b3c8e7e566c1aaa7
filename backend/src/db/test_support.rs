//! Fixtures shared by repository tests

use super::{CreateProduct, Database, ProductRecord, RegisterSeller, SellerRecord};

pub(crate) async fn register_seller(db: &Database, email: &str) -> SellerRecord {
    let (seller, _) = db
        .sellers()
        .register(RegisterSeller {
            email: email.to_string(),
            name: "Huerta Viva".to_string(),
            seller_type: "business".to_string(),
            phone: None,
            city_id: None,
            description: None,
            avatar_url: None,
            website: None,
            sustainability_score: 50,
        })
        .await
        .unwrap();
    seller
}

pub(crate) fn new_product(seller_id: &str, price: f64, stock: i64) -> CreateProduct {
    CreateProduct {
        seller_id: seller_id.to_string(),
        category_id: None,
        name: "Cepillo de bambú".to_string(),
        description: Some("Biodegradable".to_string()),
        price,
        stock,
    }
}

pub(crate) async fn create_product(db: &Database, seller_id: &str, price: f64, stock: i64) -> ProductRecord {
    db.products()
        .create(new_product(seller_id, price, stock))
        .await
        .unwrap()
}
