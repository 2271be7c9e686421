//! Preorder placement against a real database.
//!
//! These tests need a migrated `PostgreSQL` database:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/farmstand_test \
//!     cargo test -p farmstand-integration-tests -- --include-ignored
//! ```

#![allow(clippy::unwrap_used)]

use chrono::Local;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use farmstand_core::{Email, ProfileId};
use farmstand_storefront::db::{
    PreorderRepository, ProductRepository, ProfileRepository, ReportRepository, RepositoryError,
};
use farmstand_storefront::models::{NewProfile, Product, ProductInput, Profile};

async fn pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .unwrap();
    pool
}

async fn customer(pool: &PgPool) -> Profile {
    let id = ProfileId::new(Uuid::new_v4());
    let new = NewProfile {
        email: Email::parse(&format!("{id}@farm.example")).unwrap(),
        username: None,
        name: "Test".to_string(),
        surname: "Customer".to_string(),
        phone: String::new(),
    };
    ProfileRepository::new(pool).create(id, &new).await.unwrap()
}

async fn product(pool: &PgPool, stock: i32) -> Product {
    let input = ProductInput {
        product_type: "Tomato".to_string(),
        variety: format!("Test {}", Uuid::new_v4().simple()),
        quality: String::new(),
        max_quantity: stock,
        base_price: Decimal::new(250, 2),
        hourly_price_drop: None,
        unit: "kg".to_string(),
        description: String::new(),
        available_date: None,
    };
    let name = input.validate().unwrap();
    ProductRepository::new(pool)
        .create(&name, &input, Local::now().date_naive())
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_concurrent_preorders_never_oversell() {
    let pool = pool().await;
    let buyer = customer(&pool).await;
    let listed = product(&pool, 5).await;
    let (buyer_id, product_id) = (buyer.id, listed.id);

    let attempts: Vec<_> = (0..12)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                PreorderRepository::new(&pool)
                    .place(buyer_id, product_id, 1)
                    .await
            })
        })
        .collect();

    let mut placed = 0;
    let mut refused = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => placed += 1,
            Err(RepositoryError::Conflict(_)) => refused += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(placed, 5);
    assert_eq!(refused, 7);

    let stored = ProductRepository::new(&pool)
        .get(listed.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.remaining_stock, Some(0));
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_refused_preorder_leaves_no_trace() {
    let pool = pool().await;
    let buyer = customer(&pool).await;
    let listed = product(&pool, 2).await;
    let preorders = PreorderRepository::new(&pool);

    let err = preorders.place(buyer.id, listed.id, 3).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert!(preorders.history(buyer.id).await.unwrap().is_empty());

    let placed = preorders.place(buyer.id, listed.id, 2).await.unwrap();
    assert_eq!(placed.remaining_stock, 0);
    assert_eq!(preorders.history(buyer.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_reports_reflect_todays_preorders() {
    let pool = pool().await;
    let buyer = customer(&pool).await;
    let listed = product(&pool, 4).await;
    let today = Local::now().date_naive();

    let placed = PreorderRepository::new(&pool)
        .place(buyer.id, listed.id, 3)
        .await
        .unwrap();

    let reports = ReportRepository::new(&pool);
    let completed = reports.completed_preorders(today).await.unwrap();
    let row = completed
        .iter()
        .find(|row| row.id == placed.preorder.id)
        .unwrap();
    assert_eq!(row.username.as_deref(), Some(buyer.username.as_str()));
    assert_eq!(row.quantity, 3);
    assert_eq!(row.total, Decimal::new(750, 2));

    let leftover = reports.leftover_stock(today).await.unwrap();
    let row = leftover
        .iter()
        .find(|row| row.id == listed.id)
        .unwrap();
    assert_eq!(row.remaining_stock, 1);
}
