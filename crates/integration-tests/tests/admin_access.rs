//! Admin routes against a real database.
//!
//! These tests need a migrated `PostgreSQL` database:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/farmstand_test \
//!     cargo test -p farmstand-integration-tests -- --include-ignored
//! ```

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

use farmstand_core::{Email, ProfileId};
use farmstand_integration_tests::{
    RejectingSender, body_json, mailer_app, spawn, storefront_config,
};
use farmstand_storefront::config::DEFAULT_IDENTITY_HEADER;
use farmstand_storefront::db::ProfileRepository;
use farmstand_storefront::models::{NewProfile, Profile};
use farmstand_storefront::state::AppState;

fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set")
}

async fn pool() -> PgPool {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .unwrap();
    pool
}

async fn profile(pool: &PgPool, admin: bool) -> Profile {
    let id = ProfileId::new(Uuid::new_v4());
    let new = NewProfile {
        email: Email::parse(&format!("{id}@farm.example")).unwrap(),
        username: None,
        name: "Test".to_string(),
        surname: "Staff".to_string(),
        phone: String::new(),
    };
    let repo = ProfileRepository::new(pool);
    let created = repo.create(id, &new).await.unwrap();
    if admin {
        repo.promote(id).await.unwrap()
    } else {
        created
    }
}

fn storefront(pool: PgPool, mailer_url: Url) -> Router {
    let config = storefront_config(&database_url(), mailer_url);
    farmstand_storefront::app(AppState::new(config, pool).unwrap())
}

fn request(method: &str, uri: &str, profile: &Profile) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(DEFAULT_IDENTITY_HEADER, profile.id.to_string())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_admin_routes_refuse_customers() {
    let pool = pool().await;
    let customer = profile(&pool, false).await;
    let app = storefront(pool, Url::parse("http://127.0.0.1:5000").unwrap());

    for (method, uri) in [
        ("GET", "/api/admin/products"),
        ("GET", "/api/admin/settings"),
        ("GET", "/api/admin/users"),
        ("GET", "/api/admin/reports/preorders"),
        ("POST", "/api/admin/reports/leftover/email"),
    ] {
        let response = app
            .clone()
            .oneshot(request(method, uri, &customer))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{method} {uri} as a customer"
        );
    }
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_report_email_surfaces_mailer_failure() {
    let pool = pool().await;
    let admin = profile(&pool, true).await;
    let mailer_url = spawn(mailer_app(Arc::new(RejectingSender))).await;
    let app = storefront(pool, mailer_url);

    let response = app
        .oneshot(request("POST", "/api/admin/reports/leftover/email", &admin))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response.into_body()).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to send email")
    );
}
