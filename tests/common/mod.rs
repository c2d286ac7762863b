//! Shared helpers for integration tests.
//!
//! Each test gets its own fully migrated in-memory SQLite store; app
//! instances are built per call against that pool, wiring the exact same
//! routes main serves.

// Not every test binary uses every helper.
#![allow(dead_code)]

use actix_web::{App, test, web};
use sea_orm::{ConnectOptions, Database, EntityTrait};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};

use courier_lib::api;
use courier_lib::db::DbPool;
use courier_lib::migration::Migrator;

/// Fresh, fully migrated in-memory store. A single connection so every
/// query sees the same SQLite database.
pub async fn test_pool() -> DbPool {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&conn, None).await.expect("run migrations");

    DbPool::from_connection(conn)
}

/// Build the application service exactly as main wires it.
#[macro_export]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(courier_lib::api::configure_routes),
        )
        .await
    };
}

/// Register a user and return its issued API key token.
pub async fn register(pool: &DbPool, username: &str, email: &str) -> String {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .configure(api::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": username, "email": email}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(
        resp.status().is_success(),
        "registration of {username} failed: {}",
        resp.status()
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    body["data"]["apiKeyToken"]
        .as_str()
        .expect("token in registration response")
        .to_string()
}

/// Count the rows of a table; used to assert on persistence side effects.
pub async fn count_users(pool: &DbPool) -> usize {
    courier_lib::entity::user::Entity::find()
        .all(pool.connection())
        .await
        .expect("query users")
        .len()
}

pub async fn count_api_keys(pool: &DbPool) -> usize {
    courier_lib::entity::api_key::Entity::find()
        .all(pool.connection())
        .await
        .expect("query api_keys")
        .len()
}

pub async fn count_messages(pool: &DbPool) -> usize {
    courier_lib::entity::message::Entity::find()
        .all(pool.connection())
        .await
        .expect("query messages")
        .len()
}
