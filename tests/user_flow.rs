//! Integration tests for registration, lookup, and deletion.

mod common;

use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use serde_json::{Value, json};

#[actix_web::test]
async fn register_issues_a_resolvable_token() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice", "email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"]["id"].is_i64());
    let token = body["data"]["apiKeyToken"].as_str().unwrap().to_string();
    assert!(token.starts_with("cur_"));

    // The issued token resolves to exactly this user.
    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["status"], "success");
    assert_eq!(me["data"]["username"], "alice");
    assert_eq!(me["data"]["email"], "alice@x.com");
    assert_eq!(me["data"]["active"], true);
    assert_eq!(me["data"]["id"], body["data"]["id"]);
}

#[actix_web::test]
async fn duplicate_username_conflicts_without_orphan_key() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice", "email": "other@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert!(body["data"]["username"].is_string());

    // The failed attempt left no partial state behind.
    assert_eq!(common::count_users(&pool).await, 1);
    assert_eq!(common::count_api_keys(&pool).await, 1);
}

#[actix_web::test]
async fn duplicate_email_conflicts_on_the_email_field() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "alice2", "email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert!(body["data"]["email"].is_string());
    assert!(body["data"].get("username").is_none());
    assert_eq!(common::count_api_keys(&pool).await, 1);
}

#[actix_web::test]
async fn empty_registration_fields_are_rejected() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": "   ", "email": "alice@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(common::count_users(&pool).await, 0);
}

#[actix_web::test]
async fn lookup_by_id_and_username() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let token = common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    let id = me["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/user_by_id/{id}"))
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let by_id: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_id["data"]["username"], "alice");

    let req = test::TestRequest::get()
        .uri("/user_by_username/alice")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let by_name: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_name["data"]["id"], id);

    // Ids and FK material are not part of the record shape beyond `id`.
    assert!(by_name["data"].get("apiKeyToken").is_none());
}

#[actix_web::test]
async fn lookup_misses_are_field_addressed_client_faults() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let token = common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::get()
        .uri("/user_by_id/9999")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert!(body["data"]["user"].is_string());

    let req = test::TestRequest::get()
        .uri("/user_by_username/nobody")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn non_numeric_id_is_a_client_fault() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let token = common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::get()
        .uri("/user_by_id/abc")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert!(body["data"]["id"].is_string());
}

#[actix_web::test]
async fn delete_removes_user_and_key_atomically() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let token = common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    let id = me["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/delete_user_by_id/{id}"))
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "alice");

    assert_eq!(common::count_users(&pool).await, 0);
    assert_eq!(common::count_api_keys(&pool).await, 0);

    // The former token no longer resolves.
    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn delete_unknown_id_is_not_found() {
    let pool = common::test_pool().await;
    let app = crate::test_app!(pool);

    let token = common::register(&pool, "alice", "alice@x.com").await;

    let req = test::TestRequest::delete()
        .uri("/delete_user_by_id/424242")
        .insert_header((AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
