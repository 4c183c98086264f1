use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use keel_kernel::domain::config::Settings;
use keel_kernel::server::{ApiState, not_found_fallback};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let state = ApiState::builder()
        .settings(Settings::default())
        .register_slice(keel_items::init().unwrap())
        .build()
        .unwrap();
    let (router, _api) = keel_items::router().split_for_parts();
    router.fallback(not_found_fallback).with_state(state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    let (status, created) = call(
        &app,
        Method::POST,
        "/items",
        Some(json!({"name": "Widget", "description": "A widget", "price": 9.99})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Widget");
    assert!(created["created_at"].is_string());

    let (status, fetched) = call(&app, Method::GET, "/items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) =
        call(&app, Method::PUT, "/items/1", Some(json!({"price": 12.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 12.5);
    assert_eq!(updated["description"], "A widget");

    let (status, body) = call(&app, Method::DELETE, "/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = call(&app, Method::GET, "/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn listing_returns_every_created_item_in_order() {
    let app = app();
    for n in 0..3 {
        let (status, _) =
            call(&app, Method::POST, "/items", Some(json!({"name": format!("item-{n}"), "price": 1.0})))
                .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = call(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = list.as_array().unwrap().iter().map(|i| i["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn missing_ids_return_not_found() {
    let app = app();
    for (method, body) in
        [(Method::GET, None), (Method::PUT, Some(json!({"name": "x"}))), (Method::DELETE, None)]
    {
        let (status, body) = call(&app, method, "/items/42", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Item not found");
    }
}

#[tokio::test]
async fn state_without_slice_is_an_internal_error() {
    let state = ApiState::builder().settings(Settings::default()).build().unwrap();
    let (router, _api) = keel_items::router().split_for_parts();
    let app = router.with_state(state);

    let (status, body) = call(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
}

#[test]
fn routes_are_documented() {
    let (_router, api) = keel_items::router().split_for_parts();
    let paths: Vec<_> = api.paths.paths.keys().cloned().collect();
    assert_eq!(paths, ["/items", "/items/{id}"]);
}
