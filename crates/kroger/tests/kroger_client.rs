use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, put},
};
use grocer_kroger::{CartOutcome, KrogerClient, KrogerConfig, Retailer};
use serde_json::{Value, json};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> KrogerClient {
    KrogerClient::new(KrogerConfig {
        base_url,
        access_token: "token-123".to_owned(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_find_store_returns_first_location() {
    let router = Router::new().route(
        "/locations",
        get(
            |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(headers["authorization"], "Bearer token-123");
                assert_eq!(params["filter.zipCode.near"], "90210");
                assert_eq!(params["filter.limit"], "1");
                Json(json!({"data": [{"locationId": "70100123"}, {"locationId": "other"}]}))
            },
        ),
    );
    let base_url = spawn_stub(router).await;

    assert_eq!(
        client(base_url).find_store("90210").await.as_deref(),
        Some("70100123")
    );
}

#[tokio::test]
async fn test_find_store_none_on_empty_or_error() {
    let router = Router::new()
        .route("/locations", get(|| async { Json(json!({"data": []})) }));
    let base_url = spawn_stub(router).await;
    assert!(client(base_url).find_store("00000").await.is_none());

    let router = Router::new().route(
        "/locations",
        get(|| async { (StatusCode::UNAUTHORIZED, "expired token") }),
    );
    let base_url = spawn_stub(router).await;
    assert!(client(base_url).find_store("90210").await.is_none());
}

#[tokio::test]
async fn test_search_products_scoped_to_store() {
    let router = Router::new().route(
        "/products",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params["filter.term"], "apples");
            assert_eq!(params["filter.limit"], "5");
            assert_eq!(params.get("filter.locationId").map(String::as_str), Some("70100123"));
            Json(json!({"data": [
                {"productId": "0000000004131", "description": "Gala Apple", "brand": "Kroger"},
                {"productId": "0000000004017", "description": "Granny Smith Apple"}
            ]}))
        }),
    );
    let base_url = spawn_stub(router).await;

    let products = client(base_url)
        .search_products("apples", Some("70100123"))
        .await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product_id.as_deref(), Some("0000000004131"));
    assert_eq!(products[0].brand.as_deref(), Some("Kroger"));
    assert!(products[1].brand.is_none());
}

#[tokio::test]
async fn test_search_products_without_store() {
    let router = Router::new().route(
        "/products",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert!(!params.contains_key("filter.locationId"));
            Json(json!({"data": []}))
        }),
    );
    let base_url = spawn_stub(router).await;

    assert!(client(base_url).search_products("unicorn", None).await.is_empty());
}

#[tokio::test]
async fn test_add_to_cart_sends_items() {
    let received = Arc::new(Mutex::new(Value::Null));
    let sink = received.clone();
    let router = Router::new().route(
        "/cart/add",
        put(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = body;
                StatusCode::NO_CONTENT
            }
        }),
    );
    let base_url = spawn_stub(router).await;

    let outcome = client(base_url)
        .add_to_cart(&["111".to_owned(), "222".to_owned()])
        .await;

    assert_eq!(outcome, CartOutcome::ok("Items successfully added to cart"));
    assert_eq!(
        *received.lock().unwrap(),
        json!({"items": [{"upc": "111", "quantity": 1}, {"upc": "222", "quantity": 1}]})
    );
}

#[tokio::test]
async fn test_add_to_cart_reports_status() {
    let router = Router::new().route(
        "/cart/add",
        put(|| async { (StatusCode::FORBIDDEN, "scope missing") }),
    );
    let base_url = spawn_stub(router).await;

    let outcome = client(base_url).add_to_cart(&["111".to_owned()]).await;

    assert_eq!(outcome, CartOutcome::failed("Failed to add items to cart: 403"));
}

#[tokio::test]
async fn test_add_to_cart_transport_error() {
    let outcome = client("http://127.0.0.1:9".to_owned())
        .add_to_cart(&["111".to_owned()])
        .await;

    assert!(!outcome.ok);
    assert!(outcome.message.starts_with("Error adding items to cart: "));
}
