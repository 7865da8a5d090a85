//! REST store requests against a local mock of the hosted table API.

use product_hub::domain::{NewProduct, ProductPatch};
use product_hub::storage::{ProductStore, RestStore};
use product_hub::CatalogError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE: &str = "/rest/v1/products";

/// Runs blocking store calls off the runtime thread serving the mock.
async fn with_store<T, F>(server: &MockServer, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&mut RestStore) -> T + Send + 'static,
{
    let base_url = server.uri();
    tokio::task::spawn_blocking(move || {
        let mut store = RestStore::new(&base_url, Some("anon-key"), Duration::from_secs(5)).unwrap();
        call(&mut store)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn list_sends_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TABLE))
        .and(query_param("select", "*"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "product_name": "Safety Glasses", "brand": "Acme", "item_weight": 50, "product_image": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = with_store(&server, |store| store.list()).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].brand.as_deref(), Some("Acme"));
    assert_eq!(products[0].item_weight, Some(50.0));
}

#[tokio::test]
async fn insert_asks_for_representation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TABLE))
        .and(header("prefer", "return=representation"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([{"id": 7, "product_name": "Gloves"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = with_store(&server, |store| {
        store.insert(&NewProduct::from_required(7, "Gloves"))
    })
    .await
    .unwrap();
    assert_eq!(created.id, 7);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["id"], 7);
    assert_eq!(body["product_name"], "Gloves");
    assert!(body.get("brand").is_none());
}

#[tokio::test]
async fn update_targets_one_row() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(TABLE))
        .and(query_param("id", "eq.7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 7, "product_name": "Work Gloves"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProductPatch {
        product_name: "Work Gloves".to_string(),
        ..ProductPatch::default()
    };
    let updated = with_store(&server, move |store| store.update(7, &patch))
        .await
        .unwrap();
    assert_eq!(updated.product_name, "Work Gloves");
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let err = with_store(&server, |store| store.update(9, &ProductPatch::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ProductNotFound(9)));
}

#[tokio::test]
async fn delete_of_missing_row_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TABLE))
        .and(query_param("id", "eq.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    with_store(&server, |store| store.delete(9)).await.unwrap();
}

#[tokio::test]
async fn bulk_delete_uses_in_filter() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(TABLE))
        .and(query_param("id", "in.(1,2,3)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "product_name": "a"},
            {"id": 2, "product_name": "b"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let removed = with_store(&server, |store| store.delete_many(&[1, 2, 3]))
        .await
        .unwrap();
    assert_eq!(removed, 2);
}

#[tokio::test]
async fn constraint_violation_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = with_store(&server, |store| {
        store.insert(&NewProduct::from_required(1, "Clone"))
    })
    .await
    .unwrap_err();

    let CatalogError::Transport(message) = err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(message.starts_with("409"));
    assert!(message.contains("duplicate key"));
}
