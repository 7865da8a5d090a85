//! HTTP enrichment client against a local mock of the enrichment service.

use product_hub::domain::{Ingredients, Product};
use product_hub::enrichment::{mock_enrichment, EnrichmentRequest, EnrichmentResult, Enricher, HttpEnricher};
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn glasses() -> Product {
    let mut product = Product::new(1, "Safety Glasses");
    product.brand = Some("Acme".to_string());
    product.item_weight = Some(50.0);
    product.weight_unit = Some("g".to_string());
    product
}

fn enricher(base_url: &str) -> HttpEnricher {
    HttpEnricher::new(format!("{base_url}/process"), Duration::from_secs(5)).unwrap()
}

/// Serves one `POST /process` with `response`.
async fn serve(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Enriches the sample product off the runtime thread serving the mock.
async fn enrich(server: &MockServer) -> EnrichmentResult {
    let base_url = server.uri();
    tokio::task::spawn_blocking(move || enricher(&base_url).enrich(&glasses()))
        .await
        .unwrap()
}

fn fallback_reason(result: EnrichmentResult) -> String {
    assert_eq!(result.data(), &mock_enrichment());
    match result {
        EnrichmentResult::Fallback { reason, .. } => reason,
        EnrichmentResult::Live(data) => panic!("expected fallback, got {data:?}"),
    }
}

#[tokio::test]
async fn live_response_is_parsed_leniently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"product_name":"Safety Glasses Pro","barcode":"4006381333931","item_weight":"52.5","warranty":2,"color":null,"ingredients":{"Lens":"polycarbonate","Frame":["nylon","rubber"]}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let EnrichmentResult::Live(data) = enrich(&server).await else {
        panic!("expected live result");
    };
    assert_eq!(data.product_name.as_deref(), Some("Safety Glasses Pro"));
    assert_eq!(data.barcode, Some(4_006_381_333_931));
    assert_eq!(data.item_weight, Some(52.5));
    assert_eq!(data.warranty, Some(2));
    assert_eq!(data.color, None);
    let Some(Ingredients::Categorized(groups)) = data.ingredients else {
        panic!("expected categorized ingredients");
    };
    assert_eq!(groups["Lens"], vec!["polycarbonate"]);
    assert_eq!(groups["Frame"], vec!["nylon", "rubber"]);

    let requests = server.received_requests().await.unwrap();
    let request: EnrichmentRequest = requests[0].body_json().unwrap();
    assert_eq!(request.product.id, "1");
    assert_eq!(request.product.brand, "Acme");
    assert_eq!(request.product.weight, "50 g");
    assert_eq!(request.product.dimensions, "N/A");
    assert_eq!(request.product.product_image, "N/A");
}

#[tokio::test]
async fn error_body_falls_back() {
    let server = serve(
        ResponseTemplate::new(200).set_body_raw(r#"{"error":"model overloaded"}"#, "application/json"),
    )
    .await;
    let reason = fallback_reason(enrich(&server).await);
    assert!(reason.contains("API reported an error"));
    assert!(reason.contains("model overloaded"));
}

#[tokio::test]
async fn missing_endpoint_falls_back() {
    let server = serve(ResponseTemplate::new(404)).await;
    let reason = fallback_reason(enrich(&server).await);
    assert!(reason.contains("API endpoint not found"));
}

#[tokio::test]
async fn server_error_falls_back() {
    let server = serve(ResponseTemplate::new(503)).await;
    let reason = fallback_reason(enrich(&server).await);
    assert!(reason.contains("API server error"));
}

#[test]
fn unreachable_server_falls_back() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}");

    let reason = fallback_reason(enricher(&url).enrich(&glasses()));
    assert!(reason.contains("Cannot connect to the API server"));
}
