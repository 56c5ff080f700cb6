mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn upsert_creates_then_replaces_a_page() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::PUT,
            "/api/pages/delivery",
            Some(json!({
                "title": "Доставка і оплата",
                "content": "Відправляємо щодня, крім неділі.",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], json!("delivery"));

    let (status, body) = app
        .request_json(Method::GET, "/api/pages/delivery", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], json!("Доставка і оплата"));

    // Same slug replaces the content, cached copy included.
    let (status, _) = app
        .request_json(
            Method::PUT,
            "/api/pages/delivery",
            Some(json!({
                "title": "Доставка",
                "content": "Нові умови доставки.",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request_json(Method::GET, "/api/pages/delivery", None)
        .await;
    assert_eq!(body["data"]["title"], json!("Доставка"));
    assert_eq!(body["data"]["content"], json!("Нові умови доставки."));

    let (status, body) = app.request_json(Method::GET, "/api/pages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(Method::GET, "/api/pages/missing", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Not Found"));
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(
            Method::PUT,
            "/api/pages/about",
            Some(json!({ "title": "", "content": "text" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unconfigured_shipping_api_reports_bad_gateway() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(Method::GET, "/api/shipping/rates?city=Kyiv", None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!("Bad Gateway"));
}
