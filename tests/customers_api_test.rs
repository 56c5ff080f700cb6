mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_then_login_round_trip() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Наталія",
                "tel": "+380931234567",
                "password": "correct horse",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let profile = &body["data"];
    assert_eq!(profile["name"], json!("Наталія"));
    assert_eq!(profile["tel"], json!("+380931234567"));
    assert_eq!(profile["sale"], json!(0));
    // Credentials never leave the server.
    assert!(profile.get("password_hash").is_none());
    assert!(profile.get("salt").is_none());

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/customers/login",
            Some(json!({
                "tel": "+380931234567",
                "password": "correct horse",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], profile["id"]);
}

#[tokio::test]
async fn duplicate_phone_number_is_rejected() {
    let app = TestApp::new().await;

    let payload = json!({
        "name": "Перший",
        "tel": "+380930000001",
        "password": "password1",
    });
    let (status, _) = app
        .request_json(Method::POST, "/api/customers/register", Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Другий",
                "tel": "+380930000001",
                "password": "password2",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Bad Request"));
}

#[tokio::test]
async fn login_failure_does_not_reveal_which_field_was_wrong() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Ольга",
                "tel": "+380930000002",
                "password": "right-password",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (wrong_pass_status, wrong_pass_body) = app
        .request_json(
            Method::POST,
            "/api/customers/login",
            Some(json!({
                "tel": "+380930000002",
                "password": "wrong-password",
            })),
        )
        .await;
    let (unknown_tel_status, unknown_tel_body) = app
        .request_json(
            Method::POST,
            "/api/customers/login",
            Some(json!({
                "tel": "+380930009999",
                "password": "right-password",
            })),
        )
        .await;

    assert_eq!(wrong_pass_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_tel_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pass_body["message"], unknown_tel_body["message"]);
}

#[tokio::test]
async fn profile_lookup_and_discount_management() {
    let app = TestApp::new().await;

    let (_, body) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Віктор",
                "tel": "+380930000003",
                "password": "some-password",
            })),
        )
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .request_json(
            Method::PUT,
            &format!("/api/customers/{id}/discount"),
            Some(json!({ "sale": 15 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request_json(Method::GET, &format!("/api/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sale"], json!(15));

    // Discount is a percentage.
    let (status, _) = app
        .request_json(
            Method::PUT,
            &format!("/api/customers/{id}/discount"),
            Some(json!({ "sale": 150 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request_json(Method::GET, "/api/customers/999999", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Тест",
                "tel": "+380930000004",
                "password": "abc",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
