mod common;

use axum::http::{Method, StatusCode};
use common::{price_of, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;
use storefront_api::entities::Gender;

async fn seed_shop(app: &TestApp) {
    let category = app.seed_category("Светри").await;

    let sweater = app
        .seed_product("SW-10", "Светр вовняний", Gender::Men, "зима", category.id)
        .await;
    app.seed_variant(sweater.id, "M", "сірий", 5, dec!(1200), None, 0)
        .await;
    app.seed_variant(sweater.id, "L", "сірий", 0, dec!(1200), None, 0)
        .await;

    // 25% off: checkout must charge the sale price.
    let hoodie = app
        .seed_product("HD-20", "Худі", Gender::Women, "демісезон", category.id)
        .await;
    app.seed_variant(hoodie.id, "S", "рожевий", 3, dec!(1000), Some(dec!(750)), 25)
        .await;
}

#[tokio::test]
async fn checkout_snapshots_server_side_prices() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Олена",
                "tel": "+380501112233",
                "city": "Київ",
                "branch": "Відділення 12",
                "lines": [
                    { "article": "SW-10", "size": "M", "color": "сірий", "quantity": 2 },
                    { "article": "HD-20", "size": "S", "color": "рожевий", "quantity": 1 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let rows = body["data"].as_array().expect("one row per line");
    assert_eq!(rows.len(), 2);

    let sweater = rows.iter().find(|r| r["article"] == json!("SW-10")).unwrap();
    assert_eq!(price_of(&sweater["price"]), 1200.0);
    assert_eq!(sweater["quantity"], json!(2));
    assert_eq!(sweater["product_name"], json!("Светр вовняний"));
    assert_eq!(sweater["city"], json!("Київ"));

    let hoodie = rows.iter().find(|r| r["article"] == json!("HD-20")).unwrap();
    assert_eq!(price_of(&hoodie["price"]), 750.0);
}

#[tokio::test]
async fn checkout_applies_customer_account_discount() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/customers/register",
            Some(json!({
                "name": "Ігор",
                "tel": "+380671234567",
                "password": "secret-pass",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .request_json(
            Method::PUT,
            &format!("/api/customers/{customer_id}/discount"),
            Some(json!({ "sale": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Ігор",
                "tel": "+380671234567",
                "city": "Львів",
                "customer_id": customer_id,
                "lines": [
                    { "article": "SW-10", "size": "M", "color": "сірий", "quantity": 1 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // 1200 minus the flat 10% account discount.
    let rows = body["data"].as_array().unwrap();
    assert_eq!(price_of(&rows[0]["price"]), 1080.0);
}

#[tokio::test]
async fn sold_out_size_cannot_be_ordered() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    // Size L exists but has zero stock.
    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Тест",
                "tel": "+380991112233",
                "city": "Одеса",
                "lines": [
                    { "article": "SW-10", "size": "L", "color": "сірий", "quantity": 1 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Bad Request"));

    // No rows were persisted for the failed checkout line.
    let (_, body) = app.request_json(Method::GET, "/api/orders", None).await;
    assert_eq!(body["data"]["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn rejected_line_rolls_back_the_whole_checkout() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    // First line is available, second is the sold-out size L.
    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Тест",
                "tel": "+380991112233",
                "city": "Одеса",
                "lines": [
                    { "article": "SW-10", "size": "M", "color": "сірий", "quantity": 1 },
                    { "article": "SW-10", "size": "L", "color": "сірий", "quantity": 1 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The in-stock first line must not survive the failed checkout.
    let (_, body) = app.request_json(Method::GET, "/api/orders", None).await;
    assert_eq!(body["data"]["pagination"]["total"], json!(0));
}

#[tokio::test]
async fn unknown_article_fails_checkout() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Тест",
                "tel": "+380991112233",
                "city": "Одеса",
                "lines": [
                    { "article": "GONE-1", "size": "M", "color": "сірий", "quantity": 1 },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_cart_is_rejected() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/orders",
            Some(json!({
                "customer_name": "Тест",
                "tel": "+380991112233",
                "city": "Одеса",
                "lines": [],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quick_order_records_callback_request() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/quick-orders",
            Some(json!({
                "name": "Марія",
                "tel": "+380503334455",
                "article": "HD-20",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["article"], json!("HD-20"));

    // Quick orders reference a real product.
    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/quick-orders",
            Some(json!({
                "name": "Марія",
                "tel": "+380503334455",
                "article": "GONE-1",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request_json(Method::GET, "/api/quick-orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], json!(1));
    assert_eq!(body["data"]["data"][0]["tel"], json!("+380503334455"));
}

#[tokio::test]
async fn admin_order_listing_paginates_newest_first() {
    let app = TestApp::new().await;
    seed_shop(&app).await;

    for i in 0..3 {
        let (status, _) = app
            .request_json(
                Method::POST,
                "/api/orders",
                Some(json!({
                    "customer_name": format!("Покупець {i}"),
                    "tel": format!("+38050000000{i}"),
                    "city": "Київ",
                    "lines": [
                        { "article": "SW-10", "size": "M", "color": "сірий", "quantity": 1 },
                    ],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .request_json(Method::GET, "/api/orders?page=1&per_page=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let payload = &body["data"];
    assert_eq!(payload["pagination"]["total"], json!(3));
    assert_eq!(payload["pagination"]["total_pages"], json!(2));
    let rows = payload["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first.
    assert_eq!(rows[0]["customer_name"], json!("Покупець 2"));

    let (_, body) = app
        .request_json(Method::GET, "/api/orders?page=2&per_page=2", None)
        .await;
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
}
