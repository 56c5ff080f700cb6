#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use storefront_api::{
    cache::ResponseCache,
    config::AppConfig,
    db,
    entities::{category, CategoryModel, Gender, ProductModel, VariantModel},
    events::{self, EventSender},
    services::catalog::{CreateProductInput, CreateVariantInput},
    services::AppServices,
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Test harness: the full application router backed by a throwaway SQLite
/// file, exercised with in-process requests.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: tempfile::TempDir,
}

impl TestApp {
    /// Construct a test application with a fresh database.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir for test database");
        let db_path = db_dir.path().join("storefront_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx, None));

        let cache = Arc::new(ResponseCache::new(Duration::from_secs(cfg.cache_ttl_secs)));
        let services = AppServices::new(db_arc.clone(), event_sender.clone(), cache.clone(), &cfg);

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            cache,
            services,
        };
        let router = storefront_api::app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    /// Send a JSON request against the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a request and decode the JSON body.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn seed_category(&self, name: &str) -> CategoryModel {
        category::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed category")
    }

    pub async fn seed_product(
        &self,
        article: &str,
        name: &str,
        gender: Gender,
        season: &str,
        category_id: i32,
    ) -> ProductModel {
        self.state
            .services
            .catalog
            .create_product(CreateProductInput {
                article: article.to_string(),
                name: name.to_string(),
                gender,
                season: season.to_string(),
                category_id,
                image: None,
            })
            .await
            .expect("seed product")
    }

    pub async fn seed_variant(
        &self,
        product_id: i32,
        size: &str,
        color: &str,
        stock: i32,
        purchase_price: Decimal,
        sale_price: Option<Decimal>,
        discount: i32,
    ) -> VariantModel {
        self.state
            .services
            .catalog
            .create_variant(CreateVariantInput {
                product_id,
                size: size.to_string(),
                color: color.to_string(),
                barcode: None,
                stock,
                purchase_price,
                sale_price,
                new_price: None,
                discount,
            })
            .await
            .expect("seed variant")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Decode a response body as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not valid json")
    }
}

/// Numeric value of a JSON price field; SQLite round-trips decimals with
/// varying scale, so comparisons go through f64.
pub fn price_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().expect("numeric price"),
        Value::String(s) => s.parse().expect("price string parses as number"),
        other => panic!("unexpected price representation: {other}"),
    }
}
