pub mod categories;
pub mod common;
pub mod customers;
pub mod health;
pub mod orders;
pub mod pages;
pub mod products;
pub mod shipping;

use crate::AppState;
use axum::{routing::get, Router};

/// Assembles the `/api` surface.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::products_routes())
        .route("/categories", get(categories::list_categories))
        .route("/seasons", get(categories::list_seasons))
        .nest("/orders", orders::orders_routes())
        .nest("/quick-orders", orders::quick_orders_routes())
        .nest("/customers", customers::customers_routes())
        .nest("/pages", pages::pages_routes())
        .nest("/shipping", shipping::shipping_routes())
}
