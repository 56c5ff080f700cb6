use crate::entities::{OrderLineModel, QuickOrderModel};
use crate::handlers::common::{
    created_response, normalize_optional_string, normalize_string, success_response,
    validate_input, PaginatedResponse, PaginationParams,
};
use crate::services::orders::{OrderLineRequest, PlaceOrderInput, PlaceQuickOrderInput};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub fn orders_routes() -> Router<AppState> {
    Router::new().route("/", get(list_orders).post(place_order))
}

pub fn quick_orders_routes() -> Router<AppState> {
    Router::new().route("/", get(list_quick_orders).post(place_quick_order))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OrderLinePayload {
    #[validate(length(min = 1, max = 64))]
    pub article: String,
    #[validate(length(min = 1, max = 32))]
    pub size: String,
    #[validate(length(min = 1, max = 64))]
    pub color: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 32))]
    pub tel: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    /// Delivery branch or pickup point
    pub branch: Option<String>,
    /// Registered customer id; applies the account discount when present
    pub customer_id: Option<i32>,
    #[validate]
    pub lines: Vec<OrderLinePayload>,
}

/// Checkout: persist one order row per cart line
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order rows created", body = crate::ApiResponse<Vec<OrderLineModel>>),
        (status = 400, description = "Invalid payload or unavailable item", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown article or customer", body = crate::errors::ErrorResponse)
    ),
    tag = "Orders"
)]
pub(crate) async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = PlaceOrderInput {
        customer_name: normalize_string(payload.customer_name),
        tel: normalize_string(payload.tel),
        city: normalize_string(payload.city),
        branch: normalize_optional_string(payload.branch),
        customer_id: payload.customer_id,
        lines: payload
            .lines
            .into_iter()
            .map(|line| OrderLineRequest {
                article: normalize_string(line.article),
                size: normalize_string(line.size),
                color: normalize_string(line.color),
                quantity: line.quantity,
            })
            .collect(),
    };
    let rows = state.services.orders.place_order(input).await?;
    Ok(created_response(rows))
}

/// Admin: list order rows, newest first
#[utoipa::path(
    get,
    path = "/api/orders",
    params(PaginationParams),
    responses(
        (status = 200, description = "Order rows", body = crate::ApiResponse<PaginatedResponse<OrderLineModel>>)
    ),
    tag = "Orders"
)]
pub(crate) async fn list_orders(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (items, total) = state
        .services
        .orders
        .list_orders(pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        items,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuickOrderRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 5, max = 32))]
    pub tel: String,
    #[validate(length(min = 1, max = 64))]
    pub article: String,
}

/// Call-me-back request about one product
#[utoipa::path(
    post,
    path = "/api/quick-orders",
    request_body = QuickOrderRequest,
    responses(
        (status = 201, description = "Quick order created", body = crate::ApiResponse<QuickOrderModel>),
        (status = 404, description = "Unknown article", body = crate::errors::ErrorResponse)
    ),
    tag = "Orders"
)]
pub(crate) async fn place_quick_order(
    State(state): State<AppState>,
    Json(payload): Json<QuickOrderRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = PlaceQuickOrderInput {
        name: normalize_string(payload.name),
        tel: normalize_string(payload.tel),
        article: normalize_string(payload.article),
    };
    let saved = state.services.orders.place_quick_order(input).await?;
    Ok(created_response(saved))
}

/// Admin: list quick orders, newest first
#[utoipa::path(
    get,
    path = "/api/quick-orders",
    params(PaginationParams),
    responses(
        (status = 200, description = "Quick orders", body = crate::ApiResponse<PaginatedResponse<QuickOrderModel>>)
    ),
    tag = "Orders"
)]
pub(crate) async fn list_quick_orders(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (items, total) = state
        .services
        .orders
        .list_quick_orders(pagination.page, pagination.per_page)
        .await?;
    Ok(success_response(PaginatedResponse::new(
        items,
        pagination.page,
        pagination.per_page,
        total,
    )))
}
