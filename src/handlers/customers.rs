use crate::handlers::common::{created_response, normalize_string, success_response, validate_input};
use crate::services::customers::{CustomerProfile, RegisterInput};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, State},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub fn customers_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/:id", get(get_customer))
        .route("/:id/discount", put(set_discount))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 5, max = 32))]
    pub tel: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/api/customers/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer registered", body = crate::ApiResponse<CustomerProfile>),
        (status = 400, description = "Phone already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "Customers"
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = RegisterInput {
        name: normalize_string(payload.name),
        tel: normalize_string(payload.tel),
        password: payload.password,
    };
    let profile = state.services.customers.register(input).await?;
    Ok(created_response(profile))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 5, max = 32))]
    pub tel: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Verify credentials and return the customer profile
#[utoipa::path(
    post,
    path = "/api/customers/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials valid", body = crate::ApiResponse<CustomerProfile>),
        (status = 401, description = "Credentials invalid", body = crate::errors::ErrorResponse)
    ),
    tag = "Customers"
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let profile = state
        .services
        .customers
        .login(payload.tel.trim(), &payload.password)
        .await?;
    Ok(success_response(profile))
}

/// Customer profile by id
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer profile", body = crate::ApiResponse<CustomerProfile>),
        (status = 404, description = "Unknown customer", body = crate::errors::ErrorResponse)
    ),
    tag = "Customers"
)]
pub(crate) async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let profile = state.services.customers.get(id).await?;
    Ok(success_response(profile))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetDiscountRequest {
    #[validate(range(min = 0, max = 100))]
    pub sale: i32,
}

/// Admin: set the flat discount percentage for a customer
#[utoipa::path(
    put,
    path = "/api/customers/{id}/discount",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = SetDiscountRequest,
    responses(
        (status = 200, description = "Discount updated", body = crate::ApiResponse<CustomerProfile>),
        (status = 404, description = "Unknown customer", body = crate::errors::ErrorResponse)
    ),
    tag = "Customers"
)]
pub(crate) async fn set_discount(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SetDiscountRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let profile = state.services.customers.set_discount(id, payload.sale).await?;
    Ok(success_response(profile))
}
