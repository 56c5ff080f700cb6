use crate::entities::{Gender, ProductModel, VariantModel};
use crate::handlers::common::{
    created_response, no_content_response, normalize_optional_string, normalize_string,
    success_response, validate_input,
};
use crate::services::catalog::{
    CreateProductInput, CreateVariantInput, ListedProduct, ProductDetail, ProductFilter,
    UpdateProductInput, UpdateVariantInput,
};
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Creates the router for product endpoints. Lookup by article is the
/// storefront path; numeric-id routes are the admin surface.
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/random", get(random_products))
        .route("/:article", get(get_product))
        .route("/id/:id", put(update_product).delete(delete_product))
        .route("/id/:id/variants", post(create_variant))
        .route(
            "/variants/:variant_id",
            put(update_variant).delete(delete_variant),
        )
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Catalog partition token (чол, жін, хлопч, дівч)
    pub gender: Option<Gender>,
    pub category_id: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Only products with at least one in-stock variant (default true)
    pub in_stock: Option<bool>,
    pub limit: Option<u64>,
}

/// Filtered catalog listing
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Catalog listing", body = crate::ApiResponse<Vec<ListedProduct>>),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(ApiError::ValidationError(
                "min_price cannot exceed max_price".to_string(),
            ));
        }
    }

    let filter = ProductFilter {
        gender: query.gender,
        category_id: query.category_id,
        min_price: query.min_price,
        max_price: query.max_price,
        in_stock_only: query.in_stock.unwrap_or(true),
        limit: query.limit,
    };
    let products = state.services.catalog.list_products(filter).await?;
    Ok(success_response(products))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Text matched against product name and article
    pub q: String,
    pub limit: Option<u64>,
}

/// Text search across the catalog
#[utoipa::path(
    get,
    path = "/api/products/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = crate::ApiResponse<Vec<ListedProduct>>),
        (status = 400, description = "Empty query", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if query.q.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "search query cannot be empty".to_string(),
        ));
    }
    let products = state
        .services
        .catalog
        .search_products(&query.q, query.limit)
        .await?;
    Ok(success_response(products))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RandomQuery {
    pub limit: Option<u64>,
}

/// Random in-stock sample for showcase blocks
#[utoipa::path(
    get,
    path = "/api/products/random",
    params(RandomQuery),
    responses(
        (status = 200, description = "Random products", body = crate::ApiResponse<Vec<ListedProduct>>)
    ),
    tag = "Products"
)]
pub(crate) async fn random_products(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let products = state.services.catalog.random_products(query.limit).await?;
    Ok(success_response(products))
}

/// Product detail by article
#[utoipa::path(
    get,
    path = "/api/products/{article}",
    params(("article" = String, Path, description = "Product article (SKU string)")),
    responses(
        (status = 200, description = "Product with variants", body = crate::ApiResponse<ProductDetail>),
        (status = 404, description = "Unknown article", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn get_product(
    State(state): State<AppState>,
    Path(article): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state.services.catalog.get_product(&article).await?;
    Ok(success_response(detail))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 64))]
    pub article: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub gender: Gender,
    #[validate(length(min = 1, max = 64))]
    pub season: String,
    pub category_id: i32,
    pub image: Option<String>,
}

/// Admin: create a product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = crate::ApiResponse<ProductModel>),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let article = normalize_string(payload.article);
    let name = normalize_string(payload.name);
    if article.is_empty() || name.is_empty() {
        return Err(ApiError::ValidationError(
            "article and name cannot be blank".to_string(),
        ));
    }

    let input = CreateProductInput {
        article,
        name,
        gender: payload.gender,
        season: normalize_string(payload.season),
        category_id: payload.category_id,
        image: normalize_optional_string(payload.image),
    };
    let product = state.services.catalog.create_product(input).await?;
    Ok(created_response(product))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 64))]
    pub article: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub gender: Option<Gender>,
    #[validate(length(min = 1, max = 64))]
    pub season: Option<String>,
    pub category_id: Option<i32>,
    pub image: Option<String>,
}

/// Admin: update a product
#[utoipa::path(
    put,
    path = "/api/products/id/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = crate::ApiResponse<ProductModel>),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let input = UpdateProductInput {
        article: normalize_optional_string(payload.article),
        name: normalize_optional_string(payload.name),
        gender: payload.gender,
        season: normalize_optional_string(payload.season),
        category_id: payload.category_id,
        image: normalize_optional_string(payload.image),
    };
    let product = state.services.catalog.update_product(id, input).await?;
    Ok(success_response(product))
}

/// Admin: delete a product and its variants
#[utoipa::path(
    delete,
    path = "/api/products/id/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state.services.catalog.delete_product(id).await?;
    Ok(no_content_response())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVariantRequest {
    #[validate(length(min = 1, max = 32))]
    pub size: String,
    #[validate(length(min = 1, max = 64))]
    pub color: String,
    pub barcode: Option<String>,
    pub stock: i32,
    pub purchase_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    #[serde(default)]
    pub discount: i32,
}

/// Admin: add a variant to a product
#[utoipa::path(
    post,
    path = "/api/products/id/{id}/variants",
    params(("id" = i32, Path, description = "Product id")),
    request_body = CreateVariantRequest,
    responses(
        (status = 201, description = "Variant created", body = crate::ApiResponse<VariantModel>),
        (status = 404, description = "Unknown product", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn create_variant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateVariantRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    ensure_non_negative(&payload.purchase_price, "purchase_price")?;
    if let Some(price) = payload.sale_price.as_ref() {
        ensure_non_negative(price, "sale_price")?;
    }
    if let Some(price) = payload.new_price.as_ref() {
        ensure_non_negative(price, "new_price")?;
    }
    if payload.stock < 0 {
        return Err(ApiError::ValidationError(
            "stock cannot be negative".to_string(),
        ));
    }

    let input = CreateVariantInput {
        product_id: id,
        size: normalize_string(payload.size),
        color: normalize_string(payload.color),
        barcode: normalize_optional_string(payload.barcode),
        stock: payload.stock,
        purchase_price: payload.purchase_price,
        sale_price: payload.sale_price,
        new_price: payload.new_price,
        discount: payload.discount,
    };
    let variant = state.services.catalog.create_variant(input).await?;
    Ok(created_response(variant))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVariantRequest {
    #[validate(length(min = 1, max = 32))]
    pub size: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub color: Option<String>,
    pub barcode: Option<String>,
    pub stock: Option<i32>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub discount: Option<i32>,
}

/// Admin: update a variant
#[utoipa::path(
    put,
    path = "/api/products/variants/{variant_id}",
    params(("variant_id" = i32, Path, description = "Variant id")),
    request_body = UpdateVariantRequest,
    responses(
        (status = 200, description = "Variant updated", body = crate::ApiResponse<VariantModel>),
        (status = 404, description = "Unknown variant", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn update_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    Json(payload): Json<UpdateVariantRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    for (price, field) in [
        (payload.purchase_price.as_ref(), "purchase_price"),
        (payload.sale_price.as_ref(), "sale_price"),
        (payload.new_price.as_ref(), "new_price"),
    ] {
        if let Some(price) = price {
            ensure_non_negative(price, field)?;
        }
    }
    if matches!(payload.stock, Some(stock) if stock < 0) {
        return Err(ApiError::ValidationError(
            "stock cannot be negative".to_string(),
        ));
    }

    let input = UpdateVariantInput {
        size: normalize_optional_string(payload.size),
        color: normalize_optional_string(payload.color),
        barcode: normalize_optional_string(payload.barcode),
        stock: payload.stock,
        purchase_price: payload.purchase_price,
        sale_price: payload.sale_price,
        new_price: payload.new_price,
        discount: payload.discount,
    };
    let variant = state
        .services
        .catalog
        .update_variant(variant_id, input)
        .await?;
    Ok(success_response(variant))
}

/// Admin: delete a variant
#[utoipa::path(
    delete,
    path = "/api/products/variants/{variant_id}",
    params(("variant_id" = i32, Path, description = "Variant id")),
    responses(
        (status = 204, description = "Variant deleted"),
        (status = 404, description = "Unknown variant", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub(crate) async fn delete_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state.services.catalog.delete_variant(variant_id).await?;
    Ok(no_content_response())
}

fn ensure_non_negative(value: &Decimal, field: &str) -> Result<(), ApiError> {
    if *value < Decimal::ZERO {
        return Err(ApiError::ValidationError(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(())
}
