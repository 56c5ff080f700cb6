use crate::entities::PageModel;
use crate::handlers::common::{normalize_string, success_response, validate_input};
use crate::services::pages::UpsertPageInput;
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub fn pages_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pages))
        .route("/:slug", get(get_page).put(upsert_page))
}

/// All content pages
#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = 200, description = "Content pages", body = crate::ApiResponse<Vec<PageModel>>)
    ),
    tag = "Pages"
)]
pub(crate) async fn list_pages(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let pages = state.services.pages.list_pages().await?;
    Ok(success_response(pages))
}

/// Content page by slug
#[utoipa::path(
    get,
    path = "/api/pages/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Page content", body = crate::ApiResponse<PageModel>),
        (status = 404, description = "Unknown page", body = crate::errors::ErrorResponse)
    ),
    tag = "Pages"
)]
pub(crate) async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let page = state.services.pages.get_page(&slug).await?;
    Ok(success_response(page))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertPageRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub content: String,
}

/// Admin: create or replace a content page
#[utoipa::path(
    put,
    path = "/api/pages/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    request_body = UpsertPageRequest,
    responses(
        (status = 200, description = "Page saved", body = crate::ApiResponse<PageModel>),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Pages"
)]
pub(crate) async fn upsert_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpsertPageRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let slug = normalize_string(slug);
    if slug.is_empty() {
        return Err(ApiError::ValidationError("slug cannot be blank".to_string()));
    }

    let input = UpsertPageInput {
        slug,
        title: normalize_string(payload.title),
        content: payload.content,
    };
    let page = state.services.pages.upsert_page(input).await?;
    Ok(success_response(page))
}
