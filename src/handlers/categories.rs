use crate::entities::CategoryModel;
use crate::handlers::common::success_response;
use crate::{errors::ApiError, AppState};
use axum::extract::State;

/// Category reference list
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = crate::ApiResponse<Vec<CategoryModel>>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let categories = state.services.catalog.list_categories().await?;
    Ok(success_response(categories))
}

/// Distinct season tokens present in the catalog
#[utoipa::path(
    get,
    path = "/api/seasons",
    responses(
        (status = 200, description = "Season tokens", body = crate::ApiResponse<Vec<String>>)
    ),
    tag = "Catalog"
)]
pub async fn list_seasons(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let seasons = state.services.catalog.list_seasons().await?;
    Ok(success_response(seasons))
}
