use crate::handlers::common::success_response;
use crate::services::shipping::ShippingRate;
use crate::{errors::ApiError, AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

pub fn shipping_routes() -> Router<AppState> {
    Router::new().route("/rates", get(rate_quote))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RateQuery {
    /// Destination city
    pub city: String,
}

/// Delivery rate quote from the carrier API
#[utoipa::path(
    get,
    path = "/api/shipping/rates",
    params(RateQuery),
    responses(
        (status = 200, description = "Rates for the city", body = crate::ApiResponse<Vec<ShippingRate>>),
        (status = 502, description = "Carrier API unavailable or not configured", body = crate::errors::ErrorResponse)
    ),
    tag = "Shipping"
)]
pub(crate) async fn rate_quote(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let rates = state.services.shipping.rate_quote(&query.city).await?;
    Ok(success_response(rates))
}
