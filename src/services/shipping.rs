use crate::errors::ServiceError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::instrument;
use utoipa::ToSchema;

const QUOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the external shipping-rate API. Credentials live in server
/// configuration; when no key is configured the integration is disabled and
/// callers get an explicit error rather than a silent empty quote.
pub struct ShippingService {
    client: reqwest::Client,
    api_url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingRate {
    pub carrier: String,
    pub city: String,
    pub cost: Decimal,
    /// Estimated delivery time in days, when the carrier reports one
    pub days: Option<i32>,
}

impl ShippingService {
    pub fn new(api_url: Option<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(QUOTE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_key.is_some()
    }

    /// Quote delivery rates to a city.
    #[instrument(skip(self))]
    pub async fn rate_quote(&self, city: &str) -> Result<Vec<ShippingRate>, ServiceError> {
        let (Some(url), Some(key)) = (&self.api_url, &self.api_key) else {
            return Err(ServiceError::ExternalServiceError(
                "shipping quotes are not configured".to_string(),
            ));
        };

        let city = city.trim();
        if city.is_empty() {
            return Err(ServiceError::InvalidInput(
                "city must not be empty".to_string(),
            ));
        }

        let response = self
            .client
            .post(url)
            .bearer_auth(key)
            .json(&json!({ "city": city }))
            .send()
            .await
            .map_err(|e| {
                ServiceError::ExternalServiceError(format!("shipping API unreachable: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(ServiceError::ExternalServiceError(format!(
                "shipping API returned {}",
                response.status()
            )));
        }

        response.json::<Vec<ShippingRate>>().await.map_err(|e| {
            ServiceError::ExternalServiceError(format!("unreadable shipping API response: {e}"))
        })
    }
}
