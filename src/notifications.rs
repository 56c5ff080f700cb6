//! Chat-webhook delivery for new orders.
//!
//! The storefront used to fire this webhook from the browser with the token
//! embedded in the bundle. It now runs server-side with the token held in
//! configuration; delivery is fire-and-forget and failures only log.

use crate::events::Event;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OrderNotifier {
    client: reqwest::Client,
    webhook_url: String,
    token: Option<String>,
}

impl OrderNotifier {
    pub fn new(webhook_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            webhook_url,
            token,
        }
    }

    fn message_for(event: &Event) -> Option<String> {
        match event {
            Event::OrderPlaced {
                tel,
                city,
                lines,
                total,
            } => Some(format!(
                "Нове замовлення: {lines} поз., {total}, {city}, тел. {tel}"
            )),
            Event::QuickOrderPlaced { tel, article } => Some(format!(
                "Швидке замовлення: артикул {article}, тел. {tel}"
            )),
            _ => None,
        }
    }

    /// Post a human-readable line about the event to the chat webhook.
    pub async fn deliver(&self, event: &Event) {
        let Some(text) = Self::message_for(event) else {
            return;
        };

        let mut request = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "text": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                debug!("order notification delivered");
            }
            Ok(response) => {
                warn!(status = %response.status(), "order notification rejected");
            }
            Err(e) => {
                warn!("order notification failed: {e}");
            }
        }
    }
}
