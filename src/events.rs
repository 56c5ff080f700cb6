use crate::notifications::OrderNotifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Domain events emitted by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    OrderPlaced {
        tel: String,
        city: String,
        lines: u32,
        total: String,
    },
    QuickOrderPlaced {
        tel: String,
        article: String,
    },
    CustomerRegistered {
        customer_id: i32,
    },
    ProductCreated {
        product_id: i32,
    },
    ProductUpdated {
        product_id: i32,
    },
    ProductDeleted {
        product_id: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("failed to send event: {e}"))
    }

    /// Send an event, logging instead of failing the caller when the channel
    /// is closed. Event delivery never blocks a storefront operation.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            error!("event not delivered: {e}");
        }
    }
}

/// Drains the event channel, forwarding order events to the chat webhook.
/// Spawned once at startup; exits when all senders are dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>, notifier: Option<Arc<OrderNotifier>>) {
    info!("event processor started");
    while let Some(event) = receiver.recv().await {
        debug!(?event, "processing event");
        match &event {
            Event::OrderPlaced { .. } | Event::QuickOrderPlaced { .. } => {
                if let Some(notifier) = &notifier {
                    notifier.deliver(&event).await;
                }
            }
            _ => {}
        }
    }
    info!("event processor stopped");
}
