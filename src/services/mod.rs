pub mod catalog;
pub mod customers;
pub mod orders;
pub mod pages;
pub mod shipping;

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::events::EventSender;
use sea_orm::DatabaseConnection;

/// Aggregates the service layer for HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<catalog::CatalogService>,
    pub orders: Arc<orders::OrderService>,
    pub customers: Arc<customers::CustomerService>,
    pub pages: Arc<pages::PageService>,
    pub shipping: Arc<shipping::ShippingService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        events: EventSender,
        cache: Arc<ResponseCache>,
        cfg: &AppConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog::CatalogService::new(
                db.clone(),
                cache.clone(),
                events.clone(),
            )),
            orders: Arc::new(orders::OrderService::new(db.clone(), events.clone())),
            customers: Arc::new(customers::CustomerService::new(db.clone(), events)),
            pages: Arc::new(pages::PageService::new(db, cache)),
            shipping: Arc::new(shipping::ShippingService::new(
                cfg.shipping_api_url.clone(),
                cfg.shipping_api_key.clone(),
            )),
        }
    }
}

/// Keep the first item for each distinct derived key, preserving input order.
///
/// Joined catalog queries yield one row per variant; every listing collapses
/// that fan-out through this single helper instead of reimplementing it.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dedup_by_key;

    #[test]
    fn keeps_first_per_key_in_order() {
        let rows = vec![(1, "a"), (1, "b"), (2, "a"), (1, "a"), (3, "c")];
        let out = dedup_by_key(rows, |(id, tag)| (*id, *tag));
        assert_eq!(out, vec![(1, "a"), (1, "b"), (2, "a"), (3, "c")]);
    }

    #[test]
    fn empty_input() {
        let out: Vec<i32> = dedup_by_key(Vec::<i32>::new(), |x| *x);
        assert!(out.is_empty());
    }
}
