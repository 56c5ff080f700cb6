use crate::{
    entities::{order_line, product, quick_order, variant, Customer, OrderLine, OrderLineModel,
        Product, QuickOrder, QuickOrderModel, Variant},
    errors::ServiceError,
    events::{Event, EventSender},
    price::format_price,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

const MAX_LINES_PER_ORDER: usize = 50;

/// Checkout and quick-order persistence. The `card` table is a denormalized
/// one-row-per-item snapshot, so placing an order inserts one row per line.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
    events: EventSender,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub article: String,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderInput {
    pub customer_name: String,
    pub tel: String,
    pub city: String,
    pub branch: Option<String>,
    /// When set, the customer's flat `sale` percentage is applied to every
    /// line price.
    pub customer_id: Option<i32>,
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone)]
pub struct PlaceQuickOrderInput {
    pub name: String,
    pub tel: String,
    pub article: String,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>, events: EventSender) -> Self {
        Self { db, events }
    }

    /// Place a checkout order. Prices are re-read from the variants
    /// server-side; client-sent prices are never trusted. All lines commit
    /// in one transaction, so a rejected line leaves no partial order.
    #[instrument(skip(self, input), fields(lines = input.lines.len()))]
    pub async fn place_order(
        &self,
        input: PlaceOrderInput,
    ) -> Result<Vec<OrderLineModel>, ServiceError> {
        if input.lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "order must contain at least one line".to_string(),
            ));
        }
        if input.lines.len() > MAX_LINES_PER_ORDER {
            return Err(ServiceError::ValidationError(format!(
                "order cannot contain more than {MAX_LINES_PER_ORDER} lines"
            )));
        }

        let discount_percent = match input.customer_id {
            Some(id) => {
                let customer = Customer::find_by_id(id)
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("customer {id} not found")))?;
                customer.sale
            }
            None => 0,
        };

        let now = Utc::now();
        let mut saved = Vec::with_capacity(input.lines.len());
        let mut total = Decimal::ZERO;

        let txn = self.db.begin().await?;
        for line in &input.lines {
            if line.quantity < 1 {
                return Err(ServiceError::ValidationError(format!(
                    "quantity for article {} must be at least 1",
                    line.article
                )));
            }

            let product = Product::find()
                .filter(product::Column::Article.eq(line.article.clone()))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "product with article {} not found",
                        line.article
                    ))
                })?;

            let variant = Variant::find()
                .filter(variant::Column::ProductId.eq(product.id))
                .filter(variant::Column::Size.eq(line.size.clone()))
                .filter(variant::Column::Color.eq(line.color.clone()))
                .filter(variant::Column::Stock.gt(0))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::ValidationError(format!(
                        "article {} in size {} / color {} is not available",
                        line.article, line.size, line.color
                    ))
                })?;

            let unit_price = apply_discount(variant.effective_price(), discount_percent);
            total += unit_price * Decimal::from(line.quantity);

            let row = order_line::ActiveModel {
                id: NotSet,
                customer_name: Set(input.customer_name.clone()),
                tel: Set(input.tel.clone()),
                city: Set(input.city.clone()),
                branch: Set(input.branch.clone()),
                article: Set(product.article.clone()),
                product_name: Set(product.name.clone()),
                size: Set(variant.size.clone()),
                color: Set(variant.color.clone()),
                price: Set(unit_price),
                quantity: Set(line.quantity),
                created_at: Set(now),
            };
            saved.push(row.insert(&txn).await?);
        }
        txn.commit().await?;

        self.events
            .send_or_log(Event::OrderPlaced {
                tel: input.tel.clone(),
                city: input.city.clone(),
                lines: saved.len() as u32,
                total: format_price(total),
            })
            .await;
        info!("placed order: {} lines for tel {}", saved.len(), input.tel);
        Ok(saved)
    }

    /// Record a call-me-back request about one product.
    #[instrument(skip(self))]
    pub async fn place_quick_order(
        &self,
        input: PlaceQuickOrderInput,
    ) -> Result<QuickOrderModel, ServiceError> {
        Product::find()
            .filter(product::Column::Article.eq(input.article.clone()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "product with article {} not found",
                    input.article
                ))
            })?;

        let row = quick_order::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            tel: Set(input.tel.clone()),
            article: Set(input.article.clone()),
            created_at: Set(Utc::now()),
        };
        let saved = row.insert(&*self.db).await?;

        self.events
            .send_or_log(Event::QuickOrderPlaced {
                tel: input.tel,
                article: input.article,
            })
            .await;
        Ok(saved)
    }

    /// Admin listing, newest rows first.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<OrderLineModel>, u64), ServiceError> {
        let paginator = OrderLine::find()
            .order_by_desc(order_line::Column::CreatedAt)
            .order_by_desc(order_line::Column::Id)
            .paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((items, total))
    }

    /// Admin listing, newest rows first.
    #[instrument(skip(self))]
    pub async fn list_quick_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<QuickOrderModel>, u64), ServiceError> {
        let paginator = QuickOrder::find()
            .order_by_desc(quick_order::Column::CreatedAt)
            .order_by_desc(quick_order::Column::Id)
            .paginate(&*self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((items, total))
    }
}

/// Flat percentage discount, rounded to kopecks.
fn apply_discount(price: Decimal, percent: i32) -> Decimal {
    if percent <= 0 {
        return price;
    }
    let percent = Decimal::from(percent.min(100));
    (price * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED).round_dp(2)
}
