use crate::{
    cache::ResponseCache,
    entities::{product, variant, Category, CategoryModel, Gender, Product, Variant},
    errors::ServiceError,
    events::{Event, EventSender},
    price::format_price,
    services::dedup_by_key,
};
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Func, SimpleExpr},
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 100;

/// Every memoized catalog read lives under this key prefix so admin writes
/// can flush them all at once.
const CACHE_PREFIX: &str = "catalog:";
/// Categories and seasons change rarely; cache them longer than listings.
const REFERENCE_TTL: Duration = Duration::from_secs(3600);
/// Upper bound on rows pulled as the pool for the random showcase.
const RANDOM_POOL: u64 = 200;

/// Catalog read/write service. Reads join in-stock variants, collapse the
/// per-variant fan-out by `(product_id, price)`, and are memoized in the TTL
/// cache keyed by their serialized parameters.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
    cache: Arc<ResponseCache>,
    events: EventSender,
}

/// Listing filter. Price bounds apply to the effective variant price
/// (`sale_price` while discounted, `purchase_price` otherwise) inside the
/// SQL predicate.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFilter {
    pub gender: Option<Gender>,
    pub category_id: Option<i32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock_only: bool,
    pub limit: Option<u64>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            gender: None,
            category_id: None,
            min_price: None,
            max_price: None,
            in_stock_only: true,
            limit: None,
        }
    }
}

impl ProductFilter {
    fn cache_key(&self) -> String {
        format!(
            "{CACHE_PREFIX}list:g={:?}:c={:?}:min={:?}:max={:?}:stock={}:limit={:?}",
            self.gender,
            self.category_id,
            self.min_price,
            self.max_price,
            self.in_stock_only,
            self.limit
        )
    }
}

/// One catalog listing row: a product paired with the price of one of its
/// purchasable variants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListedProduct {
    pub id: i32,
    pub article: String,
    pub name: String,
    pub gender: Gender,
    pub season: String,
    pub category_id: i32,
    pub image: Option<String>,
    pub price: Decimal,
    /// Pre-discount price, present only while a discount is running
    pub old_price: Option<Decimal>,
    pub discount: i32,
    /// Locale display string, e.g. "2\u{a0}109,0 грн"
    pub display_price: String,
}

impl ListedProduct {
    fn from_row(product: product::Model, variant: variant::Model) -> Self {
        let price = variant.effective_price();
        Self {
            id: product.id,
            article: product.article,
            name: product.name,
            gender: product.gender,
            season: product.season,
            category_id: product.category_id,
            image: product.image,
            price,
            old_price: variant.crossed_out_price(),
            discount: variant.discount,
            display_price: format_price(price),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantView {
    pub id: i32,
    pub size: String,
    pub color: String,
    pub barcode: Option<String>,
    pub stock: i32,
    pub in_stock: bool,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub discount: i32,
    pub display_price: String,
}

impl From<variant::Model> for VariantView {
    fn from(v: variant::Model) -> Self {
        let price = v.effective_price();
        Self {
            id: v.id,
            in_stock: v.in_stock(),
            old_price: v.crossed_out_price(),
            display_price: format_price(price),
            price,
            size: v.size,
            color: v.color,
            barcode: v.barcode,
            stock: v.stock,
            new_price: v.new_price,
            discount: v.discount,
        }
    }
}

/// Product detail page payload: the product plus all of its variants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: i32,
    pub article: String,
    pub name: String,
    pub gender: Gender,
    pub season: String,
    pub category_id: i32,
    pub image: Option<String>,
    pub variants: Vec<VariantView>,
}

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub article: String,
    pub name: String,
    pub gender: Gender,
    pub season: String,
    pub category_id: i32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub article: Option<String>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub season: Option<String>,
    pub category_id: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateVariantInput {
    pub product_id: i32,
    pub size: String,
    pub color: String,
    pub barcode: Option<String>,
    pub stock: i32,
    pub purchase_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub discount: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVariantInput {
    pub size: Option<String>,
    pub color: Option<String>,
    pub barcode: Option<String>,
    pub stock: Option<i32>,
    pub purchase_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub discount: Option<i32>,
}

impl CatalogService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        cache: Arc<ResponseCache>,
        events: EventSender,
    ) -> Self {
        Self { db, cache, events }
    }

    /// Filtered catalog listing.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ListedProduct>, ServiceError> {
        let key = filter.cache_key();
        let db = self.db.clone();
        self.cache
            .remember(&key, None, || async move {
                Self::query_products(&db, &filter).await
            })
            .await
    }

    /// Text search across product name and article.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &str,
        limit: Option<u64>,
    ) -> Result<Vec<ListedProduct>, ServiceError> {
        let trimmed = query.trim().to_string();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let limit = clamp_limit(limit);
        let key = format!("{CACHE_PREFIX}search:{trimmed}:{limit}");
        let db = self.db.clone();

        self.cache
            .remember(&key, None, || async move {
                let pattern = format!("%{trimmed}%");
                let rows = Product::find()
                    .find_also_related(Variant)
                    .filter(
                        Condition::any()
                            .add(product::Column::Name.like(&pattern))
                            .add(product::Column::Article.like(&pattern)),
                    )
                    .filter(variant::Column::Stock.gt(0))
                    .order_by_asc(product::Column::Id)
                    .order_by_asc(variant::Column::Id)
                    .limit(limit)
                    .all(&*db)
                    .await?;
                Ok(collapse_rows(rows))
            })
            .await
    }

    /// Random in-stock sample for showcase blocks. Not memoized: a cached
    /// sample would stop being random. The pool itself is drawn in random
    /// order so every product can appear, however large the catalog.
    #[instrument(skip(self))]
    pub async fn random_products(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<ListedProduct>, ServiceError> {
        let limit = clamp_limit(limit);
        let rows = Product::find()
            .find_also_related(Variant)
            .filter(variant::Column::Stock.gt(0))
            .order_by(SimpleExpr::FunctionCall(Func::random()), Order::Asc)
            .limit(RANDOM_POOL)
            .all(&*self.db)
            .await?;

        let mut items = collapse_rows(rows);
        items.shuffle(&mut rand::thread_rng());
        items.truncate(limit as usize);
        Ok(items)
    }

    /// Detail page lookup by article. Unknown articles are a `NotFound`
    /// error, not an empty result.
    #[instrument(skip(self))]
    pub async fn get_product(&self, article: &str) -> Result<ProductDetail, ServiceError> {
        let article = article.trim().to_string();
        let key = format!("{CACHE_PREFIX}detail:{article}");
        let db = self.db.clone();

        self.cache
            .remember(&key, None, || async move {
                let product = Product::find()
                    .filter(product::Column::Article.eq(article.clone()))
                    .one(&*db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("product with article {article} not found"))
                    })?;

                let variants = Variant::find()
                    .filter(variant::Column::ProductId.eq(product.id))
                    .order_by_asc(variant::Column::Id)
                    .all(&*db)
                    .await?;

                Ok(ProductDetail {
                    id: product.id,
                    article: product.article,
                    name: product.name,
                    gender: product.gender,
                    season: product.season,
                    category_id: product.category_id,
                    image: product.image,
                    variants: variants.into_iter().map(VariantView::from).collect(),
                })
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<CategoryModel>, ServiceError> {
        let db = self.db.clone();
        self.cache
            .remember(
                &format!("{CACHE_PREFIX}categories"),
                Some(REFERENCE_TTL),
                || async move {
                    Ok(Category::find()
                        .order_by_asc(crate::entities::category::Column::Id)
                        .all(&*db)
                        .await?)
                },
            )
            .await
    }

    /// Distinct season tokens present in the catalog.
    #[instrument(skip(self))]
    pub async fn list_seasons(&self) -> Result<Vec<String>, ServiceError> {
        let db = self.db.clone();
        self.cache
            .remember(
                &format!("{CACHE_PREFIX}seasons"),
                Some(REFERENCE_TTL),
                || async move {
                    Ok(Product::find()
                        .select_only()
                        .column(product::Column::Season)
                        .distinct()
                        .order_by_asc(product::Column::Season)
                        .into_tuple::<String>()
                        .all(&*db)
                        .await?)
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        self.ensure_unique_article(&input.article, None).await?;

        let model = product::ActiveModel {
            id: NotSet,
            article: Set(input.article),
            name: Set(input.name),
            gender: Set(input.gender),
            season: Set(input.season),
            category_id: Set(input.category_id),
            image: Set(input.image),
        };
        let product = model.insert(&*self.db).await?;

        self.cache.invalidate_prefix(CACHE_PREFIX);
        self.events
            .send_or_log(Event::ProductCreated {
                product_id: product.id,
            })
            .await;
        info!("created product {} ({})", product.id, product.article);
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: i32,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        if let Some(article) = &input.article {
            self.ensure_unique_article(article, Some(product_id)).await?;
        }

        let product = Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {product_id} not found")))?;

        let mut active: product::ActiveModel = product.into();
        if let Some(article) = input.article {
            active.article = Set(article);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(gender) = input.gender {
            active.gender = Set(gender);
        }
        if let Some(season) = input.season {
            active.season = Set(season);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }

        let product = active.update(&*self.db).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX);
        self.events
            .send_or_log(Event::ProductUpdated {
                product_id: product.id,
            })
            .await;
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i32) -> Result<(), ServiceError> {
        Variant::delete_many()
            .filter(variant::Column::ProductId.eq(product_id))
            .exec(&*self.db)
            .await?;
        let res = Product::delete_by_id(product_id).exec(&*self.db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "product {product_id} not found"
            )));
        }

        self.cache.invalidate_prefix(CACHE_PREFIX);
        self.events
            .send_or_log(Event::ProductDeleted { product_id })
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn create_variant(
        &self,
        input: CreateVariantInput,
    ) -> Result<variant::Model, ServiceError> {
        Product::find_by_id(input.product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("product {} not found", input.product_id))
            })?;

        let model = variant::ActiveModel {
            id: NotSet,
            product_id: Set(input.product_id),
            size: Set(input.size),
            color: Set(input.color),
            barcode: Set(input.barcode),
            stock: Set(input.stock),
            purchase_price: Set(input.purchase_price),
            sale_price: Set(input.sale_price),
            new_price: Set(input.new_price),
            discount: Set(input.discount),
        };
        let variant = model.insert(&*self.db).await?;

        self.cache.invalidate_prefix(CACHE_PREFIX);
        info!(
            "created variant {} for product {}",
            variant.id, variant.product_id
        );
        Ok(variant)
    }

    #[instrument(skip(self))]
    pub async fn update_variant(
        &self,
        variant_id: i32,
        input: UpdateVariantInput,
    ) -> Result<variant::Model, ServiceError> {
        let variant = Variant::find_by_id(variant_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("variant {variant_id} not found")))?;

        let mut active: variant::ActiveModel = variant.into();
        if let Some(size) = input.size {
            active.size = Set(size);
        }
        if let Some(color) = input.color {
            active.color = Set(color);
        }
        if let Some(barcode) = input.barcode {
            active.barcode = Set(Some(barcode));
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        if let Some(price) = input.purchase_price {
            active.purchase_price = Set(price);
        }
        if let Some(price) = input.sale_price {
            active.sale_price = Set(Some(price));
        }
        if let Some(price) = input.new_price {
            active.new_price = Set(Some(price));
        }
        if let Some(discount) = input.discount {
            active.discount = Set(discount);
        }

        let variant = active.update(&*self.db).await?;
        self.cache.invalidate_prefix(CACHE_PREFIX);
        Ok(variant)
    }

    #[instrument(skip(self))]
    pub async fn delete_variant(&self, variant_id: i32) -> Result<(), ServiceError> {
        let res = Variant::delete_by_id(variant_id).exec(&*self.db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "variant {variant_id} not found"
            )));
        }
        self.cache.invalidate_prefix(CACHE_PREFIX);
        Ok(())
    }

    async fn query_products(
        db: &DatabaseConnection,
        filter: &ProductFilter,
    ) -> Result<Vec<ListedProduct>, ServiceError> {
        let mut condition = Condition::all();
        if let Some(gender) = filter.gender {
            condition = condition.add(product::Column::Gender.eq(gender));
        }
        if let Some(category_id) = filter.category_id {
            condition = condition.add(product::Column::CategoryId.eq(category_id));
        }

        let mut query = Product::find().find_also_related(Variant).filter(condition);
        if filter.in_stock_only {
            query = query.filter(variant::Column::Stock.gt(0));
        }
        if filter.min_price.is_some() || filter.max_price.is_some() {
            query = query.filter(effective_price_between(filter.min_price, filter.max_price));
        }

        let rows = query
            .order_by_asc(product::Column::Id)
            .order_by_asc(variant::Column::Id)
            .limit(clamp_limit(filter.limit))
            .all(db)
            .await?;

        Ok(collapse_rows(rows))
    }

    async fn ensure_unique_article(
        &self,
        article: &str,
        exclude: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = Product::find().filter(product::Column::Article.eq(article));
        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "article {article} is already taken"
            )));
        }
        Ok(())
    }
}

fn clamp_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Collapse the variant fan-out of a joined query: one listing row per
/// distinct `(product_id, effective price)` pair, first variant wins.
fn collapse_rows(rows: Vec<(product::Model, Option<variant::Model>)>) -> Vec<ListedProduct> {
    let listed = rows
        .into_iter()
        .filter_map(|(p, v)| v.map(|v| ListedProduct::from_row(p, v)));
    dedup_by_key(listed, |item| (item.id, item.price))
}

/// Price-range predicate over the effective price, expressed in SQL:
/// discounted variants match on `sale_price`, the rest on `purchase_price`.
fn effective_price_between(min: Option<Decimal>, max: Option<Decimal>) -> Condition {
    let mut discounted = Condition::all().add(variant::Column::Discount.gt(0));
    let mut regular = Condition::all().add(variant::Column::Discount.lte(0));

    if let Some(min) = min {
        discounted = discounted.add(variant::Column::SalePrice.gte(min));
        regular = regular.add(variant::Column::PurchasePrice.gte(min));
    }
    if let Some(max) = max {
        discounted = discounted.add(variant::Column::SalePrice.lte(max));
        regular = regular.add(variant::Column::PurchasePrice.lte(max));
    }

    Condition::any().add(discounted).add(regular)
}
