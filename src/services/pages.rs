use crate::{
    cache::ResponseCache,
    entities::{page, Page, PageModel},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const CACHE_PREFIX: &str = "pages:";
const PAGE_TTL: Duration = Duration::from_secs(3600);

/// CMS content pages (delivery terms, about, contacts).
#[derive(Clone)]
pub struct PageService {
    db: Arc<DatabaseConnection>,
    cache: Arc<ResponseCache>,
}

#[derive(Debug, Clone)]
pub struct UpsertPageInput {
    pub slug: String,
    pub title: String,
    pub content: String,
}

impl PageService {
    pub fn new(db: Arc<DatabaseConnection>, cache: Arc<ResponseCache>) -> Self {
        Self { db, cache }
    }

    #[instrument(skip(self))]
    pub async fn get_page(&self, slug: &str) -> Result<PageModel, ServiceError> {
        let slug = slug.trim().to_string();
        let key = format!("{CACHE_PREFIX}{slug}");
        let db = self.db.clone();

        self.cache
            .remember(&key, Some(PAGE_TTL), || async move {
                Page::find()
                    .filter(page::Column::Slug.eq(slug.clone()))
                    .one(&*db)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("page {slug} not found")))
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_pages(&self) -> Result<Vec<PageModel>, ServiceError> {
        Ok(Page::find()
            .order_by_asc(page::Column::Slug)
            .all(&*self.db)
            .await?)
    }

    /// Admin: create the page when the slug is new, replace its content
    /// otherwise.
    #[instrument(skip(self, input), fields(slug = %input.slug))]
    pub async fn upsert_page(&self, input: UpsertPageInput) -> Result<PageModel, ServiceError> {
        let existing = Page::find()
            .filter(page::Column::Slug.eq(input.slug.clone()))
            .one(&*self.db)
            .await?;

        let saved = match existing {
            Some(found) => {
                let mut active: page::ActiveModel = found.into();
                active.title = Set(input.title);
                active.content = Set(input.content);
                active.update(&*self.db).await?
            }
            None => {
                let model = page::ActiveModel {
                    id: NotSet,
                    slug: Set(input.slug),
                    title: Set(input.title),
                    content: Set(input.content),
                };
                model.insert(&*self.db).await?
            }
        };

        self.cache.invalidate_prefix(CACHE_PREFIX);
        Ok(saved)
    }
}
