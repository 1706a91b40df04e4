//! `SeaORM` implementation of the `ArticleService` trait.

use crate::api::{
    ArticleDto, ArticleListResponse, CreateArticleRequest, DashboardStats, UpdateArticleRequest,
};
use crate::constants::quota::HOURS_SAVED_PER_ARTICLE;
use crate::context::RequestContext;
use crate::db::{ArticleListParams, Store};
use crate::domain::{ArticleStatus, format_timestamp, now_timestamp};
use crate::entities::articles;
use crate::services::article_service::{
    ArticleError, ArticleService, validate_create, validate_update,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

pub struct SeaOrmArticleService {
    store: Store,
}

fn parse_optional<T: FromStr>(article_id: &str, field: &str, value: Option<String>) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let value = value?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(article_id, field, error = %e, "Ignoring unreadable article column");
            None
        }
    }
}

/// Midnight UTC on the first day of `now`'s month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[must_use]
pub fn article_to_dto(model: articles::Model) -> ArticleDto {
    let keywords = serde_json::from_str(&model.keywords).unwrap_or_else(|e| {
        warn!(article_id = %model.id, error = %e, "Unreadable article keywords");
        Vec::new()
    });
    let status = model.status.parse().unwrap_or_else(|e| {
        warn!(article_id = %model.id, error = %e, "Unknown article status, reporting draft");
        ArticleStatus::Draft
    });

    ArticleDto {
        tone: parse_optional(&model.id, "tone", model.tone),
        content_length: parse_optional(&model.id, "content_length", model.content_length),
        reading_level: parse_optional(&model.id, "reading_level", model.reading_level),
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        slug: model.slug,
        keywords,
        description: model.description,
        content: model.content,
        style_guide_id: model.style_guide_id,
        meta_title: model.meta_title,
        meta_description: model.meta_description,
        status,
        published_at: model.published_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn encode_keywords(keywords: &[String]) -> Result<String, ArticleError> {
    serde_json::to_string(keywords).map_err(|e| ArticleError::Validation(e.to_string()))
}

impl SeaOrmArticleService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn load(&self, ctx: &RequestContext, id: &str) -> Result<articles::Model, ArticleError> {
        self.store
            .articles()
            .get(&ctx.user_id, id)
            .await
            .map_err(|e| ArticleError::database(ArticleError::FETCH_ERROR, e))?
            .ok_or(ArticleError::NotFound)
    }
}

/// Folds the present fields of `req` into `model`.
fn apply_update(
    model: &mut articles::Model,
    req: UpdateArticleRequest,
    now: &str,
) -> Result<(), ArticleError> {
    if let Some(title) = req.title {
        model.title = title.trim().to_string();
    }
    if let Some(slug) = req.slug {
        model.slug = slug;
    }
    if let Some(keywords) = req.keywords {
        model.keywords = encode_keywords(&keywords)?;
    }
    if let Some(description) = req.description {
        model.description = Some(description);
    }
    if let Some(content) = req.content {
        model.content = content;
    }
    if let Some(id) = req.style_guide_id {
        model.style_guide_id = Some(id);
    }
    if let Some(tone) = req.tone {
        model.tone = Some(tone.as_str().to_string());
    }
    if let Some(length) = req.content_length {
        model.content_length = Some(length.as_str().to_string());
    }
    if let Some(level) = req.reading_level {
        model.reading_level = Some(level.as_str().to_string());
    }
    if let Some(meta_title) = req.meta_title {
        model.meta_title = Some(meta_title);
    }
    if let Some(meta_description) = req.meta_description {
        model.meta_description = Some(meta_description);
    }
    if let Some(status) = req.status {
        model.status = status.as_str().to_string();
        if status == ArticleStatus::Published && model.published_at.is_none() {
            model.published_at = Some(now.to_string());
        }
    }
    model.updated_at = now.to_string();
    Ok(())
}

#[async_trait]
impl ArticleService for SeaOrmArticleService {
    async fn create_draft(
        &self,
        ctx: &RequestContext,
        req: CreateArticleRequest,
    ) -> Result<ArticleDto, ArticleError> {
        validate_create(&req)?;

        let now = now_timestamp();
        let model = articles::Model {
            id: Uuid::new_v4().to_string(),
            owner_id: ctx.user_id.clone(),
            title: req.title.trim().to_string(),
            slug: req.slug,
            keywords: encode_keywords(&req.keywords)?,
            description: req.description,
            content: req.content,
            style_guide_id: req.style_guide_id,
            tone: req.tone.map(|t| t.as_str().to_string()),
            content_length: req.content_length.map(|l| l.as_str().to_string()),
            reading_level: req.reading_level.map(|r| r.as_str().to_string()),
            meta_title: req.meta_title,
            meta_description: req.meta_description,
            status: ArticleStatus::Draft.as_str().to_string(),
            published_at: None,
            created_at: now.clone(),
            updated_at: now,
        };

        let created = self
            .store
            .articles()
            .insert(model)
            .await
            .map_err(|e| ArticleError::database(ArticleError::CREATE_ERROR, e))?;

        info!(
            request_id = %ctx.request_id,
            user_id = %ctx.user_id,
            article_id = %created.id,
            "Article draft created"
        );
        Ok(article_to_dto(created))
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<ArticleDto, ArticleError> {
        self.load(ctx, id).await.map(article_to_dto)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateArticleRequest,
    ) -> Result<ArticleDto, ArticleError> {
        validate_update(&req)?;

        let mut model = self.load(ctx, id).await?;
        apply_update(&mut model, req, &now_timestamp())?;

        let saved = self
            .store
            .articles()
            .save(model)
            .await
            .map_err(|e| ArticleError::database(ArticleError::UPDATE_ERROR, e))?
            .ok_or(ArticleError::NotFound)?;

        info!(request_id = %ctx.request_id, article_id = %id, status = %saved.status, "Article updated");
        Ok(article_to_dto(saved))
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), ArticleError> {
        let deleted = self
            .store
            .articles()
            .delete(&ctx.user_id, id)
            .await
            .map_err(|e| ArticleError::database(ArticleError::DELETE_ERROR, e))?;

        if !deleted {
            return Err(ArticleError::NotFound);
        }

        info!(request_id = %ctx.request_id, article_id = %id, "Article deleted");
        Ok(())
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        params: ArticleListParams,
    ) -> Result<ArticleListResponse, ArticleError> {
        let (rows, total) = self
            .store
            .articles()
            .list(&ctx.user_id, &params)
            .await
            .map_err(|e| ArticleError::database(ArticleError::FETCH_ERROR, e))?;

        Ok(ArticleListResponse {
            articles: rows.into_iter().map(article_to_dto).collect(),
            total,
            limit: params.limit,
            offset: params.offset,
        })
    }

    async fn stats(&self, ctx: &RequestContext) -> Result<DashboardStats, ArticleError> {
        let since = format_timestamp(month_start(Utc::now()));

        let counts = self
            .store
            .articles()
            .status_counts(&ctx.user_id, &since)
            .await
            .map_err(|e| ArticleError::database(ArticleError::FETCH_ERROR, e))?;

        Ok(DashboardStats {
            monthly_articles: counts.created_since,
            total_articles: counts.total,
            published_articles: counts.published,
            draft_articles: counts.draft,
            saved_hours: counts.total * HOURS_SAVED_PER_ARTICLE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> articles::Model {
        articles::Model {
            id: "a1".to_string(),
            owner_id: "user_1".to_string(),
            title: "Title".to_string(),
            slug: "title".to_string(),
            keywords: r#"["seo"]"#.to_string(),
            description: None,
            content: "Body".to_string(),
            style_guide_id: None,
            tone: Some("friendly".to_string()),
            content_length: Some("bogus".to_string()),
            reading_level: None,
            meta_title: None,
            meta_description: None,
            status: "draft".to_string(),
            published_at: None,
            created_at: "2025-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2025-01-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn month_start_is_first_midnight() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 15, 4, 5).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn publish_stamps_once() {
        let mut m = model();
        let publish = || UpdateArticleRequest {
            status: Some(ArticleStatus::Published),
            ..Default::default()
        };

        apply_update(&mut m, publish(), "2025-01-02T00:00:00.000000Z").unwrap();
        assert_eq!(m.published_at.as_deref(), Some("2025-01-02T00:00:00.000000Z"));

        apply_update(&mut m, publish(), "2025-02-02T00:00:00.000000Z").unwrap();
        assert_eq!(m.published_at.as_deref(), Some("2025-01-02T00:00:00.000000Z"));
        assert_eq!(m.updated_at, "2025-02-02T00:00:00.000000Z");
    }

    #[test]
    fn archiving_keeps_published_at() {
        let mut m = model();
        m.status = "published".to_string();
        m.published_at = Some("2025-01-02T00:00:00.000000Z".to_string());
        let archive = UpdateArticleRequest {
            status: Some(ArticleStatus::Archived),
            ..Default::default()
        };
        apply_update(&mut m, archive, "2025-03-01T00:00:00.000000Z").unwrap();
        assert_eq!(m.status, "archived");
        assert!(m.published_at.is_some());
    }

    #[test]
    fn dto_tolerates_bad_columns() {
        let dto = article_to_dto(model());
        assert_eq!(dto.keywords, vec!["seo"]);
        assert_eq!(dto.tone, Some(crate::domain::ContentTone::Friendly));
        assert_eq!(dto.content_length, None);
        assert_eq!(dto.status, ArticleStatus::Draft);
    }
}
