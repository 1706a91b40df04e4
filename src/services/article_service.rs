//! Domain service for owner-scoped article storage.
//!
//! Every call is filtered by the caller's user id; another user's article is
//! reported as not found.

use crate::api::{
    ArticleDto, ArticleListResponse, CreateArticleRequest, DashboardStats, UpdateArticleRequest,
};
use crate::constants::articles::{
    MAX_DESCRIPTION_CHARS, MAX_META_DESCRIPTION_CHARS, MAX_META_TITLE_CHARS, MAX_SLUG_CHARS,
    MAX_TITLE_CHARS,
};
use crate::context::RequestContext;
use crate::db::ArticleListParams;
use crate::domain::is_valid_slug;
use crate::services::quota_service::QuotaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("{0}")]
    Validation(String),

    #[error("Article not found")]
    NotFound,

    #[error("Style guide not found")]
    StyleGuideNotFound,

    #[error("Generation quota exceeded ({current} of {limit} used)")]
    QuotaExceeded { current: i32, limit: i32 },

    #[error(transparent)]
    Quota(#[from] QuotaError),

    #[error("AI generation failed: {0}")]
    GenerationFailed(String),

    #[error("{message}")]
    Database { code: &'static str, message: String },
}

impl ArticleError {
    pub const FETCH_ERROR: &'static str = "ARTICLE_FETCH_ERROR";
    pub const CREATE_ERROR: &'static str = "ARTICLE_CREATE_ERROR";
    pub const UPDATE_ERROR: &'static str = "ARTICLE_UPDATE_ERROR";
    pub const DELETE_ERROR: &'static str = "ARTICLE_DELETE_ERROR";

    pub fn database(code: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            code,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ARTICLE_VALIDATION_ERROR",
            Self::NotFound => "ARTICLE_NOT_FOUND",
            Self::StyleGuideNotFound => "STYLE_GUIDE_NOT_FOUND",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::Quota(e) => e.code(),
            Self::GenerationFailed(_) => "AI_GENERATION_FAILED",
            Self::Database { code, .. } => *code,
        }
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ArticleError> {
    if value.chars().count() > max {
        return Err(ArticleError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_required(field: &str, value: &str, max: usize) -> Result<(), ArticleError> {
    if value.trim().is_empty() {
        return Err(ArticleError::Validation(format!("{field} is required")));
    }
    check_len(field, value, max)
}

fn check_slug(slug: &str) -> Result<(), ArticleError> {
    check_required("slug", slug, MAX_SLUG_CHARS)?;
    if !is_valid_slug(slug) {
        return Err(ArticleError::Validation(
            "slug may only contain lowercase letters, digits and single hyphens".to_string(),
        ));
    }
    Ok(())
}

fn check_style_guide_id(id: &str) -> Result<(), ArticleError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ArticleError::Validation("styleGuideId must be a UUID".to_string()))
}

pub fn validate_create(req: &CreateArticleRequest) -> Result<(), ArticleError> {
    check_required("title", &req.title, MAX_TITLE_CHARS)?;
    check_slug(&req.slug)?;
    if req.content.trim().is_empty() {
        return Err(ArticleError::Validation("content is required".to_string()));
    }
    if let Some(d) = &req.description {
        check_len("description", d, MAX_DESCRIPTION_CHARS)?;
    }
    if let Some(t) = &req.meta_title {
        check_len("metaTitle", t, MAX_META_TITLE_CHARS)?;
    }
    if let Some(d) = &req.meta_description {
        check_len("metaDescription", d, MAX_META_DESCRIPTION_CHARS)?;
    }
    if let Some(id) = &req.style_guide_id {
        check_style_guide_id(id)?;
    }
    Ok(())
}

pub fn validate_update(req: &UpdateArticleRequest) -> Result<(), ArticleError> {
    if let Some(t) = &req.title {
        check_required("title", t, MAX_TITLE_CHARS)?;
    }
    if let Some(s) = &req.slug {
        check_slug(s)?;
    }
    if let Some(c) = &req.content
        && c.trim().is_empty()
    {
        return Err(ArticleError::Validation("content must not be empty".to_string()));
    }
    if let Some(d) = &req.description {
        check_len("description", d, MAX_DESCRIPTION_CHARS)?;
    }
    if let Some(t) = &req.meta_title {
        check_len("metaTitle", t, MAX_META_TITLE_CHARS)?;
    }
    if let Some(d) = &req.meta_description {
        check_len("metaDescription", d, MAX_META_DESCRIPTION_CHARS)?;
    }
    if let Some(id) = &req.style_guide_id {
        check_style_guide_id(id)?;
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait ArticleService: Send + Sync {
    /// Stores a new draft owned by the caller.
    async fn create_draft(
        &self,
        ctx: &RequestContext,
        req: CreateArticleRequest,
    ) -> Result<ArticleDto, ArticleError>;

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<ArticleDto, ArticleError>;

    /// Applies the fields present in `req`. Moving to `published` stamps
    /// `publishedAt` only if it has never been set.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateArticleRequest,
    ) -> Result<ArticleDto, ArticleError>;

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), ArticleError>;

    async fn list(
        &self,
        ctx: &RequestContext,
        params: ArticleListParams,
    ) -> Result<ArticleListResponse, ArticleError>;

    async fn stats(&self, ctx: &RequestContext) -> Result<DashboardStats, ArticleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CreateArticleRequest {
        CreateArticleRequest {
            title: "Hello".to_string(),
            slug: "hello-world".to_string(),
            content: "Body".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_create(&draft()).is_ok());
    }

    #[test]
    fn slug_pattern_is_enforced() {
        for slug in ["Hello", "a--b", "-a", "a_b", ""] {
            let req = CreateArticleRequest {
                slug: slug.to_string(),
                ..draft()
            };
            assert!(validate_create(&req).is_err(), "slug {slug:?} accepted");
        }
    }

    #[test]
    fn field_limits() {
        let req = CreateArticleRequest {
            title: "t".repeat(201),
            ..draft()
        };
        assert!(validate_create(&req).is_err());

        let req = CreateArticleRequest {
            meta_title: Some("m".repeat(61)),
            ..draft()
        };
        assert!(validate_create(&req).is_err());

        let req = CreateArticleRequest {
            meta_description: Some("가".repeat(160)),
            ..draft()
        };
        assert!(validate_create(&req).is_ok());

        let req = CreateArticleRequest {
            content: "   ".to_string(),
            ..draft()
        };
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn style_guide_id_must_be_uuid() {
        let req = CreateArticleRequest {
            style_guide_id: Some("not-a-uuid".to_string()),
            ..draft()
        };
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_update(&UpdateArticleRequest::default()).is_ok());
        let bad = UpdateArticleRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&bad).is_err());
    }
}
