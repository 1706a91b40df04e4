//! AI article generation: quota gate, style guide, prompt, model call,
//! parse, persist as a draft, then count the generation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::api::{
    CreateArticleRequest, GenerateArticleRequest, GenerateArticleResponse, StyleGuideDto,
};
use crate::constants::articles::{
    MAX_META_DESCRIPTION_CHARS, MAX_META_TITLE_CHARS, MAX_TITLE_CHARS,
};
use crate::constants::generation::{MAX_INSTRUCTIONS_CHARS, MAX_KEYWORDS, MAX_TOPIC_CHARS};
use crate::context::RequestContext;
use crate::domain::generate_unique_slug;
use crate::parser::{GeneratedArticle, parse_generated_text};
use crate::services::article_service::{ArticleError, ArticleService};
use crate::services::prompt::{PromptInput, build_prompt};
use crate::services::quota_service::QuotaService;
use crate::services::style_guide_service::{StyleGuideError, StyleGuideService};

/// Text model that turns a prompt into raw article text.
#[async_trait::async_trait]
pub trait ArticleGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

pub struct GenerationService {
    quota: QuotaService,
    style_guides: Arc<dyn StyleGuideService>,
    articles: Arc<dyn ArticleService>,
    generator: Arc<dyn ArticleGenerator>,
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

pub fn validate_generate(req: &GenerateArticleRequest) -> Result<(), ArticleError> {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(ArticleError::Validation("topic is required".to_string()));
    }
    if topic.chars().count() > MAX_TOPIC_CHARS {
        return Err(ArticleError::Validation(format!(
            "topic must be at most {MAX_TOPIC_CHARS} characters"
        )));
    }
    if let Some(extra) = &req.additional_instructions
        && extra.chars().count() > MAX_INSTRUCTIONS_CHARS
    {
        return Err(ArticleError::Validation(format!(
            "additionalInstructions must be at most {MAX_INSTRUCTIONS_CHARS} characters"
        )));
    }
    if let Some(keywords) = &req.keywords
        && keywords.len() > MAX_KEYWORDS
    {
        return Err(ArticleError::Validation(format!(
            "at most {MAX_KEYWORDS} keywords may be given"
        )));
    }
    if let Some(id) = &req.style_guide_id
        && uuid::Uuid::parse_str(id).is_err()
    {
        return Err(ArticleError::Validation(
            "styleGuideId must be a UUID".to_string(),
        ));
    }
    Ok(())
}

/// Draft fields for a parsed model response, clipped to the article limits.
fn draft_from_generated(
    topic: &str,
    generated: &GeneratedArticle,
    guide: Option<&StyleGuideDto>,
    requested_keywords: &[String],
) -> CreateArticleRequest {
    let title = match generated.title.trim() {
        "" => truncate_chars(topic.trim(), MAX_TITLE_CHARS),
        t => truncate_chars(t, MAX_TITLE_CHARS),
    };
    let keywords = if generated.keywords.is_empty() {
        requested_keywords.to_vec()
    } else {
        generated.keywords.clone()
    };

    CreateArticleRequest {
        slug: generate_unique_slug(&title),
        meta_title: Some(truncate_chars(&title, MAX_META_TITLE_CHARS)),
        meta_description: generated
            .meta_description
            .as_deref()
            .map(|d| truncate_chars(d.trim(), MAX_META_DESCRIPTION_CHARS))
            .filter(|d| !d.is_empty()),
        title,
        keywords,
        description: None,
        content: generated.content.clone(),
        style_guide_id: guide.map(|g| g.id.clone()),
        tone: guide.map(|g| g.tone),
        content_length: guide.map(|g| g.content_length),
        reading_level: guide.map(|g| g.reading_level),
    }
}

fn guide_error(err: StyleGuideError) -> ArticleError {
    match err {
        StyleGuideError::NotFound => ArticleError::StyleGuideNotFound,
        other => ArticleError::database(other.code(), other),
    }
}

impl GenerationService {
    #[must_use]
    pub fn new(
        quota: QuotaService,
        style_guides: Arc<dyn StyleGuideService>,
        articles: Arc<dyn ArticleService>,
        generator: Arc<dyn ArticleGenerator>,
    ) -> Self {
        Self {
            quota,
            style_guides,
            articles,
            generator,
        }
    }

    pub async fn generate(
        &self,
        ctx: &RequestContext,
        req: GenerateArticleRequest,
    ) -> Result<GenerateArticleResponse, ArticleError> {
        validate_generate(&req)?;

        let status = self.quota.check(ctx).await?;
        if !status.allowed {
            info!(
                request_id = %ctx.request_id,
                user_id = %ctx.user_id,
                current = status.current_count,
                limit = status.limit,
                "Generation refused, quota exhausted"
            );
            return Err(ArticleError::QuotaExceeded {
                current: status.current_count,
                limit: status.limit,
            });
        }

        let guide = self
            .style_guides
            .resolve(ctx, req.style_guide_id.as_deref())
            .await
            .map_err(guide_error)?;

        let requested_keywords = req.keywords.unwrap_or_default();
        let prompt = build_prompt(&PromptInput {
            topic: req.topic.trim(),
            style_guide: guide.as_ref(),
            keywords: &requested_keywords,
            additional_instructions: req.additional_instructions.as_deref(),
        });

        let started = Instant::now();
        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            metrics::counter!("article_generation_failures_total").increment(1);
            warn!(request_id = %ctx.request_id, error = %e, "Article generation failed");
            ArticleError::GenerationFailed(e.to_string())
        })?;
        metrics::histogram!("article_generation_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let generated = parse_generated_text(&raw);
        if generated.content.trim().is_empty() {
            warn!(request_id = %ctx.request_id, "Model returned no article body");
            return Err(ArticleError::GenerationFailed(
                "model returned an empty article".to_string(),
            ));
        }

        let draft = draft_from_generated(
            &req.topic,
            &generated,
            guide.as_ref(),
            &requested_keywords,
        );
        let article = self.articles.create_draft(ctx, draft).await?;

        // The article is already saved; a failed increment is only logged.
        let quota_remaining = match self.quota.increment(ctx).await {
            Ok(inc) => inc.remaining,
            Err(e) => {
                warn!(
                    request_id = %ctx.request_id,
                    user_id = %ctx.user_id,
                    error = %e,
                    "Failed to record generation against quota"
                );
                (status.remaining - 1).max(0)
            }
        };

        metrics::counter!("articles_generated_total").increment(1);
        info!(
            request_id = %ctx.request_id,
            user_id = %ctx.user_id,
            article_id = %article.id,
            quota_remaining,
            "Article generated"
        );

        Ok(GenerateArticleResponse {
            article,
            generated_content: generated,
            quota_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::is_valid_slug;

    fn generated(title: &str) -> GeneratedArticle {
        GeneratedArticle {
            title: title.to_string(),
            content: "# Body".to_string(),
            meta_description: Some("m".repeat(300)),
            keywords: vec![],
            headings: vec![],
        }
    }

    #[test]
    fn draft_clips_to_article_limits() {
        let long_title = "t".repeat(250);
        let draft = draft_from_generated("topic", &generated(&long_title), None, &[]);
        assert_eq!(draft.title.chars().count(), 200);
        assert_eq!(draft.meta_title.as_deref().map(str::len), Some(60));
        assert_eq!(draft.meta_description.as_deref().map(str::len), Some(160));
        assert!(is_valid_slug(&draft.slug));
        assert!(crate::services::article_service::validate_create(&draft).is_ok());
    }

    #[test]
    fn draft_falls_back_to_topic_and_requested_keywords() {
        let requested = vec!["seo".to_string()];
        let draft = draft_from_generated("검색 최적화", &generated("  "), None, &requested);
        assert_eq!(draft.title, "검색 최적화");
        assert_eq!(draft.keywords, requested);
        assert!(draft.slug.starts_with("article-"));
        assert!(draft.style_guide_id.is_none());
    }

    #[test]
    fn generate_request_bounds() {
        let ok = GenerateArticleRequest {
            topic: "Rust".to_string(),
            ..Default::default()
        };
        assert!(validate_generate(&ok).is_ok());

        let blank = GenerateArticleRequest {
            topic: "  ".to_string(),
            ..Default::default()
        };
        assert!(validate_generate(&blank).is_err());

        let too_many = GenerateArticleRequest {
            topic: "Rust".to_string(),
            keywords: Some((0..21).map(|i| i.to_string()).collect()),
            ..Default::default()
        };
        assert!(validate_generate(&too_many).is_err());

        let bad_id = GenerateArticleRequest {
            topic: "Rust".to_string(),
            style_guide_id: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_generate(&bad_id).unwrap_err().code(),
            "ARTICLE_VALIDATION_ERROR"
        );
    }
}
