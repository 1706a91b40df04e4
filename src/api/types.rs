use serde::{Deserialize, Serialize};

use crate::domain::{
    ArticleStatus, ContentLength, ContentTone, Formality, GuideLanguage, KeywordSource, QuotaTier,
    ReadingLevel,
};
use crate::parser::GeneratedArticle;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDto {
    pub id: String,
    pub phrase: String,
    pub normalized: String,
    pub source: KeywordSource,
    pub search_volume: Option<i64>,
    pub cpc: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Raw list parameters; range checks happen in `validation`.
#[derive(Debug, Default, Deserialize)]
pub struct ListKeywordsQuery {
    pub query: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordListResponse {
    pub items: Vec<KeywordDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateKeywordRequest {
    pub phrase: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateKeywordRequest {
    pub phrase: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateKeywordsRequest {
    pub phrases: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateKeywordsResponse {
    pub created: usize,
    pub skipped: usize,
    pub keywords: Vec<KeywordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestionsRequest {
    pub seeds: Vec<String>,
    pub language_name: Option<String>,
    pub location_code: Option<i32>,
    pub limit: Option<i64>,
    pub force_refresh: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub keyword: String,
    pub search_volume: Option<i64>,
    pub cpc: Option<f64>,
    pub competition: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestionsResponse {
    pub suggestions: Vec<SuggestionItem>,
    pub cached: bool,
    pub cache_expires_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Quota
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatusDto {
    pub allowed: bool,
    pub tier: QuotaTier,
    pub current_count: i32,
    pub limit: i32,
    pub remaining: i32,
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub keywords: Vec<String>,
    pub description: Option<String>,
    pub content: String,
    pub style_guide_id: Option<String>,
    pub tone: Option<ContentTone>,
    pub content_length: Option<ContentLength>,
    pub reading_level: Option<ReadingLevel>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: ArticleStatus,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub description: Option<String>,
    pub content: String,
    pub style_guide_id: Option<String>,
    pub tone: Option<ContentTone>,
    pub content_length: Option<ContentLength>,
    pub reading_level: Option<ReadingLevel>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub style_guide_id: Option<String>,
    pub tone: Option<ContentTone>,
    pub content_length: Option<ContentLength>,
    pub reading_level: Option<ReadingLevel>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub status: Option<ArticleStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArticlesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleDto>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub monthly_articles: u64,
    pub total_articles: u64,
    pub published_articles: u64,
    pub draft_articles: u64,
    pub saved_hours: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArticleRequest {
    pub topic: String,
    pub style_guide_id: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub additional_instructions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateArticleResponse {
    pub article: ArticleDto,
    pub generated_content: GeneratedArticle,
    pub quota_remaining: i32,
}

// ---------------------------------------------------------------------------
// Style guides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleGuideDto {
    pub id: String,
    pub owner_id: String,
    pub brand_name: String,
    pub brand_description: String,
    pub personality: Vec<String>,
    pub formality: Formality,
    pub target_audience: String,
    pub pain_points: String,
    pub language: GuideLanguage,
    pub tone: ContentTone,
    pub content_length: ContentLength,
    pub reading_level: ReadingLevel,
    pub notes: Option<String>,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of the onboarding form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleGuideRequest {
    pub brand_name: String,
    pub brand_description: String,
    pub personality: Vec<String>,
    pub formality: Formality,
    pub target_audience: String,
    pub pain_points: String,
    pub language: GuideLanguage,
    pub tone: ContentTone,
    pub content_length: ContentLength,
    pub reading_level: ReadingLevel,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStyleGuideRequest {
    pub brand_name: Option<String>,
    pub brand_description: Option<String>,
    pub personality: Option<Vec<String>>,
    pub formality: Option<Formality>,
    pub target_audience: Option<String>,
    pub pain_points: Option<String>,
    pub language: Option<GuideLanguage>,
    pub tone: Option<ContentTone>,
    pub content_length: Option<ContentLength>,
    pub reading_level: Option<ReadingLevel>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub uptime_seconds: u64,
}
