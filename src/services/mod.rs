pub mod prompt;
pub use prompt::{PromptInput, build_prompt};

pub mod keyword_service;
pub mod keyword_service_impl;
pub use keyword_service::{KeywordError, KeywordPage, KeywordService};
pub use keyword_service_impl::SeaOrmKeywordService;

pub mod suggestion_service;
pub use suggestion_service::{
    KeywordResearchProvider, SuggestionError, SuggestionQuery, SuggestionService,
};

pub mod quota_service;
pub use quota_service::{QuotaError, QuotaIncrement, QuotaService};

pub mod article_service;
pub mod article_service_impl;
pub use article_service::{ArticleError, ArticleService};
pub use article_service_impl::SeaOrmArticleService;

pub mod style_guide_service;
pub mod style_guide_service_impl;
pub use style_guide_service::{StyleGuideError, StyleGuideService};
pub use style_guide_service_impl::SeaOrmStyleGuideService;

pub mod generation_service;
pub use generation_service::{ArticleGenerator, GenerationService};
