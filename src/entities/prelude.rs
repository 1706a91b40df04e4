pub use super::articles::Entity as Articles;
pub use super::generation_quota::Entity as GenerationQuota;
pub use super::keyword_suggestions_cache::Entity as KeywordSuggestionsCache;
pub use super::keywords::Entity as Keywords;
pub use super::style_guides::Entity as StyleGuides;
