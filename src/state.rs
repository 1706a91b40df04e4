use std::sync::Arc;

use crate::clients::{DataForSeoClient, GeminiClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ArticleGenerator, ArticleService, GenerationService, KeywordResearchProvider, KeywordService,
    QuotaService, SeaOrmArticleService, SeaOrmKeywordService, SeaOrmStyleGuideService,
    StyleGuideService, SuggestionService,
};

/// Services shared by every request handler.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub keyword_service: Arc<dyn KeywordService>,

    pub suggestion_service: Arc<SuggestionService>,

    pub quota_service: QuotaService,

    pub article_service: Arc<dyn ArticleService>,

    pub style_guide_service: Arc<dyn StyleGuideService>,

    pub generation_service: Arc<GenerationService>,
}

impl SharedState {
    /// Opens the database and wires the live DataForSEO and Gemini clients.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let research = Arc::new(DataForSeoClient::new(&config.dataforseo)?);
        let generator = Arc::new(GeminiClient::new(&config.gemini)?);

        Ok(Self::with_providers(config, store, research, generator))
    }

    /// Wires the services around caller-supplied providers.
    #[must_use]
    pub fn with_providers(
        config: Config,
        store: Store,
        research: Arc<dyn KeywordResearchProvider>,
        generator: Arc<dyn ArticleGenerator>,
    ) -> Self {
        let keyword_service =
            Arc::new(SeaOrmKeywordService::new(store.clone())) as Arc<dyn KeywordService>;
        let suggestion_service = Arc::new(SuggestionService::new(store.clone(), research));
        let quota_service = QuotaService::new(store.clone());
        let article_service =
            Arc::new(SeaOrmArticleService::new(store.clone())) as Arc<dyn ArticleService>;
        let style_guide_service =
            Arc::new(SeaOrmStyleGuideService::new(store.clone())) as Arc<dyn StyleGuideService>;

        let generation_service = Arc::new(GenerationService::new(
            quota_service.clone(),
            style_guide_service.clone(),
            article_service.clone(),
            generator,
        ));

        Self {
            config,
            store,
            keyword_service,
            suggestion_service,
            quota_service,
            article_service,
            style_guide_service,
            generation_service,
        }
    }
}
