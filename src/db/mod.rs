use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::article::{ArticleListParams, ArticleSortField, ArticleStatusCounts};
pub use repositories::keyword::{InsertOutcome, NewKeyword};
pub use repositories::quota::IncrementOutcome;
pub use repositories::suggestion_cache::CachedSuggestions;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
        let is_memory = path_str.starts_with(":memory:");
        if !is_memory {
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn keywords(&self) -> repositories::keyword::KeywordRepository {
        repositories::keyword::KeywordRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn suggestion_cache(&self) -> repositories::suggestion_cache::SuggestionCacheRepository {
        repositories::suggestion_cache::SuggestionCacheRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn quota(&self) -> repositories::quota::QuotaRepository {
        repositories::quota::QuotaRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn articles(&self) -> repositories::article::ArticleRepository {
        repositories::article::ArticleRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn style_guides(&self) -> repositories::style_guide::StyleGuideRepository {
        repositories::style_guide::StyleGuideRepository::new(self.conn.clone())
    }
}
