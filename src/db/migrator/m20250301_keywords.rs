use crate::entities::prelude::*;
use crate::entities::{generation_quota, keyword_suggestions_cache, keywords};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // `keywords.normalized` carries the unique index that bulk import
        // relies on for ON CONFLICT DO NOTHING.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Keywords)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_keywords_created_at")
                    .table(Keywords)
                    .col(keywords::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(KeywordSuggestionsCache)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_suggestions_cache_locale_expiry")
                    .table(KeywordSuggestionsCache)
                    .col(keyword_suggestions_cache::Column::LanguageName)
                    .col(keyword_suggestions_cache::Column::LocationCode)
                    .col(keyword_suggestions_cache::Column::ExpiresAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GenerationQuota)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generation_quota_tier")
                    .table(GenerationQuota)
                    .col(generation_quota::Column::Tier)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GenerationQuota).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(KeywordSuggestionsCache).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Keywords).to_owned())
            .await
    }
}
