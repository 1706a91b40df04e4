use crate::entities::prelude::*;
use crate::entities::{articles, style_guides};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(StyleGuides)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_style_guides_owner")
                    .table(StyleGuides)
                    .col(style_guides::Column::OwnerId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // No foreign key to style_guides: articles keep their guide id after
        // the guide is deleted.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Articles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_owner_created")
                    .table(Articles)
                    .col(articles::Column::OwnerId)
                    .col(articles::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StyleGuides).to_owned())
            .await
    }
}
