use crate::domain::{ArticleStatus, SortOrder};
use crate::entities::{articles, prelude::*};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl ArticleSortField {
    const fn column(self) -> articles::Column {
        match self {
            Self::CreatedAt => articles::Column::CreatedAt,
            Self::UpdatedAt => articles::Column::UpdatedAt,
            Self::Title => articles::Column::Title,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticleListParams {
    pub status: Option<ArticleStatus>,
    pub sort_by: ArticleSortField,
    pub sort_order: SortOrder,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleStatusCounts {
    pub total: u64,
    pub published: u64,
    pub draft: u64,
    /// Articles created at or after the given instant.
    pub created_since: u64,
}

pub struct ArticleRepository {
    conn: DatabaseConnection,
}

impl ArticleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn owned(owner_id: &str) -> sea_orm::Select<Articles> {
        Articles::find().filter(articles::Column::OwnerId.eq(owner_id))
    }

    pub async fn insert(&self, article: articles::Model) -> Result<articles::Model> {
        let id = article.id.clone();
        Articles::insert(article.into_active_model().reset_all())
            .exec(&self.conn)
            .await?;

        Articles::find_by_id(id.clone())
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted article {id} not found"))
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Option<articles::Model>> {
        let row = Self::owned(owner_id)
            .filter(articles::Column::Id.eq(id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Writes every column of `article`. Returns `None` if the row vanished
    /// or changed owner since it was read.
    pub async fn save(&self, article: articles::Model) -> Result<Option<articles::Model>> {
        let owner_id = article.owner_id.clone();
        let update = Articles::update(article.into_active_model().reset_all())
            .filter(articles::Column::OwnerId.eq(owner_id));

        match update.exec(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<bool> {
        let result = Articles::delete_many()
            .filter(articles::Column::OwnerId.eq(owner_id))
            .filter(articles::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list(
        &self,
        owner_id: &str,
        params: &ArticleListParams,
    ) -> Result<(Vec<articles::Model>, u64)> {
        let mut query = Self::owned(owner_id);
        if let Some(status) = params.status {
            query = query.filter(articles::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(&self.conn).await?;

        let column = params.sort_by.column();
        let query = if params.sort_order.is_ascending() {
            query
                .order_by_asc(column)
                .order_by_asc(articles::Column::Id)
        } else {
            query
                .order_by_desc(column)
                .order_by_desc(articles::Column::Id)
        };

        let rows = query
            .offset(params.offset)
            .limit(params.limit)
            .all(&self.conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn status_counts(
        &self,
        owner_id: &str,
        created_since: &str,
    ) -> Result<ArticleStatusCounts> {
        let total = Self::owned(owner_id).count(&self.conn).await?;

        let published = Self::owned(owner_id)
            .filter(articles::Column::Status.eq(ArticleStatus::Published.as_str()))
            .count(&self.conn)
            .await?;

        let draft = Self::owned(owner_id)
            .filter(articles::Column::Status.eq(ArticleStatus::Draft.as_str()))
            .count(&self.conn)
            .await?;

        let created_since = Self::owned(owner_id)
            .filter(articles::Column::CreatedAt.gte(created_since))
            .count(&self.conn)
            .await?;

        Ok(ArticleStatusCounts {
            total,
            published,
            draft,
            created_since,
        })
    }
}
