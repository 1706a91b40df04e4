use crate::domain::now_timestamp;
use crate::entities::{prelude::*, style_guides};
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait,
};

pub struct StyleGuideRepository {
    conn: DatabaseConnection,
}

impl StyleGuideRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn owned(owner_id: &str) -> sea_orm::Select<StyleGuides> {
        StyleGuides::find().filter(style_guides::Column::OwnerId.eq(owner_id))
    }

    pub async fn insert(&self, guide: style_guides::Model) -> Result<style_guides::Model> {
        let id = guide.id.clone();
        StyleGuides::insert(guide.into_active_model().reset_all())
            .exec(&self.conn)
            .await?;

        StyleGuides::find_by_id(id.clone())
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted style guide {id} not found"))
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<Option<style_guides::Model>> {
        let row = Self::owned(owner_id)
            .filter(style_guides::Column::Id.eq(id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Newest first.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<style_guides::Model>> {
        let rows = Self::owned(owner_id)
            .order_by_desc(style_guides::Column::CreatedAt)
            .order_by_desc(style_guides::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    /// The owner's default guide. If several are flagged, the most recently
    /// updated one wins.
    pub async fn find_default(&self, owner_id: &str) -> Result<Option<style_guides::Model>> {
        let row = Self::owned(owner_id)
            .filter(style_guides::Column::IsDefault.eq(true))
            .order_by_desc(style_guides::Column::UpdatedAt)
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    pub async fn save(&self, guide: style_guides::Model) -> Result<Option<style_guides::Model>> {
        let owner_id = guide.owner_id.clone();
        let update = StyleGuides::update(guide.into_active_model().reset_all())
            .filter(style_guides::Column::OwnerId.eq(owner_id));

        match update.exec(&self.conn).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<bool> {
        let result = StyleGuides::delete_many()
            .filter(style_guides::Column::OwnerId.eq(owner_id))
            .filter(style_guides::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Flags `id` as the owner's only default guide.
    pub async fn set_default(&self, owner_id: &str, id: &str) -> Result<bool> {
        let now = now_timestamp();
        let txn = self.conn.begin().await?;

        let flagged = StyleGuides::update_many()
            .col_expr(style_guides::Column::IsDefault, Expr::value(true))
            .col_expr(style_guides::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(style_guides::Column::OwnerId.eq(owner_id))
            .filter(style_guides::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if flagged.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        StyleGuides::update_many()
            .col_expr(style_guides::Column::IsDefault, Expr::value(false))
            .col_expr(style_guides::Column::UpdatedAt, Expr::value(now))
            .filter(style_guides::Column::OwnerId.eq(owner_id))
            .filter(style_guides::Column::Id.ne(id))
            .filter(style_guides::Column::IsDefault.eq(true))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }
}
