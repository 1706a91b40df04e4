use crate::domain::{QuotaTier, now_timestamp};
use crate::entities::{generation_quota, prelude::*};
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOutcome {
    Applied { new_count: i32 },
    /// The stored count no longer matched the expected value.
    Stale,
}

pub struct QuotaRepository {
    conn: DatabaseConnection,
}

impl QuotaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&self, user_id: &str) -> Result<Option<generation_quota::Model>> {
        let row = GenerationQuota::find()
            .filter(generation_quota::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Returns the user's record, inserting a zeroed free-tier row first if
    /// there is none. Concurrent first calls converge on the same row.
    pub async fn get_or_create(&self, user_id: &str) -> Result<generation_quota::Model> {
        if let Some(existing) = self.find(user_id).await? {
            return Ok(existing);
        }

        let now = now_timestamp();
        let model = generation_quota::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            tier: Set(QuotaTier::Free.as_str().to_string()),
            generation_count: Set(0),
            last_reset_at: Set(now.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        GenerationQuota::insert(model)
            .on_conflict(
                OnConflict::column(generation_quota::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.find(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Quota record for {user_id} missing after insert"))
    }

    /// `UPDATE .. SET generation_count = expected + 1 WHERE user_id = ? AND
    /// generation_count = expected`.
    pub async fn compare_and_increment(
        &self,
        user_id: &str,
        expected: i32,
    ) -> Result<IncrementOutcome> {
        let new_count = expected + 1;

        let result = GenerationQuota::update_many()
            .col_expr(generation_quota::Column::GenerationCount, Expr::value(new_count))
            .col_expr(generation_quota::Column::UpdatedAt, Expr::value(now_timestamp()))
            .filter(generation_quota::Column::UserId.eq(user_id))
            .filter(generation_quota::Column::GenerationCount.eq(expected))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            Ok(IncrementOutcome::Stale)
        } else {
            Ok(IncrementOutcome::Applied { new_count })
        }
    }

    pub async fn set_tier(&self, user_id: &str, tier: QuotaTier) -> Result<bool> {
        let result = GenerationQuota::update_many()
            .col_expr(generation_quota::Column::Tier, Expr::value(tier.as_str()))
            .col_expr(generation_quota::Column::UpdatedAt, Expr::value(now_timestamp()))
            .filter(generation_quota::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Zeroes the counter and stamps `last_reset_at`.
    pub async fn reset(&self, user_id: &str) -> Result<bool> {
        let now = now_timestamp();
        let result = GenerationQuota::update_many()
            .col_expr(generation_quota::Column::GenerationCount, Expr::value(0))
            .col_expr(generation_quota::Column::LastResetAt, Expr::value(now.clone()))
            .col_expr(generation_quota::Column::UpdatedAt, Expr::value(now))
            .filter(generation_quota::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
