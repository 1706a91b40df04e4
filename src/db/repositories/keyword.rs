use crate::domain::{KeywordSource, normalize_keyword, now_timestamp};
use crate::entities::{keywords, prelude::*};
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

/// A validated, normalized row ready to insert.
#[derive(Debug, Clone)]
pub struct NewKeyword {
    pub phrase: String,
    pub normalized: String,
    pub source: KeywordSource,
}

#[derive(Debug)]
pub enum InsertOutcome {
    Created(keywords::Model),
    /// Another row already owns the normalized key.
    Duplicate,
}

pub struct KeywordRepository {
    conn: DatabaseConnection,
}

impl KeywordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(id: String, row: &NewKeyword, now: &str) -> keywords::ActiveModel {
        keywords::ActiveModel {
            id: Set(id),
            phrase: Set(row.phrase.clone()),
            normalized: Set(row.normalized.clone()),
            source: Set(row.source.as_str().to_string()),
            search_volume: Set(None),
            cpc: Set(None),
            created_at: Set(now.to_string()),
            updated_at: Set(now.to_string()),
        }
    }

    pub async fn insert(&self, row: &NewKeyword) -> Result<InsertOutcome> {
        let now = now_timestamp();
        let id = Uuid::new_v4().to_string();
        let model = Self::active_model(id.clone(), row, &now);

        match Keywords::insert(model).exec(&self.conn).await {
            Ok(_) => {}
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(InsertOutcome::Duplicate);
            }
            Err(e) => return Err(e.into()),
        }

        let created = self
            .get(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted keyword {id} not found"))?;
        Ok(InsertOutcome::Created(created))
    }

    /// Inserts every row in one statement, skipping rows whose normalized key
    /// is already taken (by an existing row or an earlier row in the batch).
    /// Returns only the rows this call created.
    pub async fn insert_ignoring_duplicates(
        &self,
        rows: &[NewKeyword],
    ) -> Result<Vec<keywords::Model>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let now = now_timestamp();
        let ids: Vec<String> = rows.iter().map(|_| Uuid::new_v4().to_string()).collect();
        let models: Vec<_> = ids
            .iter()
            .zip(rows)
            .map(|(id, row)| Self::active_model(id.clone(), row, &now))
            .collect();

        let inserted = Keywords::insert_many(models)
            .on_conflict(
                OnConflict::column(keywords::Column::Normalized)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        debug!(requested = rows.len(), inserted, "Bulk keyword insert");

        // Generated ids are fresh, so the rows carrying them are exactly the
        // ones that made it past the conflict clause.
        let created = Keywords::find()
            .filter(keywords::Column::Id.is_in(ids))
            .order_by_desc(keywords::Column::CreatedAt)
            .order_by_desc(keywords::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Option<keywords::Model>> {
        let row = Keywords::find_by_id(id.to_string()).one(&self.conn).await?;
        Ok(row)
    }

    /// Page of keywords newest first, plus the total matching `query`.
    ///
    /// `query` matches anywhere in the normalized key. Folding happens in
    /// Rust because SQLite `lower()` only handles ASCII.
    pub async fn list(
        &self,
        query: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<keywords::Model>, u64)> {
        let mut condition = Condition::all();
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", escape_like(&normalize_keyword(q)));
            condition = condition.add(
                Expr::col(keywords::Column::Normalized)
                    .like(sea_orm::sea_query::LikeExpr::new(pattern).escape('\\')),
            );
        }

        let total = Keywords::find()
            .filter(condition.clone())
            .count(&self.conn)
            .await?;

        let items = Keywords::find()
            .filter(condition)
            .order_by_desc(keywords::Column::CreatedAt)
            .order_by_desc(keywords::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok((items, total))
    }

    pub async fn update_phrase(
        &self,
        id: &str,
        phrase: &str,
        normalized: &str,
    ) -> Result<Option<InsertOutcome>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut model: keywords::ActiveModel = existing.into();
        model.phrase = Set(phrase.to_string());
        model.normalized = Set(normalized.to_string());
        model.updated_at = Set(now_timestamp());

        match Keywords::update(model).exec(&self.conn).await {
            Ok(updated) => Ok(Some(InsertOutcome::Created(updated))),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(Some(InsertOutcome::Duplicate))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Keywords::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
