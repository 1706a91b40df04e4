//! `SeaORM` implementation of the `KeywordService` trait.

use crate::api::{BulkCreateKeywordsResponse, KeywordDto, KeywordListResponse};
use crate::context::RequestContext;
use crate::db::{InsertOutcome, NewKeyword, Store};
use crate::domain::{KeywordSource, normalize_keyword, validate_keyword_phrase};
use crate::entities::keywords;
use crate::services::keyword_service::{KeywordError, KeywordPage, KeywordService};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmKeywordService {
    store: Store,
}

impl SeaOrmKeywordService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn to_dto(model: keywords::Model) -> KeywordDto {
        let source = model.source.parse().unwrap_or_else(|e| {
            warn!(keyword_id = %model.id, error = %e, "Unknown keyword source, treating as manual");
            KeywordSource::Manual
        });

        KeywordDto {
            id: model.id,
            phrase: model.phrase,
            normalized: model.normalized,
            source,
            search_volume: model.search_volume,
            cpc: model.cpc,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    fn prepare(phrase: &str, source: KeywordSource) -> Result<NewKeyword, KeywordError> {
        validate_keyword_phrase(phrase)?;
        Ok(NewKeyword {
            phrase: phrase.trim().to_string(),
            normalized: normalize_keyword(phrase),
            source,
        })
    }
}

#[async_trait]
impl KeywordService for SeaOrmKeywordService {
    async fn list(
        &self,
        _ctx: &RequestContext,
        page: KeywordPage,
    ) -> Result<KeywordListResponse, KeywordError> {
        let offset = (page.page - 1).saturating_mul(page.limit);

        let (rows, total) = self
            .store
            .keywords()
            .list(page.query.as_deref(), offset, page.limit)
            .await
            .map_err(|e| KeywordError::database(KeywordError::FETCH_ERROR, e))?;

        Ok(KeywordListResponse {
            items: rows.into_iter().map(Self::to_dto).collect(),
            total,
            page: page.page,
            limit: page.limit,
            has_more: total > page.page.saturating_mul(page.limit),
        })
    }

    async fn get(&self, _ctx: &RequestContext, id: &str) -> Result<KeywordDto, KeywordError> {
        self.store
            .keywords()
            .get(id)
            .await
            .map_err(|e| KeywordError::database(KeywordError::FETCH_ERROR, e))?
            .map(Self::to_dto)
            .ok_or_else(|| KeywordError::NotFound(id.to_string()))
    }

    async fn create(&self, ctx: &RequestContext, phrase: &str) -> Result<KeywordDto, KeywordError> {
        let row = Self::prepare(phrase, KeywordSource::Manual)?;

        let outcome = self
            .store
            .keywords()
            .insert(&row)
            .await
            .map_err(|e| KeywordError::database(KeywordError::CREATE_ERROR, e))?;

        match outcome {
            InsertOutcome::Created(model) => {
                info!(
                    request_id = %ctx.request_id,
                    keyword_id = %model.id,
                    normalized = %model.normalized,
                    "Keyword created"
                );
                Ok(Self::to_dto(model))
            }
            InsertOutcome::Duplicate => Err(KeywordError::Duplicate),
        }
    }

    async fn bulk_create(
        &self,
        ctx: &RequestContext,
        phrases: &[String],
    ) -> Result<BulkCreateKeywordsResponse, KeywordError> {
        let rows: Vec<NewKeyword> = phrases
            .iter()
            .filter_map(|p| Self::prepare(p, KeywordSource::DataForSeo).ok())
            .collect();

        if rows.is_empty() {
            return Err(KeywordError::NoValidPhrases);
        }

        let created = self
            .store
            .keywords()
            .insert_ignoring_duplicates(&rows)
            .await
            .map_err(|e| KeywordError::database(KeywordError::BULK_INSERT_ERROR, e))?;

        let skipped = rows.len() - created.len();
        info!(
            request_id = %ctx.request_id,
            submitted = phrases.len(),
            valid = rows.len(),
            created = created.len(),
            skipped,
            "Bulk keyword import"
        );

        Ok(BulkCreateKeywordsResponse {
            created: created.len(),
            skipped,
            keywords: created.into_iter().map(Self::to_dto).collect(),
        })
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        phrase: Option<&str>,
    ) -> Result<KeywordDto, KeywordError> {
        let Some(phrase) = phrase else {
            return self.get(ctx, id).await;
        };

        let row = Self::prepare(phrase, KeywordSource::Manual)?;

        let outcome = self
            .store
            .keywords()
            .update_phrase(id, &row.phrase, &row.normalized)
            .await
            .map_err(|e| KeywordError::database(KeywordError::UPDATE_ERROR, e))?;

        match outcome {
            Some(InsertOutcome::Created(model)) => {
                info!(request_id = %ctx.request_id, keyword_id = %id, "Keyword updated");
                Ok(Self::to_dto(model))
            }
            Some(InsertOutcome::Duplicate) => Err(KeywordError::Duplicate),
            None => Err(KeywordError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), KeywordError> {
        let deleted = self
            .store
            .keywords()
            .delete(id)
            .await
            .map_err(|e| KeywordError::database(KeywordError::DELETE_ERROR, e))?;

        if !deleted {
            return Err(KeywordError::NotFound(id.to_string()));
        }

        info!(request_id = %ctx.request_id, keyword_id = %id, "Keyword deleted");
        Ok(())
    }
}
