use crate::domain::format_timestamp;
use crate::entities::{keyword_suggestions_cache, prelude::*};
use crate::services::suggestion_service::SuggestionItem;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashSet;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct CachedSuggestions {
    pub suggestions: Vec<SuggestionItem>,
    pub expires_at: String,
}

pub struct SuggestionCacheRepository {
    conn: DatabaseConnection,
}

impl SuggestionCacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Newest unexpired entry for the locale whose seed set contains every
    /// requested seed.
    pub async fn find_fresh(
        &self,
        seeds: &[String],
        language_name: &str,
        location_code: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<CachedSuggestions>> {
        let now = format_timestamp(now);

        let rows = KeywordSuggestionsCache::find()
            .filter(keyword_suggestions_cache::Column::LanguageName.eq(language_name))
            .filter(keyword_suggestions_cache::Column::LocationCode.eq(location_code))
            .filter(keyword_suggestions_cache::Column::ExpiresAt.gt(now))
            .order_by_desc(keyword_suggestions_cache::Column::CreatedAt)
            .order_by_desc(keyword_suggestions_cache::Column::Id)
            .all(&self.conn)
            .await?;

        for row in rows {
            let stored: HashSet<String> = match serde_json::from_str::<Vec<String>>(&row.seeds) {
                Ok(seeds) => seeds.into_iter().collect(),
                Err(e) => {
                    warn!(cache_id = row.id, error = %e, "Skipping cache row with unreadable seeds");
                    continue;
                }
            };

            if !seeds.iter().all(|s| stored.contains(s)) {
                continue;
            }

            match serde_json::from_str::<Vec<SuggestionItem>>(&row.response_data) {
                Ok(suggestions) => {
                    return Ok(Some(CachedSuggestions {
                        suggestions,
                        expires_at: row.expires_at,
                    }));
                }
                Err(e) => {
                    warn!(cache_id = row.id, error = %e, "Skipping cache row with unreadable payload");
                }
            }
        }

        Ok(None)
    }

    /// Appends a new entry; earlier entries for the same seeds are left alone.
    pub async fn insert(
        &self,
        seeds: &[String],
        language_name: &str,
        location_code: i32,
        suggestions: &[SuggestionItem],
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String> {
        let expires_at = format_timestamp(now + ttl);

        let model = keyword_suggestions_cache::ActiveModel {
            seeds: Set(serde_json::to_string(seeds)?),
            language_name: Set(language_name.to_string()),
            location_code: Set(location_code),
            response_data: Set(serde_json::to_string(suggestions)?),
            created_at: Set(format_timestamp(now)),
            expires_at: Set(expires_at.clone()),
            ..Default::default()
        };

        KeywordSuggestionsCache::insert(model)
            .exec(&self.conn)
            .await?;

        Ok(expires_at)
    }

    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = KeywordSuggestionsCache::delete_many()
            .filter(keyword_suggestions_cache::Column::ExpiresAt.lte(format_timestamp(now)))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
