//! Keyword suggestions from the research provider, fronted by a 24h cache.

use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use crate::api::SuggestionItem;
use crate::api::{KeywordSuggestionsRequest, KeywordSuggestionsResponse};
use crate::constants::{cache, suggestions};
use crate::context::RequestContext;
use crate::db::Store;
use crate::domain::format_timestamp;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid DataForSEO credentials")]
    InvalidCredentials,

    #[error("DataForSEO rate limit exceeded")]
    RateLimited,

    #[error("DataForSEO request timed out")]
    Timeout,

    #[error("DataForSEO API error: {0}")]
    Provider(String),
}

impl SuggestionError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_REQUEST_BODY",
            Self::InvalidCredentials => "DATAFORSEO_INVALID_CREDENTIALS",
            Self::RateLimited => "DATAFORSEO_RATE_LIMIT",
            Self::Timeout => "DATAFORSEO_TIMEOUT",
            Self::Provider(_) => "DATAFORSEO_API_ERROR",
        }
    }
}

/// A validated suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub seeds: Vec<String>,
    pub language_name: String,
    pub location_code: i32,
    pub limit: u32,
    pub force_refresh: bool,
}

impl SuggestionQuery {
    /// Applies defaults and range checks: 1 to 5 non-blank seeds and a
    /// limit between 1 and 100.
    pub fn from_request(req: KeywordSuggestionsRequest) -> Result<Self, SuggestionError> {
        if req.seeds.is_empty() || req.seeds.len() > suggestions::MAX_SEEDS {
            return Err(SuggestionError::InvalidInput(format!(
                "Between 1 and {} seed keywords are required",
                suggestions::MAX_SEEDS
            )));
        }

        if req.seeds.iter().any(|s| s.trim().is_empty()) {
            return Err(SuggestionError::InvalidInput(
                "Seed keywords must not be empty".to_string(),
            ));
        }

        let limit = match req.limit {
            None => suggestions::DEFAULT_LIMIT,
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|n| (1..=suggestions::MAX_LIMIT).contains(n))
                .ok_or_else(|| {
                    SuggestionError::InvalidInput(format!(
                        "Limit must be between 1 and {}",
                        suggestions::MAX_LIMIT
                    ))
                })?,
        };

        Ok(Self {
            seeds: req.seeds.into_iter().map(|s| s.trim().to_string()).collect(),
            language_name: req
                .language_name
                .unwrap_or_else(|| suggestions::DEFAULT_LANGUAGE.to_string()),
            location_code: req
                .location_code
                .unwrap_or(suggestions::DEFAULT_LOCATION_CODE),
            limit,
            force_refresh: req.force_refresh.unwrap_or(false),
        })
    }
}

/// Source of keyword ideas for a set of seed terms.
#[async_trait::async_trait]
pub trait KeywordResearchProvider: Send + Sync {
    async fn keyword_suggestions(
        &self,
        seeds: &[String],
        language_name: &str,
        location_code: i32,
        limit: u32,
    ) -> Result<Vec<SuggestionItem>, SuggestionError>;
}

pub struct SuggestionService {
    store: Store,
    provider: Arc<dyn KeywordResearchProvider>,
    ttl: Duration,
}

impl SuggestionService {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn KeywordResearchProvider>) -> Self {
        Self {
            store,
            provider,
            ttl: Duration::hours(cache::SUGGESTION_TTL_HOURS),
        }
    }

    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        query: &SuggestionQuery,
    ) -> Result<KeywordSuggestionsResponse, SuggestionError> {
        if query.force_refresh {
            debug!(request_id = %ctx.request_id, "Suggestion cache bypassed");
        } else {
            let lookup = self
                .store
                .suggestion_cache()
                .find_fresh(
                    &query.seeds,
                    &query.language_name,
                    query.location_code,
                    Utc::now(),
                )
                .await;

            match lookup {
                Ok(Some(hit)) => {
                    metrics::counter!("keyword_suggestion_cache_hits_total").increment(1);
                    info!(
                        request_id = %ctx.request_id,
                        seeds = ?query.seeds,
                        "Returning cached keyword suggestions"
                    );
                    return Ok(KeywordSuggestionsResponse {
                        suggestions: hit.suggestions,
                        cached: true,
                        cache_expires_at: Some(hit.expires_at),
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(request_id = %ctx.request_id, error = %e, "Suggestion cache read failed");
                }
            }
        }

        metrics::counter!("keyword_suggestion_cache_misses_total").increment(1);
        info!(
            request_id = %ctx.request_id,
            seeds = ?query.seeds,
            language = %query.language_name,
            location = query.location_code,
            limit = query.limit,
            "Fetching keyword suggestions from provider"
        );

        let items = self
            .provider
            .keyword_suggestions(
                &query.seeds,
                &query.language_name,
                query.location_code,
                query.limit,
            )
            .await
            .inspect_err(|e| {
                metrics::counter!("keyword_suggestion_provider_errors_total", "code" => e.code())
                    .increment(1);
                warn!(request_id = %ctx.request_id, error = %e, "Keyword provider call failed");
            })?;

        let now = Utc::now();
        let cache_expires_at = format_timestamp(now + self.ttl);

        // Best effort: the provider call already succeeded.
        if let Err(e) = self
            .store
            .suggestion_cache()
            .insert(
                &query.seeds,
                &query.language_name,
                query.location_code,
                &items,
                now,
                self.ttl,
            )
            .await
        {
            warn!(request_id = %ctx.request_id, error = %e, "Failed to cache keyword suggestions");
        }

        Ok(KeywordSuggestionsResponse {
            suggestions: items,
            cached: false,
            cache_expires_at: Some(cache_expires_at),
        })
    }

    /// Deletes cache rows that can no longer be served.
    pub async fn prune_expired(&self) -> anyhow::Result<u64> {
        let removed = self.store.suggestion_cache().delete_expired(Utc::now()).await?;
        info!(removed, "Pruned expired keyword suggestion cache rows");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(seeds: &[&str]) -> KeywordSuggestionsRequest {
        KeywordSuggestionsRequest {
            seeds: seeds.iter().map(ToString::to_string).collect(),
            language_name: None,
            location_code: None,
            limit: None,
            force_refresh: None,
        }
    }

    #[test]
    fn defaults_are_applied() {
        let q = SuggestionQuery::from_request(request(&["seo"])).unwrap();
        assert_eq!(q.language_name, "Korean");
        assert_eq!(q.location_code, 2410);
        assert_eq!(q.limit, 25);
        assert!(!q.force_refresh);
    }

    #[test]
    fn seed_count_is_bounded() {
        assert!(SuggestionQuery::from_request(request(&[])).is_err());
        assert!(SuggestionQuery::from_request(request(&["a", "b", "c", "d", "e"])).is_ok());
        assert!(SuggestionQuery::from_request(request(&["a", "b", "c", "d", "e", "f"])).is_err());
        assert!(SuggestionQuery::from_request(request(&["a", "  "])).is_err());
    }

    #[test]
    fn limit_is_bounded() {
        for (limit, ok) in [(0, false), (1, true), (100, true), (101, false), (-5, false)] {
            let mut req = request(&["seo"]);
            req.limit = Some(limit);
            assert_eq!(SuggestionQuery::from_request(req).is_ok(), ok, "limit {limit}");
        }
    }
}
