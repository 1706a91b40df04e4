//! Per-user generation counters.
//!
//! The tier limit is an application-level gate: nothing in the schema stops
//! `generation_count` from passing it.

use thiserror::Error;
use tracing::{info, warn};

use crate::api::QuotaStatusDto;
use crate::context::RequestContext;
use crate::db::{IncrementOutcome, Store};
use crate::domain::QuotaTier;
use crate::entities::generation_quota;

#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("Quota check failed: {0}")]
    CheckFailed(String),

    /// The conditional update matched no row, usually because a concurrent
    /// increment got there first. Not retried.
    #[error("Failed to increment quota: {0}")]
    IncrementFailed(String),
}

impl QuotaError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CheckFailed(_) => "QUOTA_CHECK_FAILED",
            Self::IncrementFailed(_) => "QUOTA_INCREMENT_FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaIncrement {
    pub new_count: i32,
    pub remaining: i32,
}

#[derive(Clone)]
pub struct QuotaService {
    store: Store,
}

fn status_for(tier: QuotaTier, current_count: i32) -> QuotaStatusDto {
    let limit = tier.limit();
    QuotaStatusDto {
        allowed: current_count < limit,
        tier,
        current_count,
        limit,
        remaining: (limit - current_count).max(0),
    }
}

fn tier_of(record: &generation_quota::Model) -> QuotaTier {
    record.tier.parse().unwrap_or_else(|e| {
        warn!(user_id = %record.user_id, error = %e, "Unknown quota tier, applying free limits");
        QuotaTier::Free
    })
}

impl QuotaService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Current standing, creating a zeroed free-tier record on first use.
    pub async fn check(&self, ctx: &RequestContext) -> Result<QuotaStatusDto, QuotaError> {
        self.check_user(&ctx.user_id).await
    }

    pub async fn check_user(&self, user_id: &str) -> Result<QuotaStatusDto, QuotaError> {
        let record = self
            .store
            .quota()
            .get_or_create(user_id)
            .await
            .map_err(|e| QuotaError::CheckFailed(e.to_string()))?;

        Ok(status_for(tier_of(&record), record.generation_count))
    }

    /// Read-only view: a user without a record sees a fresh free tier.
    pub async fn status(&self, ctx: &RequestContext) -> Result<QuotaStatusDto, QuotaError> {
        let record = self
            .store
            .quota()
            .find(&ctx.user_id)
            .await
            .map_err(|e| QuotaError::CheckFailed(e.to_string()))?;

        Ok(record.map_or_else(
            || status_for(QuotaTier::Free, 0),
            |r| status_for(tier_of(&r), r.generation_count),
        ))
    }

    /// Reads the count, then bumps it only if it is still the value read.
    pub async fn increment(&self, ctx: &RequestContext) -> Result<QuotaIncrement, QuotaError> {
        let repo = self.store.quota();

        let record = repo
            .get_or_create(&ctx.user_id)
            .await
            .map_err(|e| QuotaError::IncrementFailed(e.to_string()))?;
        let tier = tier_of(&record);

        let outcome = repo
            .compare_and_increment(&ctx.user_id, record.generation_count)
            .await
            .map_err(|e| QuotaError::IncrementFailed(e.to_string()))?;

        match outcome {
            IncrementOutcome::Applied { new_count } => {
                info!(
                    request_id = %ctx.request_id,
                    user_id = %ctx.user_id,
                    new_count,
                    "Generation quota incremented"
                );
                Ok(QuotaIncrement {
                    new_count,
                    remaining: (tier.limit() - new_count).max(0),
                })
            }
            IncrementOutcome::Stale => Err(QuotaError::IncrementFailed(format!(
                "generation count changed from {} during update",
                record.generation_count
            ))),
        }
    }

    pub async fn set_tier(&self, user_id: &str, tier: QuotaTier) -> anyhow::Result<QuotaStatusDto> {
        let repo = self.store.quota();
        repo.get_or_create(user_id).await?;
        repo.set_tier(user_id, tier).await?;
        Ok(self.check_user(user_id).await?)
    }

    pub async fn reset(&self, user_id: &str) -> anyhow::Result<QuotaStatusDto> {
        let repo = self.store.quota();
        repo.get_or_create(user_id).await?;
        repo.reset(user_id).await?;
        Ok(self.check_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_free_status() {
        let status = status_for(QuotaTier::Free, 0);
        assert_eq!(
            status,
            QuotaStatusDto {
                allowed: true,
                tier: QuotaTier::Free,
                current_count: 0,
                limit: 10,
                remaining: 10,
            }
        );
    }

    #[test]
    fn exhausted_and_overdrawn() {
        let at_limit = status_for(QuotaTier::Free, 10);
        assert!(!at_limit.allowed);
        assert_eq!(at_limit.remaining, 0);

        let over = status_for(QuotaTier::Free, 12);
        assert!(!over.allowed);
        assert_eq!(over.remaining, 0);

        assert!(status_for(QuotaTier::Pro, 99).allowed);
    }
}
