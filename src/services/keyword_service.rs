//! Domain service for the shared keyword catalogue.

use crate::api::{BulkCreateKeywordsResponse, KeywordDto, KeywordListResponse};
use crate::context::RequestContext;
use crate::domain::PhraseError;
use thiserror::Error;

/// Page request after boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPage {
    pub query: Option<String>,
    /// 1-based.
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("{0}")]
    InvalidPhrase(#[from] PhraseError),

    #[error("Keyword already exists")]
    Duplicate,

    #[error("Keyword not found: {0}")]
    NotFound(String),

    #[error("No valid keywords to insert")]
    NoValidPhrases,

    #[error("{message}")]
    Database { code: &'static str, message: String },
}

impl KeywordError {
    pub const FETCH_ERROR: &'static str = "KEYWORD_FETCH_ERROR";
    pub const CREATE_ERROR: &'static str = "KEYWORD_CREATE_ERROR";
    pub const UPDATE_ERROR: &'static str = "KEYWORD_UPDATE_ERROR";
    pub const DELETE_ERROR: &'static str = "KEYWORD_DELETE_ERROR";
    pub const BULK_INSERT_ERROR: &'static str = "KEYWORD_BULK_INSERT_ERROR";

    pub fn database(code: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            code,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPhrase(_) => "INVALID_KEYWORD_PHRASE",
            Self::Duplicate => "DUPLICATE_KEYWORD_NORMALIZED",
            Self::NotFound(_) => "KEYWORD_NOT_FOUND",
            Self::NoValidPhrases => Self::BULK_INSERT_ERROR,
            Self::Database { code, .. } => *code,
        }
    }
}

#[async_trait::async_trait]
pub trait KeywordService: Send + Sync {
    async fn list(
        &self,
        ctx: &RequestContext,
        page: KeywordPage,
    ) -> Result<KeywordListResponse, KeywordError>;

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<KeywordDto, KeywordError>;

    /// Adds a manually entered keyword.
    async fn create(&self, ctx: &RequestContext, phrase: &str) -> Result<KeywordDto, KeywordError>;

    /// Imports phrases picked from suggestions. Invalid phrases are dropped
    /// without being reported; duplicates are counted as skipped.
    async fn bulk_create(
        &self,
        ctx: &RequestContext,
        phrases: &[String],
    ) -> Result<BulkCreateKeywordsResponse, KeywordError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        phrase: Option<&str>,
    ) -> Result<KeywordDto, KeywordError>;

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), KeywordError>;
}
