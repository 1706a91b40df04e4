use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{ArticleError, KeywordError, QuotaError, StyleGuideError, SuggestionError};

#[derive(Debug)]
pub enum ApiError {
    NotFound { code: &'static str, message: String },

    DatabaseError { code: &'static str, message: String },

    ExternalApiError {
        status: StatusCode,
        code: &'static str,
        message: String,
    },

    ValidationError { code: &'static str, message: String },

    Conflict { code: &'static str, message: String },

    TooManyRequests { code: &'static str, message: String },

    InternalError { code: &'static str, message: String },

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { message, .. } => write!(f, "Not found: {message}"),
            Self::DatabaseError { message, .. } => write!(f, "Database error: {message}"),
            Self::ExternalApiError { message, .. } => write!(f, "External API error: {message}"),
            Self::ValidationError { message, .. } => write!(f, "Validation error: {message}"),
            Self::Conflict { message, .. } => write!(f, "Conflict: {message}"),
            Self::TooManyRequests { message, .. } => write!(f, "Too many requests: {message}"),
            Self::InternalError { message, .. } => write!(f, "Internal error: {message}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DatabaseError { .. } | Self::InternalError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ExternalApiError { status, .. } => *status,
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { code, .. }
            | Self::DatabaseError { code, .. }
            | Self::ExternalApiError { code, .. }
            | Self::ValidationError { code, .. }
            | Self::Conflict { code, .. }
            | Self::TooManyRequests { code, .. }
            | Self::InternalError { code, .. } => *code,
            Self::Unauthorized(_) => "UNAUTHORIZED",
        }
    }

    pub fn validation(code: &'static str, msg: impl Into<String>) -> Self {
        Self::ValidationError {
            code,
            message: msg.into(),
        }
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::validation("INVALID_REQUEST_BODY", msg)
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::validation("INVALID_QUERY_PARAMS", msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError {
            code: "INTERNAL_ERROR",
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            Self::DatabaseError { message, .. } => {
                tracing::error!(code, "Database error: {}", message);
                "A database error occurred".to_string()
            }
            Self::InternalError { message, .. } => {
                tracing::error!(code, "Internal error: {}", message);
                "An internal error occurred".to_string()
            }
            Self::ExternalApiError { message, .. } => {
                tracing::warn!(code, "External API error: {}", message);
                message
            }
            Self::NotFound { message, .. }
            | Self::ValidationError { message, .. }
            | Self::Conflict { message, .. }
            | Self::TooManyRequests { message, .. }
            | Self::Unauthorized(message) => message,
        };

        let body = ApiResponse::<()>::error(code, message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_body(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_query(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_query(rejection.body_text())
    }
}

impl From<KeywordError> for ApiError {
    fn from(err: KeywordError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            KeywordError::InvalidPhrase(_) | KeywordError::NoValidPhrases => {
                Self::ValidationError { code, message }
            }
            KeywordError::Duplicate => Self::Conflict { code, message },
            KeywordError::NotFound(_) => Self::NotFound { code, message },
            KeywordError::Database { .. } => Self::DatabaseError { code, message },
        }
    }
}

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let status = match err {
            SuggestionError::InvalidInput(_) => return Self::ValidationError { code, message },
            SuggestionError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SuggestionError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SuggestionError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            SuggestionError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::ExternalApiError {
            status,
            code,
            message,
        }
    }
}

impl From<QuotaError> for ApiError {
    fn from(err: QuotaError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            QuotaError::CheckFailed(_) => Self::DatabaseError { code, message },
            // Lost a concurrent increment; the caller may retry.
            QuotaError::IncrementFailed(_) => Self::Conflict { code, message },
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            ArticleError::Validation(_) => Self::ValidationError { code, message },
            ArticleError::NotFound | ArticleError::StyleGuideNotFound => {
                Self::NotFound { code, message }
            }
            ArticleError::QuotaExceeded { .. } => Self::TooManyRequests { code, message },
            ArticleError::Quota(inner) => inner.into(),
            ArticleError::GenerationFailed(_) => Self::ExternalApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code,
                message,
            },
            ArticleError::Database { .. } => Self::DatabaseError { code, message },
        }
    }
}

impl From<StyleGuideError> for ApiError {
    fn from(err: StyleGuideError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            StyleGuideError::Validation(_) => Self::ValidationError { code, message },
            StyleGuideError::NotFound => Self::NotFound { code, message },
            StyleGuideError::Database { .. } => Self::DatabaseError { code, message },
        }
    }
}
