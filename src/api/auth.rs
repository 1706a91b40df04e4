use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::observability::RequestId;
use super::{ApiError, AppState};
use crate::config::AuthConfig;
use crate::context::RequestContext;

const MAX_USER_ID_LEN: usize = 255;

/// Caller identity, as asserted by the fronting identity provider.
///
/// Checks, in order:
/// 1. `X-Api-Key` matches the configured shared secret, when one is set
/// 2. the configured user id header is present and non-blank
fn authenticate(auth: &AuthConfig, headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(expected) = &auth.api_key {
        let presented = headers.get("X-Api-Key").and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return Err(ApiError::Unauthorized("Invalid API key".to_string()));
        }
    }

    let user_id = headers
        .get(auth.user_id_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_USER_ID_LEN)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    Ok(user_id.to_string())
}

/// Resolves the caller and attaches a [`RequestContext`] to the request.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match authenticate(&state.config().auth, request.headers()) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated request");
            return e.into_response();
        }
    };

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map_or_else(|| Uuid::new_v4().to_string(), |id| id.0.clone());

    tracing::Span::current().record("user_id", user_id.as_str());
    request
        .extensions_mut()
        .insert(RequestContext::new(user_id, request_id));

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn test_requires_user_header() {
        let auth = AuthConfig::default();
        assert!(authenticate(&auth, &headers(&[])).is_err());
        assert!(authenticate(&auth, &headers(&[("x-clerk-user-id", "  ")])).is_err());
        assert_eq!(
            authenticate(&auth, &headers(&[("x-clerk-user-id", "user_1")])).unwrap(),
            "user_1"
        );
    }

    #[test]
    fn test_shared_secret_is_checked() {
        let auth = AuthConfig {
            api_key: Some("proxy-secret".to_string()),
            ..AuthConfig::default()
        };
        let missing = headers(&[("x-clerk-user-id", "user_1")]);
        assert!(authenticate(&auth, &missing).is_err());

        let wrong = headers(&[("x-clerk-user-id", "user_1"), ("x-api-key", "nope")]);
        assert!(authenticate(&auth, &wrong).is_err());

        let ok = headers(&[("x-clerk-user-id", "user_1"), ("x-api-key", "proxy-secret")]);
        assert!(authenticate(&auth, &ok).is_ok());
    }
}
