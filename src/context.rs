//! Per-request caller context.

/// Identity and correlation id for one inbound request.
///
/// Built by the auth middleware and handed to every service call; nothing
/// about the caller lives in global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
    pub request_id: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(user_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            request_id: request_id.into(),
        }
    }
}
