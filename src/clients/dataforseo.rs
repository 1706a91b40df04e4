use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::DataForSeoConfig;
use crate::constants::suggestions::PROVIDER_OK_STATUS;
use crate::services::suggestion_service::{
    KeywordResearchProvider, SuggestionError, SuggestionItem,
};

const SUGGESTIONS_PATH: &str = "/v3/dataforseo_labs/google/keyword_suggestions/live";

#[derive(Debug, Serialize)]
struct SuggestionTask<'a> {
    keyword: String,
    language_name: &'a str,
    location_code: i32,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status_code: i64,
    #[serde(default)]
    status_message: String,
    #[serde(default)]
    tasks: Vec<ApiTask>,
}

#[derive(Debug, Deserialize)]
struct ApiTask {
    #[serde(default)]
    result: Option<Vec<TaskResult>>,
}

/// Live endpoints wrap suggestions in `items`; some payloads list them
/// directly as result entries.
#[derive(Debug, Deserialize)]
struct TaskResult {
    #[serde(default)]
    items: Option<Vec<ResultItem>>,
    #[serde(flatten)]
    entry: Option<ResultItem>,
}

#[derive(Debug, Deserialize)]
struct ResultItem {
    keyword: String,
    #[serde(default)]
    keyword_info: Option<KeywordInfo>,
}

#[derive(Debug, Deserialize)]
struct KeywordInfo {
    search_volume: Option<i64>,
    cpc: Option<f64>,
    #[serde(default)]
    competition: Option<Value>,
    #[serde(default)]
    competition_level: Option<String>,
}

impl KeywordInfo {
    fn competition_label(self) -> Option<String> {
        self.competition_level.or_else(|| match self.competition? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
    }
}

/// Maps a non-success HTTP status to the failure the caller reports.
fn classify_status(status: StatusCode, body: &str) -> SuggestionError {
    match status {
        StatusCode::UNAUTHORIZED => SuggestionError::InvalidCredentials,
        StatusCode::TOO_MANY_REQUESTS => SuggestionError::RateLimited,
        _ => SuggestionError::Provider(format!("HTTP {status}: {body}")),
    }
}

fn classify_transport(err: &reqwest::Error) -> SuggestionError {
    if err.is_timeout() {
        SuggestionError::Timeout
    } else {
        SuggestionError::Provider(err.to_string())
    }
}

/// Flattens the first task's result items.
fn extract_items(envelope: ApiEnvelope) -> Result<Vec<SuggestionItem>, SuggestionError> {
    if envelope.status_code != PROVIDER_OK_STATUS {
        return Err(SuggestionError::Provider(envelope.status_message));
    }

    let items = envelope
        .tasks
        .into_iter()
        .next()
        .and_then(|task| task.result)
        .unwrap_or_default()
        .into_iter()
        .flat_map(|result| match result.items {
            Some(items) => items,
            None => result.entry.into_iter().collect(),
        })
        .map(|item| {
            let info = item.keyword_info;
            SuggestionItem {
                keyword: item.keyword,
                search_volume: info.as_ref().and_then(|i| i.search_volume),
                cpc: info.as_ref().and_then(|i| i.cpc),
                competition: info.and_then(KeywordInfo::competition_label),
            }
        })
        .collect();

    Ok(items)
}

#[derive(Clone)]
pub struct DataForSeoClient {
    client: Client,
    base_url: String,
    login: String,
    password: String,
}

impl DataForSeoClient {
    pub fn new(config: &DataForSeoConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("Blogforge/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }
}

#[async_trait]
impl KeywordResearchProvider for DataForSeoClient {
    async fn keyword_suggestions(
        &self,
        seeds: &[String],
        language_name: &str,
        location_code: i32,
        limit: u32,
    ) -> Result<Vec<SuggestionItem>, SuggestionError> {
        let url = format!("{}{}", self.base_url, SUGGESTIONS_PATH);
        let body = [SuggestionTask {
            keyword: seeds.join(", "),
            language_name,
            location_code,
            limit,
        }];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| classify_transport(&e))?;

        let items = extract_items(envelope)?;
        debug!(count = items.len(), "DataForSEO returned keyword suggestions");
        Ok(items)
    }
}
