use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::models::SearchResponse;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Source of search result pages.
///
/// `Ok(None)` means the API reported that a page past the first one is
/// beyond the searchable results, which ends pagination without an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSearchApi: Send + Sync {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Option<SearchResponse>, SearchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Followers,
    Repositories,
    Joined,
}

impl SortField {
    fn as_str(self) -> &'static str {
        match self {
            SortField::Followers => "followers",
            SortField::Repositories => "repositories",
            SortField::Joined => "joined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            sort: None,
            order: None,
            timeout: None,
        }
    }
}

/// reqwest-backed client for `GET /search/users`.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    sort: Option<SortField>,
    order: Option<SortOrder>,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                SearchError::InvalidToken("contains characters not allowed in a header".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .user_agent(concat!("github-user-searching/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(GitHubClient {
            client: builder.build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            sort: config.sort,
            order: config.order,
        })
    }

    /// Build the request URL by hand so `q` keeps its raw `:` and `+`.
    fn page_url(&self, query: &str, page: u32, per_page: u32) -> String {
        let mut url = format!(
            "{}/search/users?q={}&page={}&per_page={}",
            self.api_url, query, page, per_page
        );
        if let Some(sort) = self.sort {
            url.push_str("&sort=");
            url.push_str(sort.as_str());
        }
        if let Some(order) = self.order {
            url.push_str("&order=");
            url.push_str(order.as_str());
        }
        url
    }
}

#[async_trait]
impl UserSearchApi for GitHubClient {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Option<SearchResponse>, SearchError> {
        let url = self.page_url(query, page, per_page);
        debug!("Requesting URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if let Some(limit) = RateLimit::from_headers(response.headers()) {
            if limit.remaining == 0 {
                warn!(
                    "Rate limit exhausted ({}/{}), resets at {}",
                    limit.remaining,
                    limit.limit,
                    limit
                        .reset_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "unknown".to_string())
                );
            } else {
                debug!("Rate limit: {}/{}", limit.remaining, limit.limit);
            }
        }

        // Past page 1, GitHub answers 422 once a page lies beyond the
        // searchable results. On page 1 it means the query itself was refused.
        if status == StatusCode::UNPROCESSABLE_ENTITY && page > 1 {
            warn!("Reached search limit at page {}", page);
            return Ok(None);
        }

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &headers, body));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SearchResponse>(&body)
            .map_err(|e| SearchError::MalformedResponse(format!("page {}: {}", page, e)))?;

        Ok(Some(parsed))
    }
}

/// Values of the `X-RateLimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_number(headers, "X-RateLimit-Remaining")?;
        let limit = header_number(headers, "X-RateLimit-Limit").unwrap_or(remaining);
        let reset_at = header_number::<i64>(headers, "X-RateLimit-Reset")
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Some(RateLimit {
            limit,
            remaining,
            reset_at,
        })
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Map a non-success response to an error.
///
/// A 422 lands here only on page 1, where it reports a refused query.
pub fn classify_failure(status: StatusCode, headers: &HeaderMap, body: String) -> SearchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            let reset_at = RateLimit::from_headers(headers).and_then(|l| l.reset_at);
            SearchError::AuthenticationOrRateLimit {
                status,
                message: api_message(&body),
                reset_at,
            }
        }
        _ => SearchError::UnexpectedStatus { status, body },
    }
}

/// GitHub error bodies look like `{"message": "...", "documentation_url": "..."}`.
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
