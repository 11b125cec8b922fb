use serde::{Deserialize, Serialize};

pub const GITHUB_WEB_URL: &str = "https://github.com";

/// Response from the GitHub Search Users API (`/search/users`).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<SearchUserItem>,
}

/// A single user item from the search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchUserItem {
    pub login: String,
    pub html_url: Option<String>,
}

/// One row of the final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub username: String,
    pub profile_url: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, profile_url: impl Into<String>) -> Self {
        UserRecord {
            username: username.into(),
            profile_url: profile_url.into(),
        }
    }
}

impl From<SearchUserItem> for UserRecord {
    fn from(item: SearchUserItem) -> Self {
        let profile_url = match item.html_url {
            Some(url) if !url.is_empty() => url,
            _ => format!("{}/{}", GITHUB_WEB_URL, item.login),
        };
        UserRecord {
            username: item.login,
            profile_url,
        }
    }
}
