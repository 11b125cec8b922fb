use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a user search.
///
/// None of these are retried; a failure on any page aborts the whole search.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub refused the request ({status}): {message}{}", reset_hint(.reset_at))]
    AuthenticationOrRateLimit {
        status: StatusCode,
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("GitHub Search API error ({status}): {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid GitHub token: {0}")]
    InvalidToken(String),
}

impl SearchError {
    /// True for the 401/403/429 family.
    pub fn is_auth_or_rate_limit(&self) -> bool {
        matches!(self, SearchError::AuthenticationOrRateLimit { .. })
    }
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(" (rate limit resets at {})", at.to_rfc3339()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_includes_reset_time() {
        let err = SearchError::AuthenticationOrRateLimit {
            status: StatusCode::FORBIDDEN,
            message: "API rate limit exceeded".to_string(),
            reset_at: DateTime::from_timestamp(1_700_000_000, 0),
        };

        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("API rate limit exceeded"));
        assert!(text.contains("2023-11-14T22:13:20+00:00"));
        assert!(err.is_auth_or_rate_limit());
    }

    #[test]
    fn bad_credentials_message_has_no_reset_hint() {
        let err = SearchError::AuthenticationOrRateLimit {
            status: StatusCode::UNAUTHORIZED,
            message: "Bad credentials".to_string(),
            reset_at: None,
        };
        assert!(!err.to_string().contains("resets"));
    }
}
