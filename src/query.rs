use url::form_urlencoded;

use crate::error::SearchError;

/// Filters applied to a GitHub user search.
///
/// Each present filter becomes one predicate of the `q` parameter:
/// `followers:>=N`, `repos:>=N` and `language:L`, joined with `+`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub min_followers: Option<u32>,
    pub min_repos: Option<u32>,
    pub language: Option<String>,
}

impl UserQuery {
    pub fn new(
        min_followers: Option<u32>,
        min_repos: Option<u32>,
        language: Option<String>,
    ) -> Self {
        let language = language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        UserQuery {
            min_followers,
            min_repos,
            language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_followers.is_none() && self.min_repos.is_none() && self.language.is_none()
    }

    /// Render the `q` value, ready to be placed in a URL as-is.
    ///
    /// Structural characters (`:`, `>=`, the joining `+`) stay raw because
    /// GitHub's query grammar stops matching once they are percent-encoded.
    /// Only the language value is encoded.
    pub fn to_query_string(&self) -> Result<String, SearchError> {
        if self.is_empty() {
            return Err(SearchError::InvalidQuery(
                "must specify at least one search parameter".to_string(),
            ));
        }

        let mut predicates = Vec::with_capacity(3);

        if let Some(followers) = self.min_followers {
            predicates.push(format!("followers:>={}", followers));
        }
        if let Some(repos) = self.min_repos {
            predicates.push(format!("repos:>={}", repos));
        }
        if let Some(language) = &self.language {
            predicates.push(format!("language:{}", encode_value(language)));
        }

        Ok(predicates.join("+"))
    }
}

fn encode_value(value: &str) -> String {
    let value = if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    };
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn followers_only() {
        let q = UserQuery::new(Some(1000), None, None);
        assert_eq!(q.to_query_string().unwrap(), "followers:>=1000");
    }

    #[test]
    fn all_filters_joined_in_order() {
        let q = UserQuery::new(Some(500), Some(20), Some("rust".to_string()));
        assert_eq!(
            q.to_query_string().unwrap(),
            "followers:>=500+repos:>=20+language:rust"
        );
    }

    #[test]
    fn absent_filters_are_omitted() {
        let q = UserQuery::new(None, Some(5), None);
        let rendered = q.to_query_string().unwrap();
        assert_eq!(rendered, "repos:>=5");
        assert!(!rendered.contains("followers"));
        assert!(!rendered.contains("language"));
    }

    #[test]
    fn zero_threshold_is_still_a_filter() {
        let q = UserQuery::new(Some(0), None, None);
        assert_eq!(q.to_query_string().unwrap(), "followers:>=0");
    }

    #[test]
    fn language_value_is_encoded() {
        let q = UserQuery::new(None, None, Some("c++".to_string()));
        assert_eq!(q.to_query_string().unwrap(), "language:c%2B%2B");
    }

    #[test]
    fn multi_word_language_is_quoted() {
        let q = UserQuery::new(None, None, Some("Visual Basic".to_string()));
        assert_eq!(q.to_query_string().unwrap(), "language:%22Visual+Basic%22");
    }

    #[test]
    fn blank_language_counts_as_absent() {
        let q = UserQuery::new(None, None, Some("   ".to_string()));
        assert!(q.is_empty());
        assert!(matches!(
            q.to_query_string(),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn empty_query_is_rejected() {
        let err = UserQuery::default().to_query_string().unwrap_err();
        assert!(err.to_string().contains("at least one search parameter"));
    }
}
