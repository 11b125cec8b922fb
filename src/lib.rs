//! # GitHub User Searching
//!
//! A Rust library for finding GitHub users by follower count, public
//! repository count and language through the Search API, paging up to the
//! API's result ceiling.
//!
//! ## Main Components
//!
//! - [`UserQuery`]: The filters, rendered into GitHub's query grammar
//! - [`UserSearcher`]: The pagination loop that collects [`UserRecord`]s
//! - [`GitHubClient`]: The HTTP side, behind the [`UserSearchApi`] trait
//! - [`Args`]: Command line argument structure for configuring a search
//!
//! ## Example
//!
//! ```no_run
//! use github_user_searching_lib::{ClientConfig, GitHubClient, UserQuery, UserSearcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GitHubClient::new(ClientConfig::default())?;
//!     let query = UserQuery::new(Some(1000), None, None);
//!
//!     let searcher = UserSearcher::new(client, &query)?;
//!     for user in searcher.search(10).await? {
//!         println!("{} {}", user.username, user.profile_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod args;
mod client;
mod error;
mod models;
mod output;
mod query;
mod user_searcher;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::client::{
    classify_failure, ClientConfig, GitHubClient, RateLimit, SortField, SortOrder, UserSearchApi,
    DEFAULT_API_URL,
};
pub use crate::error::SearchError;
pub use crate::models::{SearchResponse, SearchUserItem, UserRecord};
pub use crate::output::{render, render_table, OutputFormat};
pub use crate::query::UserQuery;
pub use crate::user_searcher::{UserSearcher, GITHUB_MAX_PER_PAGE, GITHUB_MAX_RESULTS};
