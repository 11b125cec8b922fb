use std::collections::HashSet;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::client::UserSearchApi;
use crate::error::SearchError;
use crate::models::UserRecord;
use crate::query::UserQuery;

/// GitHub Search API limits to 100 results per page.
pub const GITHUB_MAX_PER_PAGE: u32 = 100;

/// GitHub only ever serves the first 1000 results of a search.
pub const GITHUB_MAX_RESULTS: u32 = 1000;

/// Pages through `/search/users` for one [`UserQuery`].
pub struct UserSearcher<A> {
    api: A,
    query: String,
    per_page: u32,
    max_results: u32,
    progress: ProgressBar,
}

impl<A: UserSearchApi> UserSearcher<A> {
    /// Fails with [`SearchError::InvalidQuery`] when no filter is set.
    pub fn new(api: A, query: &UserQuery) -> Result<Self, SearchError> {
        Ok(UserSearcher {
            api,
            query: query.to_query_string()?,
            per_page: GITHUB_MAX_PER_PAGE,
            max_results: GITHUB_MAX_RESULTS,
            progress: ProgressBar::hidden(),
        })
    }

    /// Page size, clamped to `1..=100`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, GITHUB_MAX_PER_PAGE);
        self
    }

    /// Ceiling on total results the API will serve for one search.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Report page progress on a spinner.
    pub fn with_progress(mut self) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        // Keep spinning while a request is in flight
        pb.enable_steady_tick(Duration::from_millis(80));
        self.progress = pb;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of requests needed for `target` results at `per_page` each.
    pub fn pages_needed(target: u32, per_page: u32) -> u32 {
        target.div_ceil(per_page)
    }

    /// Collect up to `count` users, in the order GitHub ranks them.
    ///
    /// Returns at most `min(count, max_results)` records, fewer when the
    /// search itself has fewer matches. Duplicate users skipped along the way
    /// are made up from the following pages, up to the `max_results`
    /// ceiling. An error on any page aborts the whole search.
    pub async fn search(&self, count: u32) -> Result<Vec<UserRecord>, SearchError> {
        let target = count.min(self.max_results);
        if target == 0 {
            return Ok(Vec::new());
        }

        let per_page = target.min(self.per_page);
        let num_pages = Self::pages_needed(target, per_page);
        // Pages past this one lie beyond what the API serves
        let last_page = Self::pages_needed(self.max_results, per_page);
        let target = target as usize;

        info!(
            "Searching users with '{}': {} results over {} page(s)",
            self.query, target, num_pages
        );

        let mut records: Vec<UserRecord> = Vec::with_capacity(target);
        let mut seen: HashSet<String> = HashSet::with_capacity(target);

        for page in 1..=last_page {
            self.progress.set_message(format!(
                "Searching users - page {} ({}/{} found)",
                page,
                records.len(),
                target
            ));
            self.progress.tick();

            let response = match self.api.fetch_page(&self.query, page, per_page).await {
                Ok(Some(response)) => response,
                Ok(None) => {
                    debug!("No more searchable results after page {}", page - 1);
                    break;
                }
                Err(e) => {
                    self.progress.finish_and_clear();
                    return Err(e);
                }
            };

            if response.incomplete_results {
                warn!("GitHub returned incomplete results for page {}", page);
            }

            let received = response.items.len();
            if received == 0 {
                debug!("Page {} is empty", page);
                break;
            }

            for item in response.items {
                if records.len() == target {
                    break;
                }
                if !seen.insert(item.login.clone()) {
                    debug!("Skipping duplicate user '{}' on page {}", item.login, page);
                    continue;
                }
                records.push(UserRecord::from(item));
            }

            debug!(
                "Page {}: {} items, {} collected of {} available",
                page,
                received,
                records.len(),
                response.total_count
            );

            if records.len() == target
                || (received as u32) < per_page
                || records.len() as u64 >= response.total_count
            {
                break;
            }
        }

        self.progress.finish_and_clear();
        info!("Found {} users", records.len());
        Ok(records)
    }
}
