use clap::Parser;

use crate::client::{SortField, SortOrder, DEFAULT_API_URL};
use crate::output::OutputFormat;
use crate::user_searcher::{GITHUB_MAX_PER_PAGE, GITHUB_MAX_RESULTS};

/// GitHub user search CLI: find accounts by follower count, public
/// repository count and language, and print their profile URLs.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Search GitHub users matching follower, repository and language filters, paging through the Search API up to its result ceiling."
)]
pub struct Args {
    /// Only users with at least this many followers.
    #[clap(short = 'f', long, value_name = "N")]
    pub min_followers: Option<u32>,

    /// Only users with at least this many public repositories.
    #[clap(short = 'r', long, value_name = "N")]
    pub min_repos: Option<u32>,

    /// Only users with repositories in this language.
    #[clap(short, long)]
    pub language: Option<String>,

    /// Total number of users to return.
    #[clap(
        short = 'n',
        long,
        default_value_t = GITHUB_MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub count: u32,

    /// Most results the Search API will serve for one query.
    #[clap(
        long,
        value_name = "NUM",
        default_value_t = GITHUB_MAX_RESULTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_results: u32,

    /// Results per page request (1-100).
    #[clap(
        short = 'p',
        long,
        value_name = "NUM",
        default_value_t = GITHUB_MAX_PER_PAGE,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub per_page: u32,

    /// Rank results by this field instead of best match.
    #[clap(long, value_enum)]
    pub sort: Option<SortField>,

    /// Sort direction, used together with --sort.
    #[clap(long, value_enum)]
    pub order: Option<SortOrder>,

    /// GitHub API token for authentication. Falls back to GITHUB_TOKEN.
    #[clap(short, long)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API.
    #[clap(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds.
    #[clap(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// How to print the results.
    #[clap(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Do not show the progress spinner.
    #[clap(long)]
    pub no_progress: bool,
}
