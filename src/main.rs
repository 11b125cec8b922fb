use std::env;
use std::error::Error;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use github_user_searching_lib::{render, Args, ClientConfig, GitHubClient, UserQuery, UserSearcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();

    // Logs go to stderr so stdout carries only the results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Search failed: {}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Token from arguments first, then environment
    let token = match &args.token {
        Some(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
        _ => match env::var("GITHUB_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
            _ => {
                info!("No GitHub token provided, using the unauthenticated rate limit");
                None
            }
        },
    };

    let client = GitHubClient::new(ClientConfig {
        api_url: args.api_url.clone(),
        token,
        sort: args.sort,
        order: args.order,
        timeout: args.timeout.map(Duration::from_secs),
    })?;

    let query = UserQuery::new(args.min_followers, args.min_repos, args.language.clone());

    let mut searcher = UserSearcher::new(client, &query)?
        .with_per_page(args.per_page)
        .with_max_results(args.max_results);
    if !args.no_progress {
        searcher = searcher.with_progress();
    }

    let users = searcher.search(args.count).await?;

    print!("{}", render(&users, args.format)?);
    Ok(())
}
