mod cli;
mod config;
mod error;
mod fetch;
mod github;
mod summary;
mod table;
mod types;

use anyhow::Result;
use clap::Parser;
use std::env;

use cli::{Cli, Command};
use config::Settings;
use github::GitHubClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    match cli.command {
        Command::FetchCommits { repo, max, out } => {
            let repo = cli::validate_repo(&repo)?;
            let client = build_client(&settings)?;
            let rows = fetch::fetch_commits(&client, &repo, max).await?;
            table::write_commits(&out, &rows)?;
            println!("Saved {} commits to {}", rows.len(), out.display());
        }
        Command::FetchIssues {
            repo,
            state,
            max,
            out,
        } => {
            let repo = cli::validate_repo(&repo)?;
            let client = build_client(&settings)?;
            let rows = fetch::fetch_issues(&client, &repo, state, max).await?;
            table::write_issues(&out, &rows)?;
            println!("Saved {} issues to {}", rows.len(), out.display());
        }
        Command::Summarize { commits, issues } => {
            if settings.verbose {
                eprintln!(
                    "[VERBOSE] Reading tables from {} and {}",
                    commits.display(),
                    issues.display()
                );
            }
            let commit_rows = table::read_commits(&commits)?;
            let issue_rows = table::read_issues(&issues)?;
            summary::print_summary(&commit_rows, &issue_rows);
        }
    }
    Ok(())
}

fn build_client(settings: &Settings) -> Result<GitHubClient> {
    // Absent token means anonymous, rate-limited access, not a failure.
    let token = env::var("GITHUB_TOKEN").ok();
    if settings.verbose {
        eprintln!(
            "[VERBOSE] {}",
            if token.is_some() {
                "Using GITHUB_TOKEN from environment"
            } else {
                "No GITHUB_TOKEN set, using anonymous access"
            }
        );
    }
    GitHubClient::new(
        token.as_deref(),
        &settings.api_url,
        settings.per_page,
        settings.verbose,
    )
}
