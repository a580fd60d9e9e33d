use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::IssueState;

#[derive(Parser, Debug)]
#[command(name = "repo-miner")]
#[command(about = "Fetch GitHub commits/issues and summarize them")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config_file: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Page size requested from the API
    #[arg(long, global = true)]
    pub per_page: Option<usize>,

    /// Enable verbose output (shows what the tool is doing)
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch commits and save to CSV
    FetchCommits {
        /// Repository in owner/repo format
        #[arg(long)]
        repo: String,

        /// Max number of commits to fetch
        #[arg(long = "max")]
        max: Option<usize>,

        /// Path to output commits CSV
        #[arg(long)]
        out: PathBuf,
    },

    /// Fetch issues and save to CSV
    FetchIssues {
        /// Repository in owner/repo format
        #[arg(long)]
        repo: String,

        /// Filter issues by state
        #[arg(long, value_enum, default_value_t = IssueState::All)]
        state: IssueState,

        /// Max number of issues to fetch
        #[arg(long = "max")]
        max: Option<usize>,

        /// Path to output issues CSV
        #[arg(long)]
        out: PathBuf,
    },

    /// Read saved commit and issue tables and print summary statistics
    Summarize {
        /// Path to the commits CSV
        #[arg(long)]
        commits: PathBuf,

        /// Path to the issues CSV
        #[arg(long)]
        issues: PathBuf,
    },
}

/// Repository identifiers are validated here, before any fetch runs.
pub fn validate_repo(repo: &str) -> Result<String> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(repo.to_string())
        }
        _ => anyhow::bail!("Invalid repository '{repo}', expected owner/repo format"),
    }
}
