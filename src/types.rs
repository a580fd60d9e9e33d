use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Deserialize;

/// Issue state filter accepted by `fetch-issues`, forwarded to the API as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IssueState {
    All,
    Open,
    Closed,
}

impl IssueState {
    pub fn as_query(&self) -> &'static str {
        match self {
            IssueState::All => "all",
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

// Raw API response shapes. Every field the schema does not structurally
// require is optional, so a sparse item deserializes instead of failing.

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<GitActor>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitActor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: i64,
    /// Present and non-null only when the item is really a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestLink {
    #[serde(default)]
    pub url: Option<String>,
}

// Normalized rows, one per persisted CSV line.

#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub sha: String,
    pub author: Option<String>,
    pub email: Option<String>,
    /// Author date, not committer date.
    pub date: Option<DateTime<Utc>>,
    /// First line of the commit message, trimmed.
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueRecord {
    pub id: i64,
    pub number: Option<i64>,
    pub title: Option<String>,
    pub user: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: i64,
    /// Whole days between created_at and closed_at, truncated toward zero.
    pub open_duration_days: Option<i64>,
}
